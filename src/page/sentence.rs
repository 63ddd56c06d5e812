// src/page/sentence.rs
// =============================================================================
// This module finds the sentence a link's anchor text appears in.
//
// Every step of a found path is printed together with this sentence, so the
// reader can see *why* one article leads to the next.
//
// How it works:
// 1. Find every literal occurrence of the anchor text in the paragraph
// 2. Grow each occurrence outwards to the nearest sentence terminators
//    (. ! ?) on both sides
// 3. First pass: terminators inside ( ... ) don't count, so a parenthetical
//    stays in one piece
// 4. Second pass (only if the first found nothing): every terminator counts
//
// Rust concepts:
// - Byte slices: terminators and parentheses are ASCII, so we can scan bytes
//   and still slice the &str safely on UTF-8 text
// - Closures as parameters: one span-finder serves both passes
// - Ranges: start..end describes a slice of the text
// =============================================================================

use std::ops::Range;

// Returns the sentence containing `anchor_text`, trimmed, or "" if there is none
//
// Parameters:
//   full_text: the paragraph text (borrowed as &str)
//   anchor_text: the visible text of the link, matched literally
//
// Example:
//   full_text = "The fox (a small mammal) jumps over the dog."
//   anchor_text = "small mammal"
//   result = "The fox (a small mammal) jumps over the dog."
pub fn extract_sentence(full_text: &str, anchor_text: &str) -> String {
    // Image links and the like have no visible text
    if anchor_text.trim().is_empty() {
        return String::new();
    }

    // str::match_indices is a plain substring search, so "C++" or "(film)"
    // are never treated as pattern syntax
    let occurrences: Vec<(usize, usize)> = full_text
        .match_indices(anchor_text)
        .map(|(start, matched)| (start, start + matched.len()))
        .collect();

    if occurrences.is_empty() {
        return String::new();
    }

    let bytes = full_text.as_bytes();
    let depths = paren_depths(bytes);

    // Pass 1: parenthetical-inclusive sentences
    for &(start, end) in &occurrences {
        if let Some(span) = enclosing_span(bytes, start, end, |i| depths[i] == 0) {
            return full_text[span].trim().to_string();
        }
    }

    // Pass 2: plain sentences
    for &(start, end) in &occurrences {
        if let Some(span) = enclosing_span(bytes, start, end, |_| true) {
            return full_text[span].trim().to_string();
        }
    }

    String::new()
}

fn is_terminator(byte: u8) -> bool {
    matches!(byte, b'.' | b'!' | b'?')
}

// Parenthesis nesting depth at each byte of the text
//
// A stray ')' never pushes the depth below zero.
fn paren_depths(bytes: &[u8]) -> Vec<usize> {
    let mut depths = Vec::with_capacity(bytes.len());
    let mut depth: usize = 0;

    for &byte in bytes {
        depths.push(depth);
        match byte {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    depths
}

// Grows the match start..end to a full sentence
//
// `counts(i)` decides whether the terminator at byte i ends a sentence.
// The sentence must be closed by a terminator at or after `end`; the opening
// side falls back to the start of the text.
fn enclosing_span<F>(bytes: &[u8], start: usize, end: usize, counts: F) -> Option<Range<usize>>
where
    F: Fn(usize) -> bool,
{
    let close = (end..bytes.len()).find(|&i| is_terminator(bytes[i]) && counts(i))?;

    let open = (0..start)
        .rev()
        .find(|&i| is_terminator(bytes[i]) && counts(i))
        .map_or(0, |i| i + 1);

    Some(open..close + 1)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why scan bytes instead of chars?
//    - '.', '!', '?', '(' and ')' are all single-byte ASCII
//    - In UTF-8 an ASCII byte can never be part of a multi-byte character
//    - So every index we find is a valid place to slice the &str
//
// 2. What does map_or(0, |i| i + 1) do?
//    - If a terminator was found at i, the sentence starts right after it
//    - If none was found (None), the sentence starts at the beginning (0)
//
// 3. Why the ? after find(...)?
//    - No closing terminator means no sentence can be isolated
//    - ? returns None from enclosing_span straight away
// -----------------------------------------------------------------------------
