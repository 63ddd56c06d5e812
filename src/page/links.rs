// src/page/links.rs
// =============================================================================
// This module pulls article links (and their sentences) out of a page's HTML.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Resolve "/wiki/Foo" against the site origin
// - Drop "#Section" fragments so every article has one canonical URL
//
// Only prose counts: links inside <p> blocks. Navigation, tables, infoboxes
// and footnotes are ignored.
//
// Rust concepts:
// - HashSet + Vec: an insertion-ordered map with unique keys
// - Iterators over DOM ancestors
// - IntoIterator: so callers can write `for link in links`
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

use super::sentence::extract_sentence;

// Tags whose paragraphs are not article prose
const SKIPPED_CONTAINERS: &[&str] = &["table", "nav", "aside", "figure", "footer"];

// Wikipedia-style class names for boxes around the prose
const SKIPPED_CLASSES: &[&str] = &["infobox", "navbox", "reflist", "references", "thumb"];

/// One outbound article link and the sentence it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub url: String,
    pub context_sentence: String,
}

/// Article links of a single page, in the order they appear.
///
/// Keys are unique: inserting a URL that is already present is a no-op, so
/// the first occurrence on the page wins.
#[derive(Debug, Clone, Default)]
pub struct PageLinks {
    entries: Vec<PageLink>,
    seen: HashSet<String>,
}

impl PageLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link unless the URL is already present. Returns true if added.
    pub fn insert(&mut self, url: String, context_sentence: String) -> bool {
        if !self.seen.insert(url.clone()) {
            return false;
        }
        self.entries.push(PageLink {
            url,
            context_sentence,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &PageLink> {
        self.entries.iter()
    }
}

impl IntoIterator for PageLinks {
    type Item = PageLink;
    type IntoIter = std::vec::IntoIter<PageLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, String)> for PageLinks {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut links = PageLinks::new();
        for (url, sentence) in iter {
            links.insert(url, sentence);
        }
        links
    }
}

// Extracts article links from the paragraphs of an HTML page
//
// Parameters:
//   html: the page HTML
//   origin: the site origin links are resolved against
//   article_prefix: path prefix of article links (usually "/wiki/")
//
// Returns: PageLinks mapping each absolute article URL to its sentence
//
// Example:
//   html = "<p>A <a href='/wiki/Fox'>fox</a> runs.</p>"
//   origin = "https://en.wikipedia.org"
//   result = { "https://en.wikipedia.org/wiki/Fox" => "A fox runs." }
pub fn extract_article_links(html: &str, origin: &Url, article_prefix: &str) -> PageLinks {
    let mut links = PageLinks::new();

    let document = Html::parse_document(html);

    // Both selectors are constants and known to be valid
    let paragraph_selector = Selector::parse("p").expect("valid paragraph selector");
    let link_selector = Selector::parse("a[href]").expect("valid link selector");

    for paragraph in document.select(&paragraph_selector) {
        if is_outside_prose(&paragraph) {
            continue;
        }

        // Full text of the paragraph, including the text of its links
        let text = prose_text(&paragraph);

        for link in paragraph.select(&link_selector) {
            if is_footnote_marker(&link, &paragraph) {
                continue;
            }

            let href = match link.value().attr("href") {
                Some(href) => href,
                None => continue,
            };

            if !is_article_href(href, article_prefix) {
                continue;
            }

            let url = match resolve_article(origin, href) {
                Some(url) => url,
                None => continue,
            };

            // Cheap check first so we don't compute sentences for repeats
            if links.seen.contains(&url) {
                continue;
            }

            let anchor: String = link.text().collect();
            let sentence = extract_sentence(&text, &anchor);
            links.insert(url, sentence);
        }
    }

    links
}

// Turns user input into the canonical form used as a node key
//
// Non-ASCII paths are percent-encoded and the fragment is dropped, so that
// "https://ru.wikipedia.org/wiki/Москва" equals the href found on pages.
pub fn canonicalize_url(raw: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    url.set_fragment(None);
    Ok(url.to_string())
}

// Checks if an href points at an article (not Special:, File:, Talk:, ...)
fn is_article_href(href: &str, article_prefix: &str) -> bool {
    href.starts_with(article_prefix)
        && !href.contains(':')
        && !href.to_ascii_lowercase().contains("%3a")
}

// Resolves an article href against the origin, without its fragment
fn resolve_article(origin: &Url, href: &str) -> Option<String> {
    let mut url = origin.join(href).ok()?;
    url.set_fragment(None);
    Some(url.to_string())
}

// True if the paragraph sits in a table, infobox, navigation block, etc.
fn is_outside_prose(paragraph: &ElementRef) -> bool {
    paragraph.ancestors().any(|node| {
        node.value().as_element().is_some_and(|element| {
            SKIPPED_CONTAINERS.contains(&element.name())
                || element
                    .classes()
                    .any(|class| SKIPPED_CLASSES.contains(&class))
        })
    })
}

// True for the [1]-style reference links (<sup class="reference">)
//
// Only ancestors below the paragraph are checked; a plain <sup> such as the
// "2" in km² is ordinary prose.
fn is_footnote_marker(link: &ElementRef, paragraph: &ElementRef) -> bool {
    link.ancestors()
        .take_while(|node| node.id() != paragraph.id())
        .any(|node| {
            node.value().as_element().is_some_and(|element| {
                element.name() == "sup" && element.classes().any(|class| class == "reference")
            })
        })
}

// Text of a paragraph without inline <style> and <script> contents
//
// TemplateStyles puts CSS inside paragraphs, and its dots would otherwise
// end sentences early.
fn prose_text(paragraph: &ElementRef) -> String {
    let mut text = String::new();

    for node in paragraph.descendants() {
        let chunk = match node.value().as_text() {
            Some(chunk) => chunk,
            None => continue,
        };

        let in_code = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != paragraph.id())
            .any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|element| matches!(element.name(), "style" | "script"))
            });

        if !in_code {
            text.push_str(chunk);
        }
    }

    text
}
