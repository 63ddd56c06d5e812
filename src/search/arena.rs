// src/search/arena.rs
// =============================================================================
// Storage for the nodes discovered during one search.
//
// Every node remembers which node discovered it. Instead of pointers we keep
// all nodes in one Vec and store the parent's index, so the ancestry chain is
// just a list of numbers and the whole tree is dropped in one go when the
// search ends.
// =============================================================================

/// Index of a node inside a [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// One step of the traversal. Never modified after it is pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    pub url: String,
    /// Why this node was reached from its predecessor (may be empty)
    pub context_sentence: String,
    /// `None` only for the start node
    pub predecessor: Option<NodeId>,
}

/// Arena of all nodes of a single search run.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the start node: no predecessor, empty sentence.
    pub fn push_root(&mut self, url: String) -> NodeId {
        self.push(SearchNode {
            url,
            context_sentence: String::new(),
            predecessor: None,
        })
    }

    /// Adds a node discovered on `predecessor`'s page.
    pub fn push_child(&mut self, predecessor: NodeId, url: String, context_sentence: String) -> NodeId {
        self.push(SearchNode {
            url,
            context_sentence,
            predecessor: Some(predecessor),
        })
    }

    fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    // Ids only come from this tree and nodes are never removed, so indexing
    // cannot go out of bounds
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Walks predecessors from `id` back to the root, in discovery order,
    /// without the root itself.
    ///
    /// The root carries no sentence and stands for "the start", so a path to
    /// the root is empty.
    pub fn path_to(&self, id: NodeId) -> Vec<&SearchNode> {
        let mut path = Vec::new();
        let mut cursor = Some(id);

        while let Some(current) = cursor {
            let node = self.get(current);
            if node.predecessor.is_none() {
                break;
            }
            path.push(node);
            cursor = node.predecessor;
        }

        path.reverse();
        path
    }
}
