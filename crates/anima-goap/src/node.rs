//! Search-tree bookkeeping for a single planning request.
//!
//! Nodes live in one growable arena and refer to each other by index, so the
//! arena can reallocate freely while the search is running. Nothing here
//! survives past the end of a `construct_plan` call.

use anima_core::WorldState;

/// Handle of a node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub state: WorldState,
    pub parent: Option<NodeId>,
    /// Index of the task that produced this node from its parent.
    pub task: Option<usize>,
    /// Tasks applied since the root.
    pub g: u32,
    /// Score used for selection and child admission.
    pub f: u64,
}

/// Node storage plus the open set.
///
/// There is no visited set: the same state reached along two paths is kept
/// as two nodes.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<SearchNode>,
    open: Vec<NodeId>,
}

impl NodeArena {
    pub fn with_depth_hint(depth: u8) -> Self {
        let mut arena = Self::default();
        arena.reserve(depth);
        arena
    }

    fn reserve(&mut self, depth: u8) {
        let hint = usize::from(depth);
        self.nodes.reserve(hint);
        self.open.reserve(hint);
    }

    /// Drop all nodes but keep the allocation for the next request.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.open.clear();
    }

    /// Drop all nodes and the allocation, then reserve for `depth`.
    pub fn reset(&mut self, depth: u8) {
        self.nodes = Vec::new();
        self.open = Vec::new();
        self.reserve(depth);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn push_root(&mut self, state: WorldState, f: u64) -> NodeId {
        self.insert(SearchNode {
            state,
            parent: None,
            task: None,
            g: 0,
            f,
        })
    }

    pub fn push_child(&mut self, parent: NodeId, task: usize, state: WorldState, f: u64) -> NodeId {
        let g = self.node(parent).g + 1;
        self.insert(SearchNode {
            state,
            parent: Some(parent),
            task: Some(task),
            g,
            f,
        })
    }

    fn insert(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.open.push(id);
        id
    }

    /// Open node with the lowest `f`. Ties go to the node opened first.
    pub fn best_open(&self) -> Option<NodeId> {
        self.open
            .iter()
            .copied()
            .min_by_key(|id| self.node(*id).f)
    }

    /// Remove `id` from the open set, keeping the order of the rest.
    pub fn close(&mut self, id: NodeId) {
        if let Some(pos) = self.open.iter().position(|open| *open == id) {
            self.open.remove(pos);
        }
    }

    /// Task indices from `id` back to the root, nearest to `id` first.
    pub fn tasks_to_root(&self, id: NodeId) -> Vec<usize> {
        let mut tasks = Vec::with_capacity(self.node(id).g as usize);
        let mut current = self.node(id);
        while current.g != 0 {
            let (Some(task), Some(parent)) = (current.task, current.parent) else {
                break;
            };
            tasks.push(task);
            current = self.node(parent);
        }
        tasks
    }
}
