//! Title-ordered book index.
//!
//! An unbalanced binary search tree whose nodes live in an arena and refer to
//! each other through [`NodeId`] handles. Sorted insertion order degrades the
//! tree into a chain; no rebalancing is ever performed.

use std::{cmp::Ordering, iter::FusedIterator, mem};

use crate::{error::CatalogError, record::BookRecord};

/// Stable handle to a node slot in the index arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A tree node holding one record
#[derive(Debug)]
struct Node {
    /// The stored book
    record: BookRecord,
    /// Subtree of strictly smaller titles
    left: Option<NodeId>,
    /// Subtree of strictly greater titles
    right: Option<NodeId>,
}

/// The edge a node hangs from
#[derive(Debug, Clone, Copy)]
enum Link {
    /// The node is the tree root
    Root,
    /// The node is the left child of the given parent
    Left(NodeId),
    /// The node is the right child of the given parent
    Right(NodeId),
}

/// Binary search tree of books keyed by title
#[derive(Debug, Default)]
pub struct BookIndex {
    /// Node slots; `None` marks a freed slot
    nodes: Vec<Option<Node>>,
    /// Freed slots available for reuse
    free: Vec<NodeId>,
    /// Root of the tree, `None` when empty
    root: Option<NodeId>,
    /// Number of live nodes
    len: usize,
}

impl BookIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of books stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no books
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Look up a book by exact title
    #[must_use]
    pub fn find(&self, title: &str) -> Option<&BookRecord> {
        self.locate(title).map(|(_, id)| &self.node(id).record)
    }

    /// Whether a book with this title is stored
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.locate(title).is_some()
    }

    /// Insert a record as a new leaf
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateTitle` if a record with the same title
    /// is already stored. The index is left unchanged in that case.
    pub fn insert(&mut self, record: BookRecord) -> Result<(), CatalogError> {
        let mut link = Link::Root;
        let mut current = self.root;

        while let Some(id) = current {
            let node = self.node(id);
            match record.title.as_str().cmp(node.record.title.as_str()) {
                Ordering::Less => {
                    link = Link::Left(id);
                    current = node.left;
                }
                Ordering::Greater => {
                    link = Link::Right(id);
                    current = node.right;
                }
                Ordering::Equal => return Err(CatalogError::DuplicateTitle(record.title)),
            }
        }

        let id = self.allocate(Node { record, left: None, right: None });
        self.attach(link, Some(id));
        self.len = self.len.saturating_add(1);
        Ok(())
    }

    /// Remove the record stored under `title` and return it
    ///
    /// A node with two children takes over its in-order successor's record,
    /// and the successor node is spliced out of the right subtree instead.
    /// The returned record is always the one that was stored under `title`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no record has this title.
    pub fn delete(&mut self, title: &str) -> Result<BookRecord, CatalogError> {
        let Some((link, id)) = self.locate(title) else {
            return Err(CatalogError::NotFound(title.to_string()));
        };

        let node = self.node(id);
        let removed = match (node.left, node.right) {
            (None, child) | (child, None) => {
                self.attach(link, child);
                self.release(id).record
            }
            (Some(_), Some(right)) => {
                let (successor_link, successor) = self.minimum(Link::Right(id), right);
                let successor_right = self.node(successor).right;
                self.attach(successor_link, successor_right);
                let successor_record = self.release(successor).record;
                mem::replace(&mut self.node_mut(id).record, successor_record)
            }
        };

        self.len = self.len.saturating_sub(1);
        Ok(removed)
    }

    /// Iterate over all records in ascending title order
    #[must_use]
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self)
    }

    /// Number of nodes on the longest root-to-leaf path
    #[must_use]
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();

        while let Some((id, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            let node = self.node(id);
            for child in [node.left, node.right].into_iter().flatten() {
                pending.push((child, depth.saturating_add(1)));
            }
        }

        tallest
    }

    /// Find the node holding `title` along with the edge it hangs from
    fn locate(&self, title: &str) -> Option<(Link, NodeId)> {
        let mut link = Link::Root;
        let mut current = self.root;

        while let Some(id) = current {
            let node = self.node(id);
            match title.cmp(node.record.title.as_str()) {
                Ordering::Less => {
                    link = Link::Left(id);
                    current = node.left;
                }
                Ordering::Greater => {
                    link = Link::Right(id);
                    current = node.right;
                }
                Ordering::Equal => return Some((link, id)),
            }
        }

        None
    }

    /// Leftmost descendant of `subtree_root`, which hangs from `link`
    ///
    /// The returned node never has a left child.
    fn minimum(&self, mut link: Link, subtree_root: NodeId) -> (Link, NodeId) {
        let mut current = subtree_root;
        while let Some(left) = self.node(current).left {
            link = Link::Left(current);
            current = left;
        }
        debug_assert!(self.node(current).left.is_none());
        (link, current)
    }

    /// Point `link` at `child`
    fn attach(&mut self, link: Link, child: Option<NodeId>) {
        match link {
            Link::Root => self.root = child,
            Link::Left(parent) => self.node_mut(parent).left = child,
            Link::Right(parent) => self.node_mut(parent).right = child,
        }
    }

    /// Place a node in a free slot, growing the arena if none is available
    fn allocate(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            *self.slot_mut(id) = Some(node);
            id
        } else {
            let id = NodeId(self.nodes.len());
            self.nodes.push(Some(node));
            id
        }
    }

    /// Take a node out of its slot and mark the slot free
    ///
    /// # Panics
    ///
    /// Panics if the slot is already free.
    #[allow(clippy::expect_used)]
    fn release(&mut self, id: NodeId) -> Node {
        let node = self.slot_mut(id).take().expect("released a free node slot");
        self.free.push(id);
        node
    }

    /// Borrow a live node
    ///
    /// # Panics
    ///
    /// Panics on a dangling id, which would mean the tree links are corrupt.
    #[allow(clippy::expect_used)]
    fn node(&self, id: NodeId) -> &Node {
        self.nodes.get(id.0).and_then(Option::as_ref).expect("dangling node id in book index")
    }

    /// Mutably borrow a live node
    ///
    /// # Panics
    ///
    /// Panics on a dangling id, which would mean the tree links are corrupt.
    #[allow(clippy::expect_used)]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.slot_mut(id).as_mut().expect("dangling node id in book index")
    }

    /// Mutably borrow a slot, live or free
    ///
    /// # Panics
    ///
    /// Panics if the id lies outside the arena.
    #[allow(clippy::expect_used)]
    fn slot_mut(&mut self, id: NodeId) -> &mut Option<Node> {
        self.nodes.get_mut(id.0).expect("node id outside book index arena")
    }
}

impl<'a> IntoIterator for &'a BookIndex {
    type Item = &'a BookRecord;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy in-order traversal over a [`BookIndex`]
///
/// Holds the left spine of the unvisited part of the tree, so memory use is
/// bounded by the tree height.
#[derive(Debug, Clone)]
pub struct InOrder<'a> {
    /// Index being walked
    index: &'a BookIndex,
    /// Nodes whose left subtree is done but which are not yet yielded
    stack: Vec<NodeId>,
    /// Records not yet yielded
    remaining: usize,
}

impl<'a> InOrder<'a> {
    /// Start a traversal positioned at the smallest title
    fn new(index: &'a BookIndex) -> Self {
        let mut iter = Self { index, stack: Vec::new(), remaining: index.len };
        iter.push_left_spine(index.root);
        iter
    }

    /// Push `current` and all of its left descendants
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.index.node(id).left;
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a BookRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let index: &'a BookIndex = self.index;
        let node = index.node(id);
        self.push_left_spine(node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for InOrder<'_> {}

impl FusedIterator for InOrder<'_> {}

#[cfg(test)]
mod tests;
