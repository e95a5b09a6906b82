//! The white/grey/black balanced search tree.
//!
//! The tree is wide: each node holds a sorted run of up to eleven entries,
//! and a branch node with `n` entries has `n + 1` children, each covering the
//! keys strictly between the two entries around it. Every leaf sits at the
//! same depth, so the depth grows with the logarithm base six of the number
//! of entries.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]; the parent
//! link is a plain index used to walk back up after a mutation, so the tree
//! has no reference cycles and no shared ownership.
//!
//! Every node carries a [`Marker`] describing how full it is. Placing an
//! entry into a grey node splits it and pushes its middle entry into the
//! parent. A non-root node that turns white after a removal takes an entry
//! from a sibling through the parent (a rotation) or merges with it.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use crate::entry::OrderedEntry;
use crate::query::{Order, Query};
use crate::queryable_map::QueryableMap;
use crate::wgb_iter::WgbRange;
use crate::Error;

const NAME: &str = "wgb";

/// Most entries a node holds.
pub(crate) const CAPACITY: usize = 11;

/// Fewest entries a non-root node holds once a mutation has completed.
pub(crate) const MIN_LEN: usize = CAPACITY / 2;

/// Occupancy marker of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Under-weighted: fewer than five entries. Only the root may stay white.
    White,
    /// Full. The next entry placed here splits the node in two.
    Grey,
    /// Between five and ten entries
    Black,
}

impl Marker {
    /// Marker of a node holding `len` entries.
    pub fn for_len(len: usize) -> Self {
        if len < MIN_LEN {
            Marker::White
        } else if len < CAPACITY {
            Marker::Black
        } else {
            Marker::Grey
        }
    }
}

/// Index of a node inside the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    pub entries: Vec<(K, V)>,
    /// Empty for leaves, one more than `entries` for branch nodes
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub marker: Marker,
}

impl<K, V> Node<K, V> {
    fn new(entries: Vec<(K, V)>, children: Vec<NodeId>, parent: Option<NodeId>) -> Self {
        Node {
            marker: Marker::for_len(entries.len()),
            entries,
            children,
            parent,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn settle(&mut self) {
        self.marker = Marker::for_len(self.entries.len());
    }

    fn can_lend(&self) -> bool {
        self.entries.len() > MIN_LEN
    }
}

/// Slot storage for tree nodes. Released slots are reused by later splits.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
}

impl<K, V> Arena<K, V> {
    fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<K, V> {
        match self.slots[id.0].take() {
            Some(node) => {
                self.free.push(id.0);
                node
            }
            None => panic!("tree node {} released twice", id.0),
        }
    }

    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn iter(&self) -> impl Iterator<Item = &Node<K, V>> {
        self.slots.iter().flatten()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Node<K, V> {
        match &self.slots[id.0] {
            Some(node) => node,
            None => panic!("tree node {} is not live", id.0),
        }
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match &mut self.slots[id.0] {
            Some(node) => node,
            None => panic!("tree node {} is not live", id.0),
        }
    }
}

/// A self-balancing search tree with lazy range queries.
///
/// Keys are unique; setting an existing key replaces its value in place.
///
/// # Examples
///
/// ```
/// use queryable_map::{QueryableMap, WhiteGreyBlackTree};
///
/// let mut tree = WhiteGreyBlackTree::new();
/// tree.set(3, "three");
/// tree.set(1, "one");
/// tree.set(2, "two");
///
/// let values: Vec<_> = tree.asc().map(|e| *e.value()).collect();
/// assert_eq!(values, vec!["one", "two", "three"]);
///
/// assert_eq!(tree.remove(&2), Some("two"));
/// assert_eq!(tree.remove(&2), None);
/// ```
#[derive(Clone)]
pub struct WhiteGreyBlackTree<K, V> {
    pub(crate) arena: Arena<K, V>,
    pub(crate) root: Option<NodeId>,
    pub(crate) len: usize,
}

impl<K, V> WhiteGreyBlackTree<K, V> {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        WhiteGreyBlackTree {
            arena: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates an empty tree with node slots for about `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        WhiteGreyBlackTree {
            arena: Arena::with_capacity(capacity / MIN_LEN + 1),
            root: None,
            len: 0,
        }
    }

    /// Marker of the root node, if any.
    pub fn root_marker(&self) -> Option<Marker> {
        self.root.map(|id| self.arena[id].marker)
    }

    /// Number of child positions left unused in branch nodes.
    ///
    /// A branch node has room for twelve children; leaves have no child
    /// positions at all.
    pub fn empty_node_count(&self) -> usize {
        self.arena
            .iter()
            .filter(|node| !node.is_leaf())
            .map(|node| CAPACITY + 1 - node.children.len())
            .sum()
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(&last) = self.arena[id].children.last() {
            id = last;
        }
        id
    }

    fn child_index(&self, parent: NodeId, child: NodeId) -> usize {
        match self.arena[parent].children.iter().position(|&c| c == child) {
            Some(index) => index,
            None => panic!("tree node {} is not a child of {}", child.0, parent.0),
        }
    }

    // Points the children of `id` from position `from` on back at `id`.
    fn adopt(&mut self, id: NodeId, from: usize) {
        for index in from..self.arena[id].children.len() {
            let child = self.arena[id].children[index];
            self.arena[child].parent = Some(id);
        }
    }

    /// Puts `entry` at `pos` of node `id`, with `right` as the subtree just
    /// after it. A node that was grey overflows and splits, and its middle
    /// entry moves on into the parent.
    fn place(&mut self, mut id: NodeId, mut pos: usize, mut entry: (K, V), mut right: Option<NodeId>) {
        loop {
            let was_full = self.arena[id].marker == Marker::Grey;
            let node = &mut self.arena[id];
            node.entries.insert(pos, entry);
            if let Some(r) = right {
                node.children.insert(pos + 1, r);
                self.arena[r].parent = Some(id);
            }
            if !was_full {
                self.arena[id].settle();
                return;
            }

            let (middle, sibling) = self.split(id);
            match self.arena[id].parent {
                Some(parent) => {
                    pos = self.child_index(parent, id);
                    id = parent;
                    entry = middle;
                    right = Some(sibling);
                }
                None => {
                    let root = self.arena.alloc(Node::new(vec![middle], vec![id, sibling], None));
                    self.arena[id].parent = Some(root);
                    self.arena[sibling].parent = Some(root);
                    self.root = Some(root);
                    trace!(root = root.0, "wgb grows a level");
                    return;
                }
            }
        }
    }

    // Moves the upper half of an overflowing node into a new sibling and
    // returns the middle entry that separates the two.
    fn split(&mut self, id: NodeId) -> ((K, V), NodeId) {
        let node = &mut self.arena[id];
        let upper = node.entries.split_off(MIN_LEN + 1);
        let middle = node.entries.remove(MIN_LEN);
        let upper_children = if node.is_leaf() {
            Vec::new()
        } else {
            node.children.split_off(MIN_LEN + 1)
        };
        let parent = node.parent;
        node.settle();

        let sibling = self.arena.alloc(Node::new(upper, upper_children, parent));
        self.adopt(sibling, 0);
        trace!(node = id.0, sibling = sibling.0, "wgb split");
        (middle, sibling)
    }

    // Walks up from `id` while nodes turn white.
    fn refill(&mut self, mut id: NodeId) {
        loop {
            self.arena[id].settle();
            if self.arena[id].marker != Marker::White {
                return;
            }
            let parent = match self.arena[id].parent {
                Some(parent) => parent,
                None => {
                    self.shrink_root(id);
                    return;
                }
            };

            let index = self.child_index(parent, id);
            let siblings = &self.arena[parent].children;
            let left = index.checked_sub(1).map(|i| siblings[i]);
            let right = siblings.get(index + 1).copied();

            if left.map_or(false, |s| self.arena[s].can_lend()) {
                self.rotate_right(parent, index - 1);
                return;
            }
            if right.map_or(false, |s| self.arena[s].can_lend()) {
                self.rotate_left(parent, index);
                return;
            }
            self.merge(parent, if left.is_some() { index - 1 } else { index });
            id = parent;
        }
    }

    // Moves the last entry of the child left of `separator` up into the
    // parent and the separator down to the front of the child on its right.
    fn rotate_right(&mut self, parent: NodeId, separator: usize) {
        let left = self.arena[parent].children[separator];
        let right = self.arena[parent].children[separator + 1];

        let node = &mut self.arena[left];
        let lent = match node.entries.pop() {
            Some(entry) => entry,
            None => panic!("tree node {} has no entry to lend", left.0),
        };
        let child = node.children.pop();
        node.settle();

        let down = mem::replace(&mut self.arena[parent].entries[separator], lent);
        let node = &mut self.arena[right];
        node.entries.insert(0, down);
        if let Some(c) = child {
            node.children.insert(0, c);
            self.arena[c].parent = Some(right);
        }
        self.arena[right].settle();

        trace!(pivot = parent.0, "wgb rotate right");
    }

    // Mirror of `rotate_right`: the child right of `separator` lends its
    // first entry to the child on its left.
    fn rotate_left(&mut self, parent: NodeId, separator: usize) {
        let left = self.arena[parent].children[separator];
        let right = self.arena[parent].children[separator + 1];

        let node = &mut self.arena[right];
        let lent = node.entries.remove(0);
        let child = if node.is_leaf() {
            None
        } else {
            Some(node.children.remove(0))
        };
        node.settle();

        let down = mem::replace(&mut self.arena[parent].entries[separator], lent);
        let node = &mut self.arena[left];
        node.entries.push(down);
        if let Some(c) = child {
            node.children.push(c);
            self.arena[c].parent = Some(left);
        }
        self.arena[left].settle();

        trace!(pivot = parent.0, "wgb rotate left");
    }

    // Folds the separator and the child right of it into the child on its left.
    fn merge(&mut self, parent: NodeId, separator: usize) {
        let node = &mut self.arena[parent];
        let down = node.entries.remove(separator);
        let right = node.children.remove(separator + 1);
        let left = node.children[separator];

        let absorbed = self.arena.release(right);
        let node = &mut self.arena[left];
        let first_moved = node.children.len();
        node.entries.push(down);
        node.entries.extend(absorbed.entries);
        node.children.extend(absorbed.children);
        node.settle();
        self.adopt(left, first_moved);

        trace!(node = left.0, released = right.0, "wgb merge");
    }

    // An emptied root hands its place to its only child, if it has one.
    fn shrink_root(&mut self, root: NodeId) {
        if !self.arena[root].entries.is_empty() {
            return;
        }
        let node = self.arena.release(root);
        self.root = node.children.first().copied();
        if let Some(child) = self.root {
            self.arena[child].parent = None;
            trace!(root = child.0, "wgb loses a level");
        }
    }
}

impl<K: Ord, V> WhiteGreyBlackTree<K, V> {
    // Locates `key`, or else the leaf position where it belongs. `None` for
    // an empty tree.
    fn search(&self, key: &K) -> Option<Result<(NodeId, usize), (NodeId, usize)>> {
        let mut id = self.root?;
        loop {
            let node = &self.arena[id];
            match node.entries.binary_search_by(|(k, _)| k.cmp(key)) {
                Ok(pos) => return Some(Ok((id, pos))),
                Err(pos) => match node.children.get(pos) {
                    Some(&child) => id = child,
                    None => return Some(Err((id, pos))),
                },
            }
        }
    }

    fn find(&self, key: &K) -> Option<&(K, V)> {
        let (id, pos) = self.search(key)?.ok()?;
        Some(&self.arena[id].entries[pos])
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Some(Ok((id, pos))) => {
                return Some(mem::replace(&mut self.arena[id].entries[pos].1, value));
            }
            Some(Err((leaf, pos))) => self.place(leaf, pos, (key, value), None),
            None => {
                let root = self.arena.alloc(Node::new(vec![(key, value)], Vec::new(), None));
                self.root = Some(root);
            }
        }
        self.len += 1;
        None
    }

    /// Removes `key` from the tree, returning its value.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let (id, pos) = self.search(key)?.ok()?;

        // A branch entry trades places with its in-order predecessor, which
        // always ends a leaf.
        let (removed, thinned) = if self.arena[id].is_leaf() {
            (self.arena[id].entries.remove(pos), id)
        } else {
            let leaf = self.rightmost(self.arena[id].children[pos]);
            let predecessor = match self.arena[leaf].entries.pop() {
                Some(entry) => entry,
                None => panic!("tree leaf {} holds no entries", leaf.0),
            };
            (mem::replace(&mut self.arena[id].entries[pos], predecessor), leaf)
        };
        self.len -= 1;
        self.refill(thinned);
        Some(removed.1)
    }

    /// Checks every structural invariant of the tree.
    ///
    /// Verifies search order, parent/child link consistency, node occupancy
    /// and markers, that all leaves share one depth, and the entry and node
    /// counts.
    pub fn validate(&self) -> Result<(), Error> {
        let mut walk = Walk::default();
        if let Some(root) = self.root {
            let node = &self.arena[root];
            if node.parent.is_some() {
                return Err(Error::broken(NAME, "root has a parent"));
            }
            if node.entries.is_empty() {
                return Err(Error::broken(NAME, "root holds no entries"));
            }
            self.validate_node(root, None, None, 0, &mut walk)?;
        }
        if walk.entries != self.len {
            return Err(Error::broken(
                NAME,
                format!("{} reachable entries but len is {}", walk.entries, self.len),
            ));
        }
        if walk.nodes != self.arena.live() {
            return Err(Error::broken(
                NAME,
                format!("{} reachable nodes but {} live slots", walk.nodes, self.arena.live()),
            ));
        }
        Ok(())
    }

    fn validate_node(
        &self,
        id: NodeId,
        low: Option<&K>,
        high: Option<&K>,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<(), Error> {
        let node = &self.arena[id];
        let len = node.entries.len();
        walk.nodes += 1;
        walk.entries += len;

        if len > CAPACITY || (node.parent.is_some() && len < MIN_LEN) {
            return Err(Error::broken(NAME, format!("node {} holds {} entries", id.0, len)));
        }
        if node.marker != Marker::for_len(len) {
            return Err(Error::broken(
                NAME,
                format!("node {} is marked {:?} but holds {} entries", id.0, node.marker, len),
            ));
        }

        let mut previous = low;
        for (key, _) in &node.entries {
            if previous.map_or(false, |p| key <= p) || high.map_or(false, |h| key >= h) {
                return Err(Error::broken(NAME, format!("node {} is out of order", id.0)));
            }
            previous = Some(key);
        }

        if node.is_leaf() {
            return match walk.leaf_depth {
                Some(d) if d != depth => Err(Error::broken(
                    NAME,
                    format!("leaves at depths {} and {}", d, depth),
                )),
                _ => {
                    walk.leaf_depth = Some(depth);
                    Ok(())
                }
            };
        }

        if node.children.len() != len + 1 {
            return Err(Error::broken(
                NAME,
                format!("node {} has {} entries but {} children", id.0, len, node.children.len()),
            ));
        }
        for (index, &child) in node.children.iter().enumerate() {
            if self.arena[child].parent != Some(id) {
                return Err(Error::broken(
                    NAME,
                    format!("node {} does not point back to parent {}", child.0, id.0),
                ));
            }
            let low = match index {
                0 => low,
                _ => Some(&node.entries[index - 1].0),
            };
            let high = node.entries.get(index).map(|(k, _)| k).or(high);
            self.validate_node(child, low, high, depth + 1, walk)?;
        }
        Ok(())
    }
}

// Totals gathered by `validate`.
#[derive(Default)]
struct Walk {
    entries: usize,
    nodes: usize,
    leaf_depth: Option<usize>,
}

impl<K, V> QueryableMap<K, V> for WhiteGreyBlackTree<K, V>
where
    K: Ord + Clone,
{
    type Range<'a>
        = WgbRange<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn set(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|(_, value)| value)
    }

    fn get_entry(&self, key: &K) -> Option<OrderedEntry<'_, K, V>> {
        self.find(key).map(|(key, value)| OrderedEntry::new(key, value))
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.delete(key)
    }

    fn clear(&mut self) {
        trace!(entries = self.len, "wgb clear");
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }

    fn range(&self, query: Query<K>, order: Order) -> WgbRange<'_, K, V> {
        WgbRange::new(self, query, order)
    }

    /// Edge count from the root to the leaves, which all sit at one depth.
    fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.root;
        while let Some(&first) = current.and_then(|id| self.arena[id].children.first()) {
            depth += 1;
            current = Some(first);
        }
        depth
    }

    fn node_count(&self) -> usize {
        self.arena.live()
    }

    fn name(&self) -> &'static str {
        NAME
    }
}

impl<K, V> Default for WhiteGreyBlackTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for WhiteGreyBlackTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for WhiteGreyBlackTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = WhiteGreyBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V> PartialEq for WhiteGreyBlackTree<K, V>
where
    K: Ord + Clone,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .asc()
                .zip(other.asc())
                .all(|(a, b)| a.key() == b.key() && a.value() == b.value())
    }
}

impl<K, V> fmt::Debug for WhiteGreyBlackTree<K, V>
where
    K: Ord + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.asc().map(OrderedEntry::into_pair)).finish()
    }
}
