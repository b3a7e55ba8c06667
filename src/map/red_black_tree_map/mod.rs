/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::map::entry::Entry;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::Index;

/// Creates a [`RedBlackTreeMap`](crate::RedBlackTreeMap) containing the given
/// arguments:
///
/// ```
/// # use reds::*;
/// #
/// let mut m = RedBlackTreeMap::new();
/// m.insert(1, "one");
/// m.insert(2, "two");
/// m.insert(3, "three");
///
/// assert_eq!(rbt_map![1 => "one", 2 => "two", 3 => "three"], m);
/// ```
#[macro_export]
macro_rules! rbt_map {
    ($($k:expr => $v:expr),*) => {
        {
            #[allow(unused_mut)]
            let mut m = $crate::RedBlackTreeMap::new();
            $(
                m.insert($k, $v);
            )*
            m
        }
    };
}

/// A mutable ordered map.  This implementation uses a
/// [red-black tree](https://en.wikipedia.org/wiki/Red-black_tree).
///
/// # Complexity
///
/// Let *n* be the number of elements in the map.
///
/// ## Temporal complexity
///
/// | Operation         | Average   | Worst case  |
/// |:----------------- | ---------:| -----------:|
/// | `new()`           |      Θ(1) |        Θ(1) |
/// | `insert()`        | Θ(log(n)) |   Θ(log(n)) |
/// | `remove()`        | Θ(log(n)) |   Θ(log(n)) |
/// | `get()`           | Θ(log(n)) |   Θ(log(n)) |
/// | `contains_key()`  | Θ(log(n)) |   Θ(log(n)) |
/// | `size()`          |      Θ(1) |        Θ(1) |
/// | `traverse()`      |      Θ(n) |        Θ(n) |
/// | `clone()`         |      Θ(n) |        Θ(n) |
///
/// # Implementation details
///
/// This is the classic imperative red-black tree: every node carries a color
/// and links to its two children and its parent, and insertion and deletion
/// restore the red-black invariants bottom-up with the textbook case ladders
/// of local recolorings and rotations.
///
/// The links are indices into a slot arena instead of pointers, with a free
/// list threaded through the vacant slots.  This keeps the cyclic
/// parent/child graph in safe, single-owner Rust while preserving the
/// constant-time link surgery the algorithm relies on.
///
/// Removing a key whose node has two children swaps its entry with the
/// in-order predecessor and unlinks the predecessor's node instead, so an
/// entry can move between arena slots during the removal of a *different*
/// key.  Slot indices are never exposed, which makes the move unobservable
/// through the public interface.
#[derive(Clone, Debug)]
pub struct RedBlackTreeMap<K, V> {
    slots: Vec<Slot<K, V>>,
    root: Option<NodeId>,
    first_free: Option<NodeId>,
    size: usize,
}

/// Index of a slot in the arena.  Stable for the lifetime of the node that
/// occupies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: Option<NodeId> },
}

#[derive(Clone, Debug)]
struct Node<K, V> {
    entry: Entry<K, V>,
    color: Color,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K, V> RedBlackTreeMap<K, V>
where
    K: Ord,
{
    #[must_use]
    pub fn new() -> RedBlackTreeMap<K, V> {
        RedBlackTreeMap { slots: Vec::new(), root: None, first_free: None, size: 0 }
    }

    #[must_use]
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        self.lookup_node(key).map(|id| &self.node(id).entry.value)
    }

    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        let id = self.lookup_node(key)?;

        Some(&mut self.node_mut(id).entry.value)
    }

    #[must_use]
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.root.map(|root| {
            let entry = &self.node(self.minimum_node(root)).entry;
            (&entry.key, &entry.value)
        })
    }

    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.root.map(|root| {
            let entry = &self.node(self.maximum_node(root)).entry;
            (&entry.key, &entry.value)
        })
    }

    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Inserts the binding `key` ↦ `value`.  If the key is already present
    /// its value is replaced in place, without touching the tree structure.
    pub fn insert(&mut self, key: K, value: V) {
        let mut parent = None;
        let mut go_left = false;
        let mut current = self.root;

        while let Some(id) = current {
            match key.cmp(&self.node(id).entry.key) {
                Ordering::Equal => {
                    self.node_mut(id).entry.value = value;
                    return;
                }
                Ordering::Less => {
                    parent = Some(id);
                    go_left = true;
                    current = self.node(id).left;
                }
                Ordering::Greater => {
                    parent = Some(id);
                    go_left = false;
                    current = self.node(id).right;
                }
            }
        }

        // The slot is allocated before any link is touched, so the tree
        // never points at a node that failed to materialize.
        let new = self.alloc(Node {
            entry: Entry::new(key, value),
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });

        match parent {
            None => self.root = Some(new),
            Some(parent) if go_left => self.node_mut(parent).left = Some(new),
            Some(parent) => self.node_mut(parent).right = Some(new),
        }

        self.size += 1;
        self.insert_fixup(new);
    }

    /// Removes the binding for `key`, returning whether it was present.
    /// Removing an absent key is a no-op.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        let Some(mut target) = self.lookup_node(key) else {
            return false;
        };

        // A node with two children is never unlinked directly: its entry is
        // swapped with the in-order predecessor, the maximum of the left
        // subtree, and the predecessor's node, which has at most one child,
        // is unlinked instead.
        let left = self.node(target).left;
        if left.is_some() && self.node(target).right.is_some() {
            let predecessor = self.maximum_node(left.unwrap());
            self.swap_entries(target, predecessor);
            target = predecessor;
        }

        debug_assert!(self.node(target).left.is_none() || self.node(target).right.is_none());

        let child = self.node(target).right.or(self.node(target).left);

        // Unlinking a black node leaves every path through it one black
        // short.  The deficit is resolved while the node is still in place,
        // since the fix-up reasons about its position and its sibling.
        if self.node(target).color == Color::Black {
            let child_color = self.color_of(child);
            self.node_mut(target).color = child_color;
            self.delete_fixup(target);
        }

        self.replace_node(target, child);

        // The root is never red.
        if self.node(target).parent.is_none() {
            if let Some(child) = child {
                self.node_mut(child).color = Color::Black;
            }
        }

        self.free(target);
        self.size -= 1;

        true
    }

    /// Visits every binding in ascending key order.
    ///
    /// The map cannot be mutated while the traversal runs, since the walk
    /// borrows it in full.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        self.traverse_node(self.root, &mut visit);
    }

    fn traverse_node<F>(&self, node: Option<NodeId>, visit: &mut F)
    where
        F: FnMut(&K, &V),
    {
        if let Some(id) = node {
            let node = self.node(id);

            self.traverse_node(node.left, visit);
            visit(&node.entry.key, &node.entry.value);
            self.traverse_node(node.right, visit);
        }
    }

    fn lookup_node<Q: ?Sized>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord,
    {
        let mut current = self.root;

        while let Some(id) = current {
            current = match key.cmp(self.node(id).entry.key.borrow()) {
                Ordering::Equal => return Some(id),
                Ordering::Less => self.node(id).left,
                Ordering::Greater => self.node(id).right,
            };
        }

        None
    }

    fn minimum_node(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }

        id
    }

    fn maximum_node(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }

        id
    }

    fn node(&self, id: NodeId) -> &Node<K, V> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("live node id points at a vacant slot"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("live node id points at a vacant slot"),
        }
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.first_free {
            Some(id) => {
                let next_free = match &self.slots[id.0] {
                    Slot::Vacant { next_free } => *next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                };

                self.first_free = next_free;
                self.slots[id.0] = Slot::Occupied(node);

                id
            }
            None => {
                let id = NodeId(self.slots.len());

                self.slots.push(Slot::Occupied(node));

                id
            }
        }
    }

    fn free(&mut self, id: NodeId) {
        self.slots[id.0] = Slot::Vacant { next_free: self.first_free };
        self.first_free = Some(id);
    }

    /// Color of an optionally absent node.  Absent children are black.
    fn color_of(&self, node: Option<NodeId>) -> Color {
        node.map_or(Color::Black, |id| self.node(id).color)
    }

    fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;

        if self.node(parent).left == Some(id) {
            self.node(parent).right
        } else {
            self.node(parent).left
        }
    }

    /// Swaps the entries of two distinct nodes.  Links and colors stay where
    /// they are.
    fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        debug_assert_ne!(a, b);

        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.slots.split_at_mut(high);

        let (Slot::Occupied(low_node), Slot::Occupied(high_node)) = (&mut head[low], &mut tail[0])
        else {
            unreachable!("live node id points at a vacant slot");
        };

        mem::swap(&mut low_node.entry, &mut high_node.entry);
    }

    /// Replaces the subtree rooted at `old` with the one rooted at `new` in
    /// the parent link of `old`.  The children of `old` are left untouched.
    fn replace_node(&mut self, old: NodeId, new: Option<NodeId>) {
        let parent = self.node(old).parent;

        match parent {
            None => self.root = new,
            Some(parent) => {
                if self.node(parent).left == Some(old) {
                    self.node_mut(parent).left = new;
                } else {
                    self.node_mut(parent).right = new;
                }
            }
        }

        if let Some(new) = new {
            self.node_mut(new).parent = parent;
        }
    }

    /// Pivots `id` with its right child:
    ///
    /// ```text
    ///     id                r
    ///    /  \              / \
    ///   a    r     =>    id   c
    ///       / \         /  \
    ///      b   c       a    b
    /// ```
    ///
    /// Rotations never change colors; recoloring is the fix-ups' concern.
    fn rotate_left(&mut self, id: NodeId) {
        let right = self.node(id).right.unwrap();

        self.replace_node(id, Some(right));

        let right_left = self.node(right).left;
        self.node_mut(id).right = right_left;
        if let Some(right_left) = right_left {
            self.node_mut(right_left).parent = Some(id);
        }

        self.node_mut(right).left = Some(id);
        self.node_mut(id).parent = Some(right);
    }

    /// Mirror image of [`rotate_left`](RedBlackTreeMap::rotate_left).
    fn rotate_right(&mut self, id: NodeId) {
        let left = self.node(id).left.unwrap();

        self.replace_node(id, Some(left));

        let left_right = self.node(left).right;
        self.node_mut(id).left = left_right;
        if let Some(left_right) = left_right {
            self.node_mut(left_right).parent = Some(id);
        }

        self.node_mut(left).right = Some(id);
        self.node_mut(id).parent = Some(left);
    }

    /// Restores the red-black invariants after `id` was inserted as a red
    /// leaf.  Walks upward from the inserted node; every round either
    /// terminates or moves the violation two levels up.
    fn insert_fixup(&mut self, mut id: NodeId) {
        loop {
            // Case 1: the node is the root.
            let Some(parent) = self.node(id).parent else {
                self.node_mut(id).color = Color::Black;
                return;
            };

            // Case 2: a black parent cannot be part of a red-red violation.
            if self.node(parent).color == Color::Black {
                return;
            }

            // The parent is red, so it is not the root and a grandparent
            // exists.
            let grandparent = self.node(parent).parent.unwrap();
            let uncle = self.sibling(parent);

            // Case 3: parent and uncle both red.  Recolor them black and the
            // grandparent red, then restart with the grandparent, which may
            // now conflict with *its* parent.
            if self.color_of(uncle) == Color::Red {
                self.node_mut(parent).color = Color::Black;
                self.node_mut(uncle.unwrap()).color = Color::Black;
                self.node_mut(grandparent).color = Color::Red;
                id = grandparent;
                continue;
            }

            // Case 4: node and parent form a zig-zag.  Rotate at the parent
            // to straighten the line; the old parent becomes the bottom node
            // of the line and the fix-up continues from there.
            if Some(id) == self.node(parent).right && Some(parent) == self.node(grandparent).left {
                self.rotate_left(parent);
                id = parent;
            } else if Some(id) == self.node(parent).left
                && Some(parent) == self.node(grandparent).right
            {
                self.rotate_right(parent);
                id = parent;
            }

            // Case 5: straight line.  Rotating at the grandparent, against
            // the direction of the line, makes the parent the subtree root
            // with one red node on each side.
            let parent = self.node(id).parent.unwrap();
            let grandparent = self.node(parent).parent.unwrap();

            self.node_mut(parent).color = Color::Black;
            self.node_mut(grandparent).color = Color::Red;

            if Some(id) == self.node(parent).left && Some(parent) == self.node(grandparent).left {
                self.rotate_right(grandparent);
            } else {
                debug_assert!(
                    Some(id) == self.node(parent).right
                        && Some(parent) == self.node(grandparent).right
                );
                self.rotate_left(grandparent);
            }

            return;
        }
    }

    /// Restores the red-black invariants before a black node is spliced out.
    /// `id` is the node about to be removed, still linked in place; the
    /// missing black is absorbed locally or pushed one level up per round.
    fn delete_fixup(&mut self, mut id: NodeId) {
        loop {
            // Case 1: the deficit reached the root, where it vanishes.
            let Some(parent) = self.node(id).parent else {
                return;
            };

            // Case 2: red sibling.  Rotate it above the parent so the
            // remaining cases see a black sibling.
            if self.color_of(self.sibling(id)) == Color::Red {
                let sibling = self.sibling(id).unwrap();

                self.node_mut(parent).color = Color::Red;
                self.node_mut(sibling).color = Color::Black;

                if Some(id) == self.node(parent).left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
            }

            let sibling = self.sibling(id).unwrap();
            let sibling_left = self.node(sibling).left;
            let sibling_right = self.node(sibling).right;

            // Case 3: parent, sibling and the sibling's children all black.
            // Recoloring the sibling red removes one black from its side,
            // which pushes the deficit up to the parent.
            if self.node(parent).color == Color::Black
                && self.node(sibling).color == Color::Black
                && self.color_of(sibling_left) == Color::Black
                && self.color_of(sibling_right) == Color::Black
            {
                self.node_mut(sibling).color = Color::Red;
                id = parent;
                continue;
            }

            // Case 4: red parent, black sibling with black children.
            // Trading the colors of parent and sibling settles the deficit.
            if self.node(parent).color == Color::Red
                && self.node(sibling).color == Color::Black
                && self.color_of(sibling_left) == Color::Black
                && self.color_of(sibling_right) == Color::Black
            {
                self.node_mut(sibling).color = Color::Red;
                self.node_mut(parent).color = Color::Black;
                return;
            }

            // Case 5: black sibling whose red child is on the near side.
            // Rotate at the sibling to move the red child to the far side,
            // which is the configuration case 6 resolves.
            if Some(id) == self.node(parent).left
                && self.node(sibling).color == Color::Black
                && self.color_of(sibling_left) == Color::Red
                && self.color_of(sibling_right) == Color::Black
            {
                self.node_mut(sibling).color = Color::Red;
                self.node_mut(sibling_left.unwrap()).color = Color::Black;
                self.rotate_right(sibling);
            } else if Some(id) == self.node(parent).right
                && self.node(sibling).color == Color::Black
                && self.color_of(sibling_right) == Color::Red
                && self.color_of(sibling_left) == Color::Black
            {
                self.node_mut(sibling).color = Color::Red;
                self.node_mut(sibling_right.unwrap()).color = Color::Black;
                self.rotate_left(sibling);
            }

            // Case 6: black sibling with a red child on the far side.  The
            // sibling takes the parent's color and moves up; the far child
            // turns black, paying the missing black on the deficit side.
            let sibling = self.sibling(id).unwrap();
            let parent_color = self.node(parent).color;

            self.node_mut(sibling).color = parent_color;
            self.node_mut(parent).color = Color::Black;

            if Some(id) == self.node(parent).left {
                let far = self.node(sibling).right;
                debug_assert_eq!(self.color_of(far), Color::Red);
                self.node_mut(far.unwrap()).color = Color::Black;
                self.rotate_left(parent);
            } else {
                let far = self.node(sibling).left;
                debug_assert_eq!(self.color_of(far), Color::Red);
                self.node_mut(far.unwrap()).color = Color::Black;
                self.rotate_right(parent);
            }

            return;
        }
    }
}

impl<'a, K, Q: ?Sized, V> Index<&'a Q> for RedBlackTreeMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V> Default for RedBlackTreeMap<K, V>
where
    K: Ord,
{
    fn default() -> RedBlackTreeMap<K, V> {
        RedBlackTreeMap::new()
    }
}

impl<K, V: PartialEq> PartialEq for RedBlackTreeMap<K, V>
where
    K: Ord,
{
    fn eq(&self, other: &RedBlackTreeMap<K, V>) -> bool {
        if self.size() != other.size() {
            return false;
        }

        let mut equal = true;

        self.traverse(|key, value| {
            equal = equal && other.get(key).map_or(false, |v| *value == *v);
        });

        equal
    }
}

impl<K, V: Eq> Eq for RedBlackTreeMap<K, V> where K: Ord {}

impl<K, V: Hash> Hash for RedBlackTreeMap<K, V>
where
    K: Ord + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Add the hash of length so that if two collections are added one
        // after the other it doesn't hash to the same thing as a single
        // collection with the same elements in the same order.
        self.size().hash(state);

        self.traverse(|key, value| {
            key.hash(state);
            value.hash(state);
        });
    }
}

impl<K, V> Display for RedBlackTreeMap<K, V>
where
    K: Ord + Display,
    V: Display,
{
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        let mut result = Ok(());

        fmt.write_str("{")?;

        self.traverse(|key, value| {
            if result.is_err() {
                return;
            }

            if !first {
                result = fmt.write_str(", ");
            }
            first = false;

            result = result
                .and_then(|()| key.fmt(fmt))
                .and_then(|()| fmt.write_str(": "))
                .and_then(|()| value.fmt(fmt));
        });

        result?;

        fmt.write_str("}")
    }
}

impl<K, V> FromIterator<(K, V)> for RedBlackTreeMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(into_iter: I) -> RedBlackTreeMap<K, V> {
        let mut map = RedBlackTreeMap::new();

        for (k, v) in into_iter {
            map.insert(k, v);
        }

        map
    }
}
