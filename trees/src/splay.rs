//! Self-adjusting binary search tree.
//!
//! Every successful `insert`, `find`, or `erase` ends by splaying the node it
//! touched to the root, via single rotations grouped into zig-zig/zig-zag
//! pairs processed from the bottom of the search path upward. Unlike a
//! re-descend-from-root-per-rotation implementation, [`SplayTree::splay_to_root`]
//! threads the whole root-to-target path through as an explicit `Vec`, so
//! each rotation addresses its nodes directly by id instead of relocating
//! them.

use crate::arena::{Arena, NodeId};
use crate::cursor::{Cursor, TreeNode};
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use tree_core::{Container, Ordered, Tree};

struct SplayNode<K> {
    key: K,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K> SplayNode<K> {
    fn new(key: K) -> Self {
        SplayNode {
            key,
            left: None,
            right: None,
        }
    }
}

impl<K> TreeNode<K> for SplayNode<K> {
    fn key(&self) -> &K {
        &self.key
    }
    fn left(&self) -> Option<NodeId> {
        self.left
    }
    fn right(&self) -> Option<NodeId> {
        self.right
    }
}

/// A self-adjusting ordered set with amortized O(log n) operations.
pub struct SplayTree<K> {
    arena: Arena<SplayNode<K>>,
    root: Option<NodeId>,
    size: usize,
}

impl<K> Default for SplayTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> SplayTree<K> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        SplayTree {
            arena: Arena::new(),
            root: None,
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.size = 0;
    }

    /// Cursor positioned at the smallest key. Does not splay.
    pub fn begin(&self) -> Cursor<'_, K, SplayNode<K>> {
        Cursor::begin(&self.arena, self.root)
    }

    /// Cursor positioned one-past-the-largest key.
    pub fn end(&self) -> Cursor<'_, K, SplayNode<K>> {
        Cursor::end(&self.arena, self.root)
    }

    pub fn cbegin(&self) -> Cursor<'_, K, SplayNode<K>> {
        self.begin()
    }

    pub fn cend(&self) -> Cursor<'_, K, SplayNode<K>> {
        self.end()
    }

    /// In-order iteration over all keys. Does not splay.
    pub fn iter(&self) -> Cursor<'_, K, SplayNode<K>> {
        self.begin()
    }

    fn set_child(&mut self, parent: Option<NodeId>, went_right: Option<bool>, child: Option<NodeId>) {
        match parent {
            None => self.root = child,
            Some(p) => {
                if went_right.expect("a non-root attach site always has a recorded direction") {
                    self.arena.get_mut(p).right = child;
                } else {
                    self.arena.get_mut(p).left = child;
                }
            }
        }
    }

    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let pivot = self.arena.get(id).right.expect("rotate_left requires a right child");
        let pivot_left = self.arena.get(pivot).left;
        self.arena.get_mut(id).right = pivot_left;
        self.arena.get_mut(pivot).left = Some(id);
        pivot
    }

    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let pivot = self.arena.get(id).left.expect("rotate_right requires a left child");
        let pivot_right = self.arena.get(pivot).right;
        self.arena.get_mut(id).left = pivot_right;
        self.arena.get_mut(pivot).right = Some(id);
        pivot
    }

    /// Splays `path.last()` to the root of the subtree `path[0]` heads,
    /// processing ancestors in zig-zig/zig-zag groups of three from the
    /// bottom up. Does not touch `self.root` — the caller attaches the
    /// returned id wherever `path[0]` used to hang.
    fn splay_to_root(&mut self, mut path: Vec<NodeId>) -> NodeId {
        while path.len() > 1 {
            let x = *path.last().unwrap();
            let p = path[path.len() - 2];
            let x_is_right = self.arena.get(p).right == Some(x);

            if path.len() == 2 {
                // zig: p is the subtree's current head, one rotation suffices.
                return if x_is_right { self.rotate_left(p) } else { self.rotate_right(p) };
            }

            let g = path[path.len() - 3];
            let p_is_right = self.arena.get(g).right == Some(p);
            let great = if path.len() >= 4 { Some(path[path.len() - 4]) } else { None };
            let g_is_right = great.map(|gg| self.arena.get(gg).right == Some(g));

            let new_top = if x_is_right == p_is_right {
                // zig-zig: two rotations in the same direction.
                if x_is_right {
                    self.rotate_left(g);
                    self.rotate_left(p)
                } else {
                    self.rotate_right(g);
                    self.rotate_right(p)
                }
            } else if x_is_right {
                // zig-zag: x is p's right child, p is g's left child.
                let t = self.rotate_left(p);
                self.arena.get_mut(g).left = Some(t);
                self.rotate_right(g)
            } else {
                let t = self.rotate_right(p);
                self.arena.get_mut(g).right = Some(t);
                self.rotate_left(g)
            };

            if let Some(gg) = great {
                self.set_child(Some(gg), g_is_right, Some(new_top));
            }
            path.truncate(path.len() - 3);
            path.push(new_top);
        }
        path[0]
    }
}

impl<K: Ord> SplayTree<K> {
    /// Root-to-match (or root-to-last-visited) path; caller checks whether
    /// the final id actually holds `key`.
    fn descend_path(&self, key: &K) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.root.expect("descend_path requires a non-empty tree");
        loop {
            path.push(current);
            let next = match key.cmp(self.arena.get(current).key()) {
                Ordering::Equal => None,
                Ordering::Less => self.arena.get(current).left,
                Ordering::Greater => self.arena.get(current).right,
            };
            match next {
                Some(id) => current = id,
                None => break,
            }
        }
        path
    }

    /// Returns a cursor to `key`, splaying it to the root if present. A
    /// failed search leaves the tree untouched — splaying a node that isn't
    /// there is a no-op, not a splay of whatever was last visited.
    pub fn find(&mut self, key: &K) -> Cursor<'_, K, SplayNode<K>> {
        if self.root.is_none() {
            return Cursor::end(&self.arena, self.root);
        }
        let path = self.descend_path(key);
        let last = *path.last().unwrap();
        if self.arena.get(last).key() != key {
            return Cursor::end(&self.arena, self.root);
        }
        let new_top = self.splay_to_root(path);
        self.root = Some(new_top);
        Cursor::positioned(&self.arena, self.root, new_top)
    }

    /// Inserts `key`, splaying the new or pre-existing node to the root.
    pub fn insert(&mut self, key: K) -> Cursor<'_, K, SplayNode<K>> {
        let Some(root_id) = self.root else {
            let id = self.arena.insert(SplayNode::new(key));
            self.root = Some(id);
            self.size += 1;
            return Cursor::positioned(&self.arena, self.root, id);
        };

        let mut path = Vec::new();
        let mut current = root_id;
        let new_id;
        loop {
            path.push(current);
            match key.cmp(self.arena.get(current).key()) {
                Ordering::Equal => {
                    let new_top = self.splay_to_root(path);
                    self.root = Some(new_top);
                    return Cursor::positioned(&self.arena, self.root, new_top);
                }
                Ordering::Less => match self.arena.get(current).left {
                    Some(next) => current = next,
                    None => {
                        new_id = self.arena.insert(SplayNode::new(key));
                        self.arena.get_mut(current).left = Some(new_id);
                        path.push(new_id);
                        break;
                    }
                },
                Ordering::Greater => match self.arena.get(current).right {
                    Some(next) => current = next,
                    None => {
                        new_id = self.arena.insert(SplayNode::new(key));
                        self.arena.get_mut(current).right = Some(new_id);
                        path.push(new_id);
                        break;
                    }
                },
            }
        }

        self.size += 1;
        let new_top = self.splay_to_root(path);
        self.root = Some(new_top);
        Cursor::positioned(&self.arena, self.root, new_id)
    }

    /// Removes `key` if present. A failed search leaves the tree untouched;
    /// otherwise splays the matched node to the root, then joins its two
    /// subtrees by splaying the left subtree's maximum up to take its place.
    pub fn erase(&mut self, key: &K) {
        if self.root.is_none() {
            return;
        }
        let path = self.descend_path(key);
        let last = *path.last().unwrap();
        if self.arena.get(last).key() != key {
            return;
        }
        let new_top = self.splay_to_root(path);
        self.root = Some(new_top);

        let target = new_top;
        let left = self.arena.get(target).left;
        let right = self.arena.get(target).right;
        self.arena.remove(target);
        self.size -= 1;

        self.root = match (left, right) {
            (None, right) => right,
            (Some(l), None) => Some(l),
            (Some(l), Some(r)) => {
                let mut max_path = vec![l];
                let mut cur = l;
                while let Some(rc) = self.arena.get(cur).right {
                    max_path.push(rc);
                    cur = rc;
                }
                let new_left_root = self.splay_to_root(max_path);
                self.arena.get_mut(new_left_root).right = Some(r);
                Some(new_left_root)
            }
        };
    }

    /// Every node's left subtree holds strictly smaller keys and its right
    /// subtree holds strictly greater keys.
    pub fn is_ordered(&self) -> bool {
        fn go<K: Ord>(arena: &Arena<SplayNode<K>>, id: Option<NodeId>) -> bool {
            let Some(id) = id else { return true };
            let node = arena.get(id);
            let left_ok = node.left.map_or(true, |l| arena.get(l).key() < &node.key);
            let right_ok = node.right.map_or(true, |r| arena.get(r).key() > &node.key);
            left_ok && right_ok && go(arena, node.left) && go(arena, node.right)
        }
        go(&self.arena, self.root)
    }
}

impl<K: Ord + Clone> Clone for SplayTree<K> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<K: Ord> FromIterator<K> for SplayTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = SplayTree::new();
        for key in iter {
            tree.insert(key);
        }
        tree
    }
}

impl<'a, K: Ord> IntoIterator for &'a SplayTree<K> {
    type Item = &'a K;
    type IntoIter = Cursor<'a, K, SplayNode<K>>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> Container for SplayTree<K> {
    fn len(&self) -> usize {
        self.size
    }
}

impl<K: Ord> Ordered<K> for SplayTree<K> {
    fn min(&self) -> Option<&K> {
        self.begin().key()
    }
    fn max(&self) -> Option<&K> {
        let mut c = self.end();
        c.retreat();
        c.key()
    }
}

impl<K: Ord> Tree<K> for SplayTree<K> {
    fn height(&self) -> usize {
        fn go<K>(arena: &Arena<SplayNode<K>>, id: Option<NodeId>) -> usize {
            match id {
                None => 0,
                Some(id) => {
                    let node = arena.get(id);
                    1 + go(arena, node.left).max(go(arena, node.right))
                }
            }
        }
        go(&self.arena, self.root)
    }

    /// A splay tree carries no structural balance invariant — rebalancing is
    /// amortized over a sequence of operations, not enforced per node — so
    /// this always holds.
    fn is_balanced(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inorder(tree: &SplayTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn find_splays_matched_node_to_root() {
        let mut t: SplayTree<i32> = (1..=7).collect();
        let c = t.find(&3);
        assert_eq!(c.key(), Some(&3));
        drop(c);
        assert_eq!(t.begin().key(), Some(&1));
        assert!(t.is_ordered());
    }

    #[test]
    fn failed_find_leaves_root_unchanged() {
        let mut t: SplayTree<i32> = [10, 5, 15].into_iter().collect();
        let root_before = t.root;
        assert!(t.find(&12).is_end());
        assert_eq!(t.root, root_before);
        assert!(t.is_ordered());
        assert_eq!(inorder(&t), vec![5, 10, 15]);
    }

    #[test]
    fn failed_erase_leaves_root_unchanged() {
        let mut t: SplayTree<i32> = [10, 5, 15].into_iter().collect();
        let root_before = t.root;
        t.erase(&12);
        assert_eq!(t.root, root_before);
        assert_eq!(t.len(), 3);
        assert!(t.is_ordered());
    }

    #[test]
    fn insert_splays_new_node_to_root() {
        let mut t = SplayTree::new();
        for k in [5, 3, 8, 1, 4] {
            let c = t.insert(k);
            assert_eq!(c.key(), Some(&k));
        }
        assert_eq!(inorder(&t), vec![1, 3, 4, 5, 8]);
        assert!(t.is_ordered());
    }

    #[test]
    fn duplicate_insert_is_a_no_op_but_still_splays() {
        let mut t: SplayTree<i32> = [5, 3, 8].into_iter().collect();
        t.insert(3);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn erase_joins_subtrees_via_predecessor_splay() {
        let mut t: SplayTree<i32> = (1..=9).collect();
        t.erase(&5);
        assert_eq!(inorder(&t), vec![1, 2, 3, 4, 6, 7, 8, 9]);
        assert_eq!(t.len(), 8);
        assert!(t.is_ordered());
    }

    #[test]
    fn erase_absent_key_is_a_no_op() {
        let mut t: SplayTree<i32> = [1, 2, 3].into_iter().collect();
        t.erase(&99);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn draining_every_key_stays_ordered_and_ends_empty() {
        let mut t: SplayTree<i32> = [5, 2, 15, 1, 3, 10, 20, 4, 6, 12, 25, 7].into_iter().collect();
        for k in [5, 6, 7, 10, 12, 15, 20, 25, 2, 3, 4, 1] {
            t.erase(&k);
            assert!(t.is_ordered());
        }
        assert!(t.is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let t: SplayTree<i32> = [1, 2, 3].into_iter().collect();
        let mut cloned = t.clone();
        cloned.insert(99);
        assert_eq!(t.len(), 3);
        assert_eq!(cloned.len(), 4);
    }

    #[test]
    fn stays_ordered_under_mixed_workload() {
        let mut rng_state: u64 = 0xdead_beef_cafe_f00d;
        let mut next = || {
            rng_state ^= rng_state << 13;
            rng_state ^= rng_state >> 7;
            rng_state ^= rng_state << 17;
            rng_state
        };
        let mut t = SplayTree::new();
        for _ in 0..5_000 {
            let key = (next() % 1_000) as i64;
            if next() % 3 == 0 {
                t.erase(&key);
            } else {
                t.insert(key);
            }
            assert!(t.is_ordered());
        }
    }

    /// Mixed insert/find/erase workload against a `BTreeSet` oracle: every
    /// single operation's in-order output must match, not just the final one.
    #[test]
    fn matches_btreeset_under_mixed_workload() {
        use alloc::collections::BTreeSet;
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5ca1ab1e_c0ffee);
        let mut t = SplayTree::new();
        let mut oracle = BTreeSet::new();
        for _ in 0..5_000 {
            let key: i32 = rng.gen_range(0..1_000);
            match rng.gen_range(0..4) {
                0 | 1 => {
                    t.insert(key);
                    oracle.insert(key);
                }
                2 => {
                    t.erase(&key);
                    oracle.remove(&key);
                }
                _ => {
                    let found = !t.find(&key).is_end();
                    assert_eq!(found, oracle.contains(&key));
                }
            }
            assert_eq!(inorder(&t), oracle.iter().copied().collect::<Vec<_>>());
        }
    }
}
