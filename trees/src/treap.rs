//! Randomized binary search tree (treap / Cartesian tree).
//!
//! Every node additionally carries a random `priority`; the tree is kept a
//! max-heap over priorities while remaining a BST over keys, which holds it
//! balanced in expectation without any rotation bookkeeping. Insertion and
//! deletion are expressed entirely in terms of [`Treap::split`] and
//! [`Treap::merge`] rather than rotations.

use crate::arena::{Arena, NodeId};
use crate::cursor::{Cursor, TreeNode};
use core::cmp::Ordering;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tree_core::{Container, Ordered, Tree};

struct TreapNode<K> {
    key: K,
    priority: i64,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K> TreapNode<K> {
    fn new(key: K, priority: i64) -> Self {
        TreapNode {
            key,
            priority,
            left: None,
            right: None,
        }
    }
}

impl<K> TreeNode<K> for TreapNode<K> {
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

/// A randomized ordered set, balanced in expectation via a heap over
/// per-node random priorities.
pub struct Treap<K> {
    arena: Arena<TreapNode<K>>,
    root: Option<NodeId>,
    size: usize,
    rng: StdRng,
}

impl<K> Treap<K> {
    /// Creates an empty treap seeded from OS entropy.
    pub fn new() -> Self {
        Treap {
            arena: Arena::new(),
            root: None,
            size: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an empty treap with a fixed seed, for reproducible shapes in
    /// tests and benchmarks.
    pub fn with_seed(seed: u64) -> Self {
        Treap {
            arena: Arena::new(),
            root: None,
            size: 0,
            rng: StdRng::seed_from_u64(seed),
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

    pub fn begin(&self) -> Cursor<'_, K, TreapNode<K>> {
        Cursor::begin(&self.arena, self.root)
    }

    pub fn end(&self) -> Cursor<'_, K, TreapNode<K>> {
        Cursor::end(&self.arena, self.root)
    }

    pub fn cbegin(&self) -> Cursor<'_, K, TreapNode<K>> {
        self.begin()
    }

    pub fn cend(&self) -> Cursor<'_, K, TreapNode<K>> {
        self.end()
    }

    pub fn iter(&self) -> Cursor<'_, K, TreapNode<K>> {
        self.begin()
    }
}

impl<K> Default for Treap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Treap<K> {
    /// Splits the subtree at `id` into `(L, R)` with every key in `L`
    /// strictly less than `key` and every key in `R` greater than or equal
    /// to it. If `key` is present, it ends up as `R`'s root — by induction:
    /// the recursive call that reaches it takes the `>=` branch and returns
    /// immediately with itself untouched as the new `R`.
    fn split(&mut self, id: Option<NodeId>, key: &K) -> (Option<NodeId>, Option<NodeId>) {
        let Some(id) = id else { return (None, None) };
        if self.arena.get(id).key() < key {
            let right = self.arena.get(id).right;
            let (l, r) = self.split(right, key);
            self.arena.get_mut(id).right = l;
            (Some(id), r)
        } else {
            let left = self.arena.get(id).left;
            let (l, r) = self.split(left, key);
            self.arena.get_mut(id).left = r;
            (l, Some(id))
        }
    }

    /// Merges two subtrees known to be key-disjoint and key-ordered (every
    /// key in `a` less than every key in `b`), restoring the heap property
    /// by always descending into whichever side has the lower priority at
    /// its root.
    fn merge(&mut self, a: Option<NodeId>, b: Option<NodeId>) -> Option<NodeId> {
        match (a, b) {
            (None, b) => b,
            (a, None) => a,
            (Some(a_id), Some(b_id)) => {
                if self.arena.get(a_id).priority >= self.arena.get(b_id).priority {
                    let a_right = self.arena.get(a_id).right;
                    let merged = self.merge(a_right, Some(b_id));
                    self.arena.get_mut(a_id).right = merged;
                    Some(a_id)
                } else {
                    let b_left = self.arena.get(b_id).left;
                    let merged = self.merge(Some(a_id), b_left);
                    self.arena.get_mut(b_id).left = merged;
                    Some(b_id)
                }
            }
        }
    }

    /// Returns a cursor to the matching node, or `end()` if absent.
    pub fn find(&self, key: &K) -> Cursor<'_, K, TreapNode<K>> {
        let mut current = self.root;
        while let Some(id) = current {
            match key.cmp(self.arena.get(id).key()) {
                Ordering::Equal => return Cursor::positioned(&self.arena, self.root, id),
                Ordering::Less => current = self.arena.get(id).left,
                Ordering::Greater => current = self.arena.get(id).right,
            }
        }
        Cursor::end(&self.arena, self.root)
    }

    /// Inserts `key` at a freshly drawn random priority, splitting on `key`
    /// and merging the new node back between the two halves.
    pub fn insert(&mut self, key: K) -> Cursor<'_, K, TreapNode<K>> {
        let (l, r) = self.split(self.root, &key);
        if let Some(r_id) = r {
            if self.arena.get(r_id).key() == &key {
                self.root = self.merge(l, Some(r_id));
                return Cursor::positioned(&self.arena, self.root, r_id);
            }
        }
        let priority: i64 = self.rng.gen();
        let new_id = self.arena.insert(TreapNode::new(key, priority));
        let left_half = self.merge(l, Some(new_id));
        self.root = self.merge(left_half, r);
        self.size += 1;
        Cursor::positioned(&self.arena, self.root, new_id)
    }

    /// Removes `key` if present, by splitting it off as `R`'s root and
    /// merging its two neighbors back together.
    pub fn erase(&mut self, key: &K) {
        let (l, r) = self.split(self.root, key);
        match r {
            None => self.root = l,
            Some(r_id) => {
                if self.arena.get(r_id).key() == key {
                    let r_right = self.arena.get(r_id).right;
                    self.arena.remove(r_id);
                    self.size -= 1;
                    self.root = self.merge(l, r_right);
                } else {
                    self.root = self.merge(l, Some(r_id));
                }
            }
        }
    }

    /// Every node's left subtree holds strictly smaller keys and its right
    /// subtree holds strictly greater keys.
    pub fn is_ordered(&self) -> bool {
        fn go<K: Ord>(arena: &Arena<TreapNode<K>>, id: Option<NodeId>) -> bool {
            let Some(id) = id else { return true };
            let node = arena.get(id);
            let left_ok = node.left.map_or(true, |l| arena.get(l).key() < &node.key);
            let right_ok = node.right.map_or(true, |r| arena.get(r).key() > &node.key);
            left_ok && right_ok && go(arena, node.left) && go(arena, node.right)
        }
        go(&self.arena, self.root)
    }

    /// Every node's priority is greater than or equal to both children's.
    pub fn is_heap(&self) -> bool {
        fn go<K>(arena: &Arena<TreapNode<K>>, id: Option<NodeId>) -> bool {
            let Some(id) = id else { return true };
            let node = arena.get(id);
            let left_ok = node.left.map_or(true, |l| arena.get(l).priority <= node.priority);
            let right_ok = node.right.map_or(true, |r| arena.get(r).priority <= node.priority);
            left_ok && right_ok && go(arena, node.left) && go(arena, node.right)
        }
        go(&self.arena, self.root)
    }

    /// Ordered as a BST and heap-ordered on priority, simultaneously.
    pub fn is_cartesian(&self) -> bool {
        self.is_ordered() && self.is_heap()
    }
}

impl<K: Ord + Clone> Clone for Treap<K> {
    fn clone(&self) -> Self {
        let mut cloned = Treap::with_seed(0);
        for key in self.iter().cloned() {
            cloned.insert(key);
        }
        cloned
    }
}

impl<K: Ord> FromIterator<K> for Treap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut treap = Treap::new();
        for key in iter {
            treap.insert(key);
        }
        treap
    }
}

impl<'a, K: Ord> IntoIterator for &'a Treap<K> {
    type Item = &'a K;
    type IntoIter = Cursor<'a, K, TreapNode<K>>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> Container for Treap<K> {
    fn len(&self) -> usize {
        self.size
    }
}

impl<K: Ord> Ordered<K> for Treap<K> {
    fn min(&self) -> Option<&K> {
        self.begin().key()
    }
    fn max(&self) -> Option<&K> {
        let mut c = self.end();
        c.retreat();
        c.key()
    }
}

impl<K: Ord> Tree<K> for Treap<K> {
    fn height(&self) -> usize {
        fn go<K>(arena: &Arena<TreapNode<K>>, id: Option<NodeId>) -> usize {
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

    /// A treap's balance is probabilistic, not structural; this reports the
    /// expected-case bound rather than a per-node invariant.
    fn is_balanced(&self) -> bool {
        let n = self.size as f64;
        if n <= 2.0 {
            return true;
        }
        (self.height() as f64) <= 6.0 * (n + 1.0).log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inorder(treap: &Treap<i32>) -> Vec<i32> {
        treap.iter().copied().collect()
    }

    #[test]
    fn insert_keeps_cartesian_property() {
        let mut t = Treap::with_seed(42);
        for k in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
            t.insert(k);
        }
        assert!(t.is_cartesian());
        assert_eq!(inorder(&t), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn duplicate_insert_preserves_node_identity() {
        let mut t = Treap::with_seed(7);
        let first = t.insert(5);
        let first_key = first.key().copied();
        drop(first);
        t.insert(3);
        let second = t.insert(5);
        assert_eq!(second.key().copied(), first_key);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn erase_preserves_cartesian_property() {
        let mut t: Treap<i32> = {
            let mut t = Treap::with_seed(123);
            for k in [5, 2, 15, 1, 3, 10, 20, 4, 6, 12, 25, 7] {
                t.insert(k);
            }
            t
        };
        for k in [5, 6, 7, 10, 12, 15, 20, 25, 2, 3, 4, 1] {
            t.erase(&k);
            assert!(t.is_cartesian());
        }
        assert!(t.is_empty());
    }

    #[test]
    fn erase_absent_key_is_a_no_op() {
        let mut t = Treap::with_seed(1);
        for k in [1, 2, 3] {
            t.insert(k);
        }
        t.erase(&99);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn find_returns_end_when_absent() {
        let mut t = Treap::with_seed(2);
        for k in [1, 2, 3] {
            t.insert(k);
        }
        assert!(t.find(&42).is_end());
        assert_eq!(t.find(&2).key(), Some(&2));
    }

    #[test]
    fn clone_is_independent() {
        let mut t = Treap::with_seed(3);
        for k in [1, 2, 3] {
            t.insert(k);
        }
        let mut cloned = t.clone();
        cloned.insert(99);
        assert_eq!(t.len(), 3);
        assert_eq!(cloned.len(), 4);
        assert_eq!(inorder(&cloned), vec![1, 2, 3, 99]);
    }

    #[test]
    fn same_seed_reproduces_same_shape() {
        let mut a = Treap::with_seed(999);
        let mut b = Treap::with_seed(999);
        for k in [10, 20, 5, 15, 25, 1] {
            a.insert(k);
            b.insert(k);
        }
        assert_eq!(a.height(), b.height());
        assert_eq!(inorder(&a), inorder(&b));
    }

    #[test]
    fn stays_cartesian_under_mixed_workload() {
        let mut rng_state: u64 = 0x1234_5678;
        let mut next = || {
            rng_state ^= rng_state << 13;
            rng_state ^= rng_state >> 7;
            rng_state ^= rng_state << 17;
            rng_state
        };
        let mut t = Treap::with_seed(0xabcdef);
        for _ in 0..5_000 {
            let key = (next() % 1_000) as i64;
            if next() % 3 == 0 {
                t.erase(&key);
            } else {
                t.insert(key);
            }
            assert!(t.is_cartesian());
        }
    }

    /// Mixed insert/find/erase workload against a `BTreeSet` oracle: every
    /// single operation's in-order output must match, not just the final one.
    #[test]
    fn matches_btreeset_under_mixed_workload() {
        use alloc::collections::BTreeSet;
        use rand::Rng;

        let mut rng = StdRng::seed_from_u64(0x5ca1ab1e_c0ffee);
        let mut t = Treap::with_seed(0x5ca1ab1e_c0ffee);
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
