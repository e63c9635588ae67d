//! Height-balanced binary search tree.
//!
//! Every node carries a balance tag — the signed height difference between
//! its right and left subtrees — restricted to `{-1, 0, +1}` outside of a
//! rebalance in progress. Insertion and deletion walk back up the search
//! path adjusting tags, rotating at most once (insert) or possibly all the
//! way to the root (erase) to restore that restriction.

use crate::arena::{Arena, NodeId};
use crate::cursor::{Cursor, TreeNode};
use alloc::vec::Vec;
use core::cmp::Ordering;
use tree_core::{Container, Ordered, Tree};

/// The AVL balance tag: `right subtree height - left subtree height`.
///
/// `LeftHeavy2`/`RightHeavy2` are transient — observed only mid-rebalance,
/// never on a node a public method has returned control past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Balance {
    LeftHeavy2,
    LeftHeavy1,
    Even,
    RightHeavy1,
    RightHeavy2,
}

impl Balance {
    fn shift_left(self) -> Self {
        match self {
            Balance::LeftHeavy2 => panic!("balance factor cannot shift past -2"),
            Balance::LeftHeavy1 => Balance::LeftHeavy2,
            Balance::Even => Balance::LeftHeavy1,
            Balance::RightHeavy1 => Balance::Even,
            Balance::RightHeavy2 => Balance::RightHeavy1,
        }
    }

    fn shift_right(self) -> Self {
        match self {
            Balance::LeftHeavy2 => Balance::LeftHeavy1,
            Balance::LeftHeavy1 => Balance::Even,
            Balance::Even => Balance::RightHeavy1,
            Balance::RightHeavy1 => Balance::RightHeavy2,
            Balance::RightHeavy2 => panic!("balance factor cannot shift past +2"),
        }
    }
}

struct AvlNode<K> {
    key: K,
    left: Option<NodeId>,
    right: Option<NodeId>,
    balance: Balance,
}

impl<K> AvlNode<K> {
    fn new(key: K) -> Self {
        AvlNode {
            key,
            left: None,
            right: None,
            balance: Balance::Even,
        }
    }
}

impl<K> TreeNode<K> for AvlNode<K> {
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

/// A height-balanced ordered set.
pub struct AvlTree<K> {
    arena: Arena<AvlNode<K>>,
    root: Option<NodeId>,
    size: usize,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> AvlTree<K> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        AvlTree {
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

    /// Cursor positioned at the smallest key, or the end sentinel if empty.
    pub fn begin(&self) -> Cursor<'_, K, AvlNode<K>> {
        Cursor::begin(&self.arena, self.root)
    }

    /// Cursor positioned one-past-the-largest key.
    pub fn end(&self) -> Cursor<'_, K, AvlNode<K>> {
        Cursor::end(&self.arena, self.root)
    }

    /// Synonym for [`AvlTree::begin`], matching the source's const/non-const pairing.
    pub fn cbegin(&self) -> Cursor<'_, K, AvlNode<K>> {
        self.begin()
    }

    /// Synonym for [`AvlTree::end`].
    pub fn cend(&self) -> Cursor<'_, K, AvlNode<K>> {
        self.end()
    }

    /// In-order iteration over all keys.
    pub fn iter(&self) -> Cursor<'_, K, AvlNode<K>> {
        self.begin()
    }

    fn set_child(&mut self, parent: Option<NodeId>, went_right: Option<bool>, child: Option<NodeId>) {
        match parent {
            None => self.root = child,
            Some(p) => {
                if went_right.expect("a non-root splice site always has a recorded direction") {
                    self.arena.get_mut(p).right = child;
                } else {
                    self.arena.get_mut(p).left = child;
                }
            }
        }
    }

    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let pivot = self
            .arena
            .get(id)
            .right
            .expect("rotate_left requires a right child");
        let pivot_left = self.arena.get(pivot).left;
        self.arena.get_mut(id).right = pivot_left;
        self.arena.get_mut(pivot).left = Some(id);
        pivot
    }

    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let pivot = self
            .arena
            .get(id)
            .left
            .expect("rotate_right requires a left child");
        let pivot_right = self.arena.get(pivot).right;
        self.arena.get_mut(id).left = pivot_right;
        self.arena.get_mut(pivot).right = Some(id);
        pivot
    }

    /// Right-rotate `id`'s left child, then left-rotate `id`; redistributes
    /// tags per the pivot's pre-rotation balance (§4.2.4).
    fn rotate_left_right(&mut self, id: NodeId) -> NodeId {
        let left = self.arena.get(id).left.expect("LR rotation needs a left child");
        let pivot = self
            .arena
            .get(left)
            .right
            .expect("LR rotation needs left.right");
        let pivot_balance = self.arena.get(pivot).balance;
        let rotated_left = self.rotate_left(left);
        self.arena.get_mut(id).left = Some(rotated_left);
        let new_root = self.rotate_right(id);
        let (left_tag, right_tag) = match pivot_balance {
            Balance::LeftHeavy1 => (Balance::Even, Balance::RightHeavy1),
            Balance::Even => (Balance::Even, Balance::Even),
            Balance::RightHeavy1 => (Balance::LeftHeavy1, Balance::Even),
            other => unreachable!("LR pivot balance must be -1/0/+1, got {other:?}"),
        };
        self.arena.get_mut(new_root).balance = Balance::Even;
        self.arena.get_mut(left).balance = left_tag;
        self.arena.get_mut(id).balance = right_tag;
        new_root
    }

    /// Symmetric to [`Self::rotate_left_right`].
    fn rotate_right_left(&mut self, id: NodeId) -> NodeId {
        let right = self.arena.get(id).right.expect("RL rotation needs a right child");
        let pivot = self
            .arena
            .get(right)
            .left
            .expect("RL rotation needs right.left");
        let pivot_balance = self.arena.get(pivot).balance;
        let rotated_right = self.rotate_right(right);
        self.arena.get_mut(id).right = Some(rotated_right);
        let new_root = self.rotate_left(id);
        let (left_tag, right_tag) = match pivot_balance {
            Balance::LeftHeavy1 => (Balance::Even, Balance::RightHeavy1),
            Balance::Even => (Balance::Even, Balance::Even),
            Balance::RightHeavy1 => (Balance::LeftHeavy1, Balance::Even),
            other => unreachable!("RL pivot balance must be -1/0/+1, got {other:?}"),
        };
        self.arena.get_mut(new_root).balance = Balance::Even;
        self.arena.get_mut(id).balance = left_tag;
        self.arena.get_mut(right).balance = right_tag;
        new_root
    }

    /// Single/double rotation dispatch used after an insertion pushes a
    /// node's balance to ±2 (§4.2.2 step 5).
    fn rebalance_after_insert(&mut self, id: NodeId) -> NodeId {
        match self.arena.get(id).balance {
            Balance::RightHeavy2 => {
                let right = self.arena.get(id).right.unwrap();
                if self.arena.get(right).balance == Balance::RightHeavy1 {
                    let new_root = self.rotate_left(id);
                    self.arena.get_mut(new_root).balance = Balance::Even;
                    self.arena.get_mut(id).balance = Balance::Even;
                    new_root
                } else {
                    self.rotate_right_left(id)
                }
            }
            Balance::LeftHeavy2 => {
                let left = self.arena.get(id).left.unwrap();
                if self.arena.get(left).balance == Balance::LeftHeavy1 {
                    let new_root = self.rotate_right(id);
                    self.arena.get_mut(new_root).balance = Balance::Even;
                    self.arena.get_mut(id).balance = Balance::Even;
                    new_root
                } else {
                    self.rotate_left_right(id)
                }
            }
            _ => id,
        }
    }
}

impl<K: Ord> AvlTree<K> {
    /// Returns a cursor to the matching node, or `end()` if absent.
    pub fn find(&self, key: &K) -> Cursor<'_, K, AvlNode<K>> {
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

    /// Inserts `key`, returning a cursor to the new or pre-existing node.
    pub fn insert(&mut self, key: K) -> Cursor<'_, K, AvlNode<K>> {
        let Some(root_id) = self.root else {
            let id = self.arena.insert(AvlNode::new(key));
            self.root = Some(id);
            self.size += 1;
            return Cursor::positioned(&self.arena, self.root, id);
        };

        let mut path = Vec::new();
        let mut dirs: Vec<bool> = Vec::new();
        let mut current = root_id;
        let new_id;
        loop {
            let went_right = match key.cmp(self.arena.get(current).key()) {
                Ordering::Equal => return Cursor::positioned(&self.arena, self.root, current),
                Ordering::Less => false,
                Ordering::Greater => true,
            };
            let child = if went_right {
                self.arena.get(current).right
            } else {
                self.arena.get(current).left
            };
            match child {
                Some(next) => {
                    path.push(current);
                    dirs.push(went_right);
                    current = next;
                }
                None => {
                    new_id = self.arena.insert(AvlNode::new(key));
                    if went_right {
                        self.arena.get_mut(current).right = Some(new_id);
                    } else {
                        self.arena.get_mut(current).left = Some(new_id);
                    }
                    path.push(current);
                    dirs.push(went_right);
                    break;
                }
            }
        }

        // The branch root is the deepest ancestor whose balance was already
        // non-zero; everything above it has its balance unchanged by this
        // insertion (§4.2.2 step 4). If no ancestor qualifies, the branch
        // root is the tree's own root (index 0 of `path`).
        let branch_idx = path
            .iter()
            .rposition(|&id| self.arena.get(id).balance != Balance::Even)
            .unwrap_or(0);

        let mut node_id = path[branch_idx];
        for &went_right in &dirs[branch_idx..] {
            let node = self.arena.get_mut(node_id);
            node.balance = if went_right {
                node.balance.shift_right()
            } else {
                node.balance.shift_left()
            };
            node_id = if went_right {
                node.right.unwrap()
            } else {
                node.left.unwrap()
            };
        }

        let rebalanced = self.rebalance_after_insert(path[branch_idx]);
        if branch_idx == 0 {
            self.root = Some(rebalanced);
        } else {
            let parent = path[branch_idx - 1];
            self.set_child(Some(parent), Some(dirs[branch_idx - 1]), Some(rebalanced));
        }

        self.size += 1;
        Cursor::positioned(&self.arena, self.root, new_id)
    }

    /// Removes `key` if present; a no-op otherwise.
    pub fn erase(&mut self, key: &K) {
        let mut path: Vec<NodeId> = Vec::new();
        let mut dirs: Vec<bool> = Vec::new();
        let mut current = self.root;
        let mut target = None;
        while let Some(id) = current {
            match key.cmp(self.arena.get(id).key()) {
                Ordering::Equal => {
                    target = Some(id);
                    break;
                }
                Ordering::Less => {
                    path.push(id);
                    dirs.push(false);
                    current = self.arena.get(id).left;
                }
                Ordering::Greater => {
                    path.push(id);
                    dirs.push(true);
                    current = self.arena.get(id).right;
                }
            }
        }
        let Some(target_id) = target else { return };

        if self.size == 1 {
            self.arena.remove(target_id);
            self.root = None;
            self.size = 0;
            return;
        }

        let left = self.arena.get(target_id).left;
        let right = self.arena.get(target_id).right;
        let parent = path.last().copied();
        let dir_to_target = dirs.last().copied();
        let target_balance = self.arena.get(target_id).balance;

        match right {
            None => {
                // Case 1: no right child, replace with the (possibly absent) left child.
                self.set_child(parent, dir_to_target, left);
                if let Some(l) = left {
                    self.arena.get_mut(l).balance = target_balance;
                    path.push(l);
                    dirs.push(false);
                }
                self.arena.remove(target_id);
            }
            Some(r) => {
                if self.arena.get(r).left.is_none() {
                    // Case 2: right child has no left child, it takes target's place.
                    self.set_child(parent, dir_to_target, Some(r));
                    self.arena.get_mut(r).left = left;
                    self.arena.get_mut(r).balance = target_balance;
                    path.push(r);
                    dirs.push(true);
                    self.arena.remove(target_id);
                } else {
                    // Case 3: the in-order successor (leftmost of right subtree) takes its place.
                    let mut ancestors = Vec::new();
                    let mut succ = r;
                    while let Some(l2) = self.arena.get(succ).left {
                        ancestors.push(succ);
                        succ = l2;
                    }
                    let succ_parent = *ancestors.last().unwrap();
                    let succ_right = self.arena.get(succ).right;
                    self.arena.get_mut(succ_parent).left = succ_right;
                    self.arena.get_mut(succ).left = left;
                    self.arena.get_mut(succ).right = Some(r);
                    self.arena.get_mut(succ).balance = target_balance;
                    self.set_child(parent, dir_to_target, Some(succ));
                    self.arena.remove(target_id);

                    path.push(succ);
                    dirs.push(true);
                    for anc in ancestors {
                        path.push(anc);
                        dirs.push(false);
                    }
                }
            }
        }
        self.size -= 1;

        // Rebalance on the walk back up (§4.2.3 step 4).
        while let Some(upd_id) = path.pop() {
            let shrank_right = dirs.pop().unwrap();
            let parent_id = path.last().copied();
            let parent_dir = if path.is_empty() { None } else { dirs.last().copied() };

            let new_balance = if shrank_right {
                let b = self.arena.get(upd_id).balance.shift_left();
                self.arena.get_mut(upd_id).balance = b;
                b
            } else {
                let b = self.arena.get(upd_id).balance.shift_right();
                self.arena.get_mut(upd_id).balance = b;
                b
            };

            match new_balance {
                Balance::RightHeavy1 | Balance::LeftHeavy1 => break,
                Balance::RightHeavy2 => {
                    let right = self.arena.get(upd_id).right.unwrap();
                    let sibling_balance = self.arena.get(right).balance;
                    if sibling_balance == Balance::LeftHeavy1 {
                        let new_top = self.rotate_right_left(upd_id);
                        self.set_child(parent_id, parent_dir, Some(new_top));
                        if parent_id.is_none() {
                            self.root = Some(new_top);
                        }
                    } else {
                        let new_top = self.rotate_left(upd_id);
                        self.set_child(parent_id, parent_dir, Some(new_top));
                        if parent_id.is_none() {
                            self.root = Some(new_top);
                        }
                        if sibling_balance == Balance::Even {
                            self.arena.get_mut(new_top).balance = Balance::LeftHeavy1;
                            self.arena.get_mut(upd_id).balance = Balance::RightHeavy1;
                            break;
                        } else {
                            self.arena.get_mut(new_top).balance = Balance::Even;
                            self.arena.get_mut(upd_id).balance = Balance::Even;
                        }
                    }
                }
                Balance::LeftHeavy2 => {
                    let left = self.arena.get(upd_id).left.unwrap();
                    let sibling_balance = self.arena.get(left).balance;
                    if sibling_balance == Balance::RightHeavy1 {
                        let new_top = self.rotate_left_right(upd_id);
                        self.set_child(parent_id, parent_dir, Some(new_top));
                        if parent_id.is_none() {
                            self.root = Some(new_top);
                        }
                    } else {
                        let new_top = self.rotate_right(upd_id);
                        self.set_child(parent_id, parent_dir, Some(new_top));
                        if parent_id.is_none() {
                            self.root = Some(new_top);
                        }
                        if sibling_balance == Balance::Even {
                            self.arena.get_mut(new_top).balance = Balance::RightHeavy1;
                            self.arena.get_mut(upd_id).balance = Balance::LeftHeavy1;
                            break;
                        } else {
                            self.arena.get_mut(new_top).balance = Balance::Even;
                            self.arena.get_mut(upd_id).balance = Balance::Even;
                        }
                    }
                }
                Balance::Even => {}
            }
        }
    }

    /// Every node's left subtree holds strictly smaller keys and its right
    /// subtree holds strictly greater keys.
    pub fn is_ordered(&self) -> bool {
        fn go<K: Ord>(arena: &Arena<AvlNode<K>>, id: Option<NodeId>) -> bool {
            let Some(id) = id else { return true };
            let node = arena.get(id);
            let left_ok = node.left.map_or(true, |l| arena.get(l).key() < &node.key);
            let right_ok = node.right.map_or(true, |r| arena.get(r).key() > &node.key);
            left_ok && right_ok && go(arena, node.left) && go(arena, node.right)
        }
        go(&self.arena, self.root)
    }

    /// Every node's balance tag equals the true height difference of its subtrees.
    pub fn check_balance_factors(&self) -> bool {
        fn height<K>(arena: &Arena<AvlNode<K>>, id: Option<NodeId>) -> Option<i64> {
            let Some(id) = id else { return Some(0) };
            let node = arena.get(id);
            let left_h = height(arena, node.left)?;
            let right_h = height(arena, node.right)?;
            let actual = right_h - left_h;
            let tagged = match node.balance {
                Balance::LeftHeavy1 => -1,
                Balance::Even => 0,
                Balance::RightHeavy1 => 1,
                _ => return None,
            };
            if actual != tagged || !(-1..=1).contains(&actual) {
                return None;
            }
            Some(1 + left_h.max(right_h))
        }
        height(&self.arena, self.root).is_some()
    }

    /// `true` iff every subtree's height difference is within `{-1, 0, +1}`.
    pub fn is_balanced(&self) -> bool {
        fn height<K>(arena: &Arena<AvlNode<K>>, id: Option<NodeId>) -> Option<i64> {
            let Some(id) = id else { return Some(0) };
            let node = arena.get(id);
            let left_h = height(arena, node.left)?;
            let right_h = height(arena, node.right)?;
            if (right_h - left_h).abs() > 1 {
                return None;
            }
            Some(1 + left_h.max(right_h))
        }
        height(&self.arena, self.root).is_some()
    }

    /// Ordered, balanced, and tag-consistent all at once.
    pub fn is_avl(&self) -> bool {
        self.is_ordered() && self.check_balance_factors()
    }
}

impl<K: Ord + Clone> Clone for AvlTree<K> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        for key in iter {
            tree.insert(key);
        }
        tree
    }
}

impl<'a, K: Ord> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Cursor<'a, K, AvlNode<K>>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> Container for AvlTree<K> {
    fn len(&self) -> usize {
        self.size
    }
}

impl<K: Ord> Ordered<K> for AvlTree<K> {
    fn min(&self) -> Option<&K> {
        self.begin().key()
    }
    fn max(&self) -> Option<&K> {
        let mut c = self.end();
        c.retreat();
        c.key()
    }
}

impl<K: Ord> Tree<K> for AvlTree<K> {
    fn height(&self) -> usize {
        fn go<K>(arena: &Arena<AvlNode<K>>, id: Option<NodeId>) -> usize {
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

    fn is_balanced(&self) -> bool {
        AvlTree::is_balanced(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inorder(tree: &AvlTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    #[cfg(test)]
    mod insert {
        use super::*;

        #[test]
        fn descending_triplet_rotates_once() {
            let mut t = AvlTree::new();
            for k in [3, 2, 1] {
                t.insert(k);
            }
            assert_eq!(t.height(), 1);
            assert_eq!(inorder(&t), vec![1, 2, 3]);
            assert!(t.is_avl());
        }

        #[test]
        fn ascending_triplet_rotates_once() {
            let mut t = AvlTree::new();
            for k in [1, 2, 3] {
                t.insert(k);
            }
            assert_eq!(t.height(), 1);
            assert_eq!(inorder(&t), vec![1, 2, 3]);
            assert!(t.is_avl());
        }

        #[test]
        fn right_left_case() {
            let mut t = AvlTree::new();
            for k in [5, 0, 20, 15, 10, 25] {
                t.insert(k);
            }
            assert!(t.is_avl());
            assert_eq!(t.len(), 6);
            assert_eq!(inorder(&t), vec![0, 5, 10, 15, 20, 25]);
        }

        #[test]
        fn left_right_case() {
            let mut t = AvlTree::new();
            for k in [25, 10, 30, 5, 15, 20] {
                t.insert(k);
            }
            assert!(t.is_avl());
            assert_eq!(t.len(), 6);
            assert_eq!(inorder(&t), vec![5, 10, 15, 20, 25, 30]);
        }

        #[test]
        fn duplicate_insert_is_a_no_op() {
            let mut t = AvlTree::new();
            t.insert(1);
            t.insert(1);
            assert_eq!(t.len(), 1);
        }
    }

    #[cfg(test)]
    mod erase {
        use super::*;

        #[test]
        fn single_erase_keeps_avl_shape() {
            let mut t: AvlTree<i32> = (1..=6).collect();
            t.erase(&4);
            assert_eq!(inorder(&t), vec![1, 2, 3, 5, 6]);
            assert_eq!(t.len(), 5);
            assert!(t.is_avl());
        }

        #[test]
        fn draining_every_key_stays_avl_and_ends_empty() {
            let mut t: AvlTree<i32> = [5, 2, 15, 1, 3, 10, 20, 4, 6, 12, 25, 7].into_iter().collect();
            for k in [5, 6, 7, 10, 12, 15, 20, 25, 2, 3, 4, 1] {
                t.erase(&k);
                assert!(t.is_avl());
            }
            assert!(t.is_empty());
        }

        #[test]
        fn erase_absent_key_is_a_no_op() {
            let mut t: AvlTree<i32> = [1, 2, 3].into_iter().collect();
            t.erase(&99);
            assert_eq!(t.len(), 3);
            t.erase(&99);
            assert_eq!(t.len(), 3);
        }
    }

    #[test]
    fn find_returns_end_when_absent() {
        let t: AvlTree<i32> = [1, 2, 3].into_iter().collect();
        assert!(t.find(&42).is_end());
        assert_eq!(t.find(&2).key(), Some(&2));
    }

    #[test]
    fn clone_is_independent() {
        let t: AvlTree<i32> = [1, 2, 3].into_iter().collect();
        let mut cloned = t.clone();
        cloned.insert(99);
        assert_eq!(t.len(), 3);
        assert_eq!(cloned.len(), 4);
    }

    #[test]
    fn height_bound_holds_for_large_random_insert() {
        let mut rng_state: u64 = 0x1234_5678_9abc_def0;
        let mut next = || {
            rng_state ^= rng_state << 13;
            rng_state ^= rng_state >> 7;
            rng_state ^= rng_state << 17;
            rng_state
        };
        let mut t = AvlTree::new();
        for _ in 0..20_000 {
            t.insert((next() % 1_000_000) as i64);
        }
        let n = t.len() as f64;
        let bound = 1.45 * (n + 2.0).log2();
        assert!((t.height() as f64) <= bound, "height {} exceeds bound {}", t.height(), bound);
    }

    /// Mixed insert/find/erase workload against a `BTreeSet` oracle: every
    /// single operation's in-order output must match, not just the final one.
    #[test]
    fn matches_btreeset_under_mixed_workload() {
        use alloc::collections::BTreeSet;
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5ca1ab1e_c0ffee);
        let mut t = AvlTree::new();
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
