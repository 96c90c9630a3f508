use std::cmp::max;

use super::{
    deletion::{DeletionResult, DeletionResultFlags},
    iter::{InOrderIter, PostOrderIter, PreOrderIter, Traversal, TraversalOrder},
    node::{Link, Node, EMPTY_HEIGHT},
    tree_stats::TreeStats,
    tree_traits::{AvlParams, KeyComparator},
};

pub struct AvlTree<T: AvlParams> {
    root_: Link<T::KeyType>,
    stats_: TreeStats,
    key_less: T::KeyCompareType,
}

/// Convenient Key Comparison Functions Generated From key_less
impl<T: AvlParams> AvlTree<T> {
    pub fn key_comp(&self) -> &T::KeyCompareType {
        &self.key_less
    }

    fn key_less(&self, a: &T::KeyType, b: &T::KeyType) -> bool {
        self.key_less.less(a, b)
    }

    fn key_lessequal(&self, a: &T::KeyType, b: &T::KeyType) -> bool {
        !self.key_less.less(b, a)
    }
}

/// Access Functions to the item count
impl<T: AvlParams> AvlTree<T> {
    pub fn size(&self) -> usize {
        self.stats_.size
    }

    pub fn empty(&self) -> bool {
        self.root_.is_none()
    }

    /// Height of the whole tree, -1 when empty.
    pub fn height(&self) -> i32 {
        Node::height(&self.root_)
    }

    pub fn get_stats(&self) -> &TreeStats {
        &self.stats_
    }

    pub fn clear(&mut self) {
        self.root_ = None;
        self.stats_.size = 0;
    }
}

/// Access functions querying the tree by descending from the root
impl<T: AvlParams> AvlTree<T> {
    pub fn exists(&self, key: &T::KeyType) -> bool {
        self.find(key).is_some()
    }

    /// Returns the stored key that compares equal to `key`, the first one met
    /// on the search path if there are several.
    pub fn find(&self, key: &T::KeyType) -> Option<&T::KeyType> {
        let mut n = self.root_.as_deref();
        while let Some(node) = n {
            if self.key_less(key, &node.key) {
                n = node.left.as_deref();
            } else if self.key_less(&node.key, key) {
                n = node.right.as_deref();
            } else {
                return Some(&node.key);
            }
        }
        None
    }

    /// Number of stored keys equal to `key`.
    pub fn count(&self, key: &T::KeyType) -> usize {
        self.count_descend(self.root_.as_deref(), key)
    }

    fn count_descend(&self, n: Option<&Node<T::KeyType>>, key: &T::KeyType) -> usize {
        let Some(node) = n else {
            return 0;
        };
        if self.key_less(key, &node.key) {
            self.count_descend(node.left.as_deref(), key)
        } else if self.key_less(&node.key, key) {
            self.count_descend(node.right.as_deref(), key)
        } else {
            // Rotations can move equal keys to either side.
            1 + self.count_descend(node.left.as_deref(), key)
                + self.count_descend(node.right.as_deref(), key)
        }
    }

    pub fn first(&self) -> Option<&T::KeyType> {
        let mut node = self.root_.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    pub fn last(&self) -> Option<&T::KeyType> {
        let mut node = self.root_.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }

    pub fn in_order(&self) -> InOrderIter<'_, T::KeyType> {
        InOrderIter::new(self.root_.as_deref(), self.size())
    }

    pub fn pre_order(&self) -> PreOrderIter<'_, T::KeyType> {
        PreOrderIter::new(self.root_.as_deref(), self.size())
    }

    pub fn post_order(&self) -> PostOrderIter<'_, T::KeyType> {
        PostOrderIter::new(self.root_.as_deref(), self.size())
    }

    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_, T::KeyType> {
        match order {
            TraversalOrder::InOrder => Traversal::InOrder(self.in_order()),
            TraversalOrder::PreOrder => Traversal::PreOrder(self.pre_order()),
            TraversalOrder::PostOrder => Traversal::PostOrder(self.post_order()),
        }
    }
}

/// Rotation and rebalancing
impl<T: AvlParams> AvlTree<T> {
    /// Promotes the left child of `node` to subtree root.
    fn rotate_right(mut node: Box<Node<T::KeyType>>) -> Box<Node<T::KeyType>> {
        debug_assert!(node.left.is_some());
        let Some(mut new_root) = node.left.take() else {
            return node;
        };

        node.left = new_root.right.take();
        node.update_height();
        new_root.right = Some(node);
        new_root.update_height();

        new_root
    }

    /// Promotes the right child of `node` to subtree root.
    fn rotate_left(mut node: Box<Node<T::KeyType>>) -> Box<Node<T::KeyType>> {
        debug_assert!(node.right.is_some());
        let Some(mut new_root) = node.right.take() else {
            return node;
        };

        node.right = new_root.left.take();
        node.update_height();
        new_root.left = Some(node);
        new_root.update_height();

        new_root
    }

    /// Restores `|balance_factor| <= 1` at `node`, whose height must already be
    /// up to date. Returns the new subtree root and whether a rotation fired.
    fn make_balance(&mut self, mut node: Box<Node<T::KeyType>>) -> (Box<Node<T::KeyType>>, bool) {
        let factor = node.balance_factor();

        if factor < -1 {
            if node.right.as_ref().map_or(0, |n| n.balance_factor()) > 0 {
                log::debug!("AvlTree::make_balance right-left at {:?}", node.key);
                node.right = node.right.take().map(Self::rotate_right);
                self.stats_.double_rotations += 1;
            } else {
                log::debug!("AvlTree::make_balance right-right at {:?}", node.key);
                self.stats_.single_rotations += 1;
            }
            (Self::rotate_left(node), true)
        } else if factor > 1 {
            if node.left.as_ref().map_or(0, |n| n.balance_factor()) < 0 {
                log::debug!("AvlTree::make_balance left-right at {:?}", node.key);
                node.left = node.left.take().map(Self::rotate_left);
                self.stats_.double_rotations += 1;
            } else {
                log::debug!("AvlTree::make_balance left-left at {:?}", node.key);
                self.stats_.single_rotations += 1;
            }
            (Self::rotate_right(node), true)
        } else {
            (node, false)
        }
    }
}

/// Insertion
impl<T: AvlParams> AvlTree<T> {
    /// Insert a key into the tree. If the tree does not allow duplicate keys,
    /// the insert fails when an equal key is already present.
    pub fn insert(&mut self, key: T::KeyType) -> bool {
        log::debug!("AvlTree::insert({:?}) on tree size {}", key, self.size());

        let root = self.root_.take();
        let (root, inserted) = self.insert_descend(root, key);
        self.root_ = Some(root);

        if inserted {
            self.stats_.size += 1;
        }
        if T::SELF_VERIFY {
            self.verify();
        }

        inserted
    }

    /// Descend to the empty slot for `key`, hang a new leaf there and unroll
    /// height updates and rebalancing up to `n`.
    fn insert_descend(
        &mut self,
        n: Link<T::KeyType>,
        key: T::KeyType,
    ) -> (Box<Node<T::KeyType>>, bool) {
        let Some(mut node) = n else {
            log::trace!("AvlTree::insert_descend new leaf {:?}", key);
            return (Node::new_leaf(key), true);
        };

        let inserted = if self.key_less(&key, &node.key) {
            let (child, inserted) = self.insert_descend(node.left.take(), key);
            node.left = Some(child);
            inserted
        } else if !T::ALLOW_DUPLICATE && self.key_lessequal(&key, &node.key) {
            log::debug!("AvlTree::insert_descend rejected duplicate {:?}", key);
            false
        } else {
            let (child, inserted) = self.insert_descend(node.right.take(), key);
            node.right = Some(child);
            inserted
        };

        if !inserted {
            return (node, false);
        }

        node.update_height();
        let (node, _) = self.make_balance(node);
        log::trace!(
            "AvlTree::insert_descend unwind at {:?} height {}",
            node.key,
            node.height
        );

        (node, true)
    }
}

/// Erase
impl<T: AvlParams> AvlTree<T> {
    /// Erase one node holding a key equal to `key`. Returns how the removal
    /// was carried out, or a `NotFound` result leaving the tree untouched.
    pub fn erase_one_with_result(&mut self, key: &T::KeyType) -> DeletionResult {
        log::debug!("AvlTree::erase_one({:?}) on tree size {}", key, self.size());

        let mut result = DeletionResult::new(DeletionResultFlags::NotFound);
        let root = self.root_.take();
        self.root_ = self.erase_one_descend(root, key, &mut result);

        if result.found() {
            self.stats_.size -= 1;
            if T::SELF_VERIFY {
                self.verify();
            }
        }

        result
    }

    pub fn erase_one(&mut self, key: &T::KeyType) -> bool {
        self.erase_one_with_result(key).found()
    }

    /// Erase every key equal to `key`, returns the number removed.
    pub fn erase(&mut self, key: &T::KeyType) -> usize {
        let mut c = 0;
        while self.erase_one(key) {
            c += 1;
            if !T::ALLOW_DUPLICATE {
                break;
            }
        }
        c
    }

    fn erase_one_descend(
        &mut self,
        n: Link<T::KeyType>,
        key: &T::KeyType,
        result: &mut DeletionResult,
    ) -> Link<T::KeyType> {
        let Some(mut node) = n else {
            log::debug!("Could not find key {:?} to erase.", key);
            return None;
        };

        if self.key_less(key, &node.key) {
            node.left = self.erase_one_descend(node.left.take(), key, result);
        } else if self.key_less(&node.key, key) {
            node.right = self.erase_one_descend(node.right.take(), key, result);
        } else {
            log::debug!("Found key {:?} in node of height {}", key, node.height);

            result.flags = match (&node.left, &node.right) {
                (None, None) => DeletionResultFlags::Leaf,
                (Some(_), Some(_)) => DeletionResultFlags::Predecessor,
                _ => DeletionResultFlags::OneChild,
            };
            let (replacement, _) = self.remove_node(node, result);
            return replacement;
        }

        if !result.found() {
            return Some(node);
        }

        Some(self.unwind(node, result))
    }

    /// Unlink `node` from its slot. A node with two children takes the key of
    /// its predecessor, which is then erased from the left subtree the same
    /// way. Returns the subtree to put in the slot and the removed key.
    fn remove_node(
        &mut self,
        mut node: Box<Node<T::KeyType>>,
        result: &mut DeletionResult,
    ) -> (Link<T::KeyType>, T::KeyType) {
        match (node.left.take(), node.right.take()) {
            (None, None) => (None, node.key),
            (Some(child), None) | (None, Some(child)) => (Some(child), node.key),
            (Some(left), Some(right)) => {
                let depth = self.predecessor_depth(&left);
                let (left, predecessor) = self.detach_at_depth(left, depth, result);
                log::debug!(
                    "AvlTree::remove_node promoting predecessor {:?}",
                    predecessor
                );
                let removed = std::mem::replace(&mut node.key, predecessor);
                node.left = left;
                node.right = Some(right);
                (Some(self.unwind(node, result)), removed)
            }
        }
    }

    /// Number of right steps from `node` to the first node on its right spine
    /// whose key equals the subtree maximum. An erase of the maximum key
    /// descending from `node` stops there.
    fn predecessor_depth(&self, node: &Node<T::KeyType>) -> usize {
        let mut max = node;
        while let Some(right) = max.right.as_deref() {
            max = right;
        }

        let mut depth = 0;
        let mut n = node;
        while self.key_less(&n.key, &max.key) {
            match n.right.as_deref() {
                Some(right) => {
                    n = right;
                    depth += 1;
                }
                None => break,
            }
        }
        depth
    }

    /// Remove the node `depth` right steps below `node`, rebalancing on the
    /// way back up. Returns the remaining subtree and the removed key.
    fn detach_at_depth(
        &mut self,
        mut node: Box<Node<T::KeyType>>,
        depth: usize,
        result: &mut DeletionResult,
    ) -> (Link<T::KeyType>, T::KeyType) {
        if depth == 0 {
            return self.remove_node(node, result);
        }
        let Some(right) = node.right.take() else {
            return self.remove_node(node, result);
        };

        let (right, key) = self.detach_at_depth(right, depth - 1, result);
        node.right = right;
        (Some(self.unwind(node, result)), key)
    }

    fn unwind(
        &mut self,
        mut node: Box<Node<T::KeyType>>,
        result: &mut DeletionResult,
    ) -> Box<Node<T::KeyType>> {
        node.update_height();
        let (node, rotated) = self.make_balance(node);
        if rotated {
            *result |= DeletionResultFlags::Rebalanced;
        }
        node
    }
}

/// Verification
impl<T: AvlParams> AvlTree<T> {
    /// Check ordering, height bookkeeping, balance and the element count.
    /// Panics on the first broken invariant.
    pub fn verify(&self) {
        let (height, count) = Self::verify_node(self.root_.as_deref());
        assert_eq!(height, self.height());
        assert_eq!(count, self.size(), "size counter out of sync");

        let mut keys = self.in_order();
        if let Some(mut prev) = keys.next() {
            for key in keys {
                if T::ALLOW_DUPLICATE {
                    assert!(
                        self.key_lessequal(prev, key),
                        "keys out of order: {:?} before {:?}",
                        prev,
                        key
                    );
                } else {
                    assert!(
                        self.key_less(prev, key),
                        "keys out of order or duplicated: {:?} before {:?}",
                        prev,
                        key
                    );
                }
                prev = key;
            }
        }
    }

    /// Returns the recomputed height and the node count of the subtree.
    fn verify_node(n: Option<&Node<T::KeyType>>) -> (i32, usize) {
        let Some(node) = n else {
            return (EMPTY_HEIGHT, 0);
        };

        let (lh, lc) = Self::verify_node(node.left.as_deref());
        let (rh, rc) = Self::verify_node(node.right.as_deref());

        assert_eq!(
            node.height,
            max(lh, rh) + 1,
            "stale height at {:?}",
            node.key
        );
        assert!(
            (lh - rh).abs() <= 1,
            "unbalanced node {:?}: left {} right {}",
            node.key,
            lh,
            rh
        );

        (node.height, lc + rc + 1)
    }
}

/// Display
impl<T: AvlParams> std::fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl<T: AvlParams> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: AvlParams> AvlTree<T> {
    pub fn new() -> Self {
        Self {
            root_: None,
            stats_: TreeStats::new(),
            key_less: T::KeyCompareType::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl_base::{DefaultAvlTree, UniqueAvlConfig, VerifyingAvlConfig};

    fn shape(tree: &DefaultAvlTree<i32>) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        fn walk(n: Option<&Node<i32>>, out: &mut Vec<(i32, i32)>) {
            if let Some(node) = n {
                out.push((node.key, node.height));
                walk(node.left.as_deref(), out);
                walk(node.right.as_deref(), out);
            }
        }
        walk(tree.root_.as_deref(), &mut out);
        out
    }

    #[test]
    fn rotate_right_relinks_and_updates_heights() {
        let mut root = Node::new_leaf(30);
        let mut left = Node::new_leaf(20);
        left.left = Some(Node::new_leaf(10));
        left.right = Some(Node::new_leaf(25));
        left.update_height();
        root.left = Some(left);
        root.update_height();

        let root = DefaultAvlTree::<i32>::rotate_right(root);
        assert_eq!(root.key, 20);
        assert_eq!(root.height, 2);
        assert_eq!(root.left.as_ref().unwrap().key, 10);
        let right = root.right.as_ref().unwrap();
        assert_eq!(right.key, 30);
        assert_eq!(right.height, 1);
        assert_eq!(right.left.as_ref().unwrap().key, 25);
        assert!(right.right.is_none());

        let root = DefaultAvlTree::<i32>::rotate_left(root);
        assert_eq!(root.key, 30);
        assert_eq!(root.height, 2);
        assert_eq!(root.left.as_ref().unwrap().key, 20);
    }

    #[test]
    fn each_rotation_case() {
        // right-right, left-left, right-left, left-right
        for (keys, root) in [
            ([1, 2, 3], 2),
            ([3, 2, 1], 2),
            ([1, 3, 2], 2),
            ([3, 1, 2], 2),
        ] {
            let mut tree = DefaultAvlTree::new();
            for k in keys {
                tree.insert(k);
            }
            assert_eq!(shape(&tree), vec![(root, 1), (1, 0), (3, 0)]);
        }

        let mut tree = DefaultAvlTree::new();
        for k in [1, 3, 2] {
            tree.insert(k);
        }
        assert_eq!(tree.get_stats().double_rotations, 1);
        assert_eq!(tree.get_stats().rotations(), 2);
    }

    #[test]
    fn erase_reports_removal_case() {
        let mut tree = DefaultAvlTree::new();
        for k in [20, 10, 30, 5, 25, 40, 35] {
            tree.insert(k);
        }

        let r = tree.erase_one_with_result(&5);
        assert!(r.has(DeletionResultFlags::Leaf));

        let r = tree.erase_one_with_result(&40);
        assert!(r.has(DeletionResultFlags::OneChild));

        let r = tree.erase_one_with_result(&20);
        assert!(r.has(DeletionResultFlags::Predecessor));
        assert_eq!(
            shape(&tree),
            vec![(30, 2), (10, 1), (25, 0), (35, 0)]
        );

        let r = tree.erase_one_with_result(&99);
        assert!(!r.found());
        tree.verify();
        assert_eq!(tree.size(), 4);
    }

    #[test]
    fn absent_key_keeps_shape() {
        let mut tree = DefaultAvlTree::new();
        for k in 0..50 {
            tree.insert(k * 2);
        }
        let before = shape(&tree);
        assert!(!tree.erase_one(&7));
        assert_eq!(shape(&tree), before);
    }

    #[test]
    fn duplicates_follow_policy() {
        let mut tree = DefaultAvlTree::new();
        for _ in 0..5 {
            assert!(tree.insert(4));
        }
        tree.insert(1);
        tree.insert(9);
        tree.verify();
        assert_eq!(tree.count(&4), 5);
        assert!(tree.erase_one(&4));
        assert_eq!(tree.count(&4), 4);
        assert_eq!(tree.erase(&4), 4);
        assert_eq!(tree.size(), 2);

        let mut unique = AvlTree::<UniqueAvlConfig<i32>>::new();
        assert!(unique.insert(4));
        assert!(!unique.insert(4));
        assert_eq!(unique.size(), 1);
        assert_eq!(unique.erase(&4), 1);
        assert!(unique.empty());
    }

    #[test]
    fn erase_with_duplicates_stops_at_first_equal_predecessor() {
        let mut tree = DefaultAvlTree::new();
        for k in [3, 1, 2, 1, 0] {
            tree.insert(k);
        }
        assert_eq!(shape(&tree), vec![(2, 2), (1, 1), (0, 0), (1, 0), (3, 0)]);

        // The left child already holds the maximum 1, so it is erased in place
        // of the lower 1 and hands its own predecessor 0 up.
        let r = tree.erase_one_with_result(&2);
        assert!(r.has(DeletionResultFlags::Predecessor));
        assert_eq!(shape(&tree), vec![(1, 2), (0, 1), (1, 0), (3, 0)]);
        tree.verify();
    }

    #[test]
    fn self_verifying_tree() {
        let mut tree = AvlTree::<VerifyingAvlConfig<u32>>::new();
        for k in (0..200).rev() {
            tree.insert(k % 37);
        }
        for k in 0..100 {
            assert!(tree.erase_one(&(k % 37)));
        }
        assert_eq!(tree.size(), 100);
    }

    #[test]
    fn first_last_and_find() {
        let mut tree = DefaultAvlTree::new();
        assert_eq!(tree.first(), None);
        for k in [8, 3, 12, 1, 6] {
            tree.insert(k);
        }
        assert_eq!(tree.first(), Some(&1));
        assert_eq!(tree.last(), Some(&12));
        assert_eq!(tree.find(&6), Some(&6));
        assert!(!tree.exists(&7));
        tree.clear();
        assert!(tree.empty());
        assert_eq!(tree.height(), -1);
    }
}
