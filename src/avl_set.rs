use std::fmt::{self, Debug};

use crate::avl_base::{
    avl_tree::AvlTree,
    iter::{InOrderIter, PostOrderIter, PreOrderIter, Traversal, TraversalOrder},
    tree_stats::TreeStats,
    tree_traits::AvlParams,
    DefaultAvlConfig,
};

/// Ordered multiset of keys backed by an AVL tree.
///
/// Mutations need `&mut self` and traversals borrow `&self`, so any number of
/// traversals may run at once but never alongside an insert or delete. Sharing
/// a tree between threads needs an outer lock such as `RwLock`.
pub struct OrderedBalancedTree<K: Ord + Debug, T: AvlParams<KeyType = K> = DefaultAvlConfig<K>> {
    _tree: AvlTree<T>,
}

impl<K: Ord + Debug> OrderedBalancedTree<K> {
    pub fn new() -> Self {
        Self::with_config()
    }
}

impl<K: Ord + Debug, T: AvlParams<KeyType = K>> OrderedBalancedTree<K, T> {
    /// Empty tree using the policy of the `T` configuration.
    pub fn with_config() -> Self {
        Self {
            _tree: AvlTree::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self._tree.empty()
    }

    pub fn len(&self) -> usize {
        self._tree.size()
    }

    /// Height of the tree, 0 for a single key and -1 when empty.
    pub fn height(&self) -> i32 {
        self._tree.height()
    }

    /// Adds `key`. Returns `false` only when the configuration rejects
    /// duplicates and an equal key is already stored.
    pub fn insert(&mut self, key: K) -> bool {
        self._tree.insert(key)
    }

    /// Removes one stored key equal to `key`. Missing keys are a no-op.
    pub fn delete(&mut self, key: &K) -> bool {
        self._tree.erase_one(key)
    }

    /// Removes every stored key equal to `key`.
    pub fn delete_all(&mut self, key: &K) -> usize {
        self._tree.erase(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self._tree.exists(key)
    }

    pub fn count(&self, key: &K) -> usize {
        self._tree.count(key)
    }

    pub fn first(&self) -> Option<&K> {
        self._tree.first()
    }

    pub fn last(&self) -> Option<&K> {
        self._tree.last()
    }

    pub fn clear(&mut self) {
        self._tree.clear()
    }

    pub fn in_order(&self) -> InOrderIter<'_, K> {
        self._tree.in_order()
    }

    pub fn pre_order(&self) -> PreOrderIter<'_, K> {
        self._tree.pre_order()
    }

    pub fn post_order(&self) -> PostOrderIter<'_, K> {
        self._tree.post_order()
    }

    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_, K> {
        self._tree.traverse(order)
    }

    pub fn stats(&self) -> &TreeStats {
        self._tree.get_stats()
    }

    /// Panics if ordering, cached heights or balance are broken anywhere.
    pub fn verify(&self) {
        self._tree.verify()
    }
}

impl<K: Ord + Debug, T: AvlParams<KeyType = K>> Default for OrderedBalancedTree<K, T> {
    fn default() -> Self {
        Self::with_config()
    }
}

impl<K: Ord + Debug, T: AvlParams<KeyType = K>> Debug for OrderedBalancedTree<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self._tree, f)
    }
}

impl<K: Ord + Debug, T: AvlParams<KeyType = K>> Extend<K> for OrderedBalancedTree<K, T> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord + Debug, T: AvlParams<KeyType = K>> FromIterator<K> for OrderedBalancedTree<K, T> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::with_config();
        tree.extend(iter);
        tree
    }
}

impl<'a, K: Ord + Debug, T: AvlParams<KeyType = K>> IntoIterator for &'a OrderedBalancedTree<K, T> {
    type Item = &'a K;
    type IntoIter = InOrderIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

pub type UniqueOrderedBalancedTree<K> = OrderedBalancedTree<K, crate::avl_base::UniqueAvlConfig<K>>;
