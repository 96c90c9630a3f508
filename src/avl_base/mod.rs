pub mod avl_tree;
pub mod deletion;
pub mod iter;
mod node;
pub mod tree_stats;
pub mod tree_traits;

use self::{
    avl_tree::AvlTree,
    tree_traits::{DefaultAvlTraits, KeyComparator, UniqueAvlTraits, VerifyingAvlTraits, _AvlTree},
};
use std::{fmt::Debug, marker::PhantomData};

#[derive(Debug)]
pub struct DefaultKeyComparator<T> {
    _t: PhantomData<T>,
}

// Clone without a `T: Clone` bound.
impl<T> Clone for DefaultKeyComparator<T> {
    fn clone(&self) -> Self {
        Self { _t: PhantomData }
    }
}
impl<T> KeyComparator<T> for DefaultKeyComparator<T>
where
    T: Ord + Debug,
{
    fn new() -> Self {
        Self { _t: PhantomData }
    }
    fn less(&self, lhs: &T, rhs: &T) -> bool {
        lhs < rhs
    }
}

pub type DefaultAvlConfig<K> = _AvlTree<K, DefaultKeyComparator<K>, DefaultAvlTraits>;
pub type UniqueAvlConfig<K> = _AvlTree<K, DefaultKeyComparator<K>, UniqueAvlTraits>;
pub type VerifyingAvlConfig<K> = _AvlTree<K, DefaultKeyComparator<K>, VerifyingAvlTraits>;
pub type DefaultAvlTree<K> = AvlTree<DefaultAvlConfig<K>>;
