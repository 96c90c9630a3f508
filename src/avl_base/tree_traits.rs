use std::fmt::Debug;
use std::marker::PhantomData;

// Traits bound
pub trait KeyComparator<T>: Clone + Debug {
    fn new() -> Self;
    fn less(&self, lhs: &T, rhs: &T) -> bool;
}

/// Policy knobs of an AVL tree.
pub trait AvlTraits: Clone + Debug {
    /// Accept keys that compare equal to a stored key. Equal keys are routed
    /// into the right subtree.
    const ALLOW_DUPLICATE: bool;
    /// Check every tree invariant after each mutation.
    const SELF_VERIFY: bool;
}

#[derive(Clone, Debug)]
pub struct DefaultAvlTraits;

impl AvlTraits for DefaultAvlTraits {
    const ALLOW_DUPLICATE: bool = true;
    const SELF_VERIFY: bool = false;
}

#[derive(Clone, Debug)]
pub struct UniqueAvlTraits;

impl AvlTraits for UniqueAvlTraits {
    const ALLOW_DUPLICATE: bool = false;
    const SELF_VERIFY: bool = false;
}

#[derive(Clone, Debug)]
pub struct VerifyingAvlTraits;

impl AvlTraits for VerifyingAvlTraits {
    const ALLOW_DUPLICATE: bool = true;
    const SELF_VERIFY: bool = true;
}

pub trait AvlParams: Clone + Debug {
    type KeyType: Debug;
    type KeyCompareType: KeyComparator<Self::KeyType>;
    type Traits: AvlTraits;
    const ALLOW_DUPLICATE: bool;
    const SELF_VERIFY: bool;
}

#[derive(Debug)]
pub struct _AvlTree<TKey: Debug, TCompare: Debug, Traits: AvlTraits> {
    _phantom_key: PhantomData<TKey>,
    _phantom_compare: PhantomData<TCompare>,
    _phantom_traits: PhantomData<Traits>,
}

impl<TKey: Debug, TCompare: Debug, Traits: AvlTraits> Clone for _AvlTree<TKey, TCompare, Traits> {
    fn clone(&self) -> Self {
        Self {
            _phantom_key: PhantomData,
            _phantom_compare: PhantomData,
            _phantom_traits: PhantomData,
        }
    }
}

impl<TKey: Debug, TCompare: KeyComparator<TKey>, TTraits: AvlTraits> AvlParams
    for _AvlTree<TKey, TCompare, TTraits>
{
    type KeyType = TKey;
    type KeyCompareType = TCompare;
    type Traits = TTraits;
    const ALLOW_DUPLICATE: bool = TTraits::ALLOW_DUPLICATE;
    const SELF_VERIFY: bool = TTraits::SELF_VERIFY;
}

#[cfg(test)]
#[test]
fn test_avl_traits() {
    use super::{DefaultAvlConfig, UniqueAvlConfig};

    assert!(<DefaultAvlConfig<u64> as AvlParams>::ALLOW_DUPLICATE);
    assert!(!<DefaultAvlConfig<u64> as AvlParams>::SELF_VERIFY);
    assert!(!<UniqueAvlConfig<u64> as AvlParams>::ALLOW_DUPLICATE);
    assert!(
        <_AvlTree<u64, super::DefaultKeyComparator<u64>, VerifyingAvlTraits> as AvlParams>::SELF_VERIFY
    );
}
