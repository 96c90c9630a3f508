use std::cmp::max;

pub type Link<K> = Option<Box<Node<K>>>;

/// Height of an empty subtree.
pub const EMPTY_HEIGHT: i32 = -1;

#[derive(Debug)]
pub struct Node<K> {
    pub key: K,
    pub left: Link<K>,
    pub right: Link<K>,
    /// Cached height of the subtree rooted here, a leaf is 0.
    pub height: i32,
}

impl<K> Node<K> {
    pub fn new_leaf(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 0,
        })
    }

    #[inline]
    pub fn height(link: &Link<K>) -> i32 {
        link.as_ref().map_or(EMPTY_HEIGHT, |n| n.height)
    }

    /// Must run after any child link of `self` changes and before `self` is
    /// used in a balance computation.
    #[inline]
    pub fn update_height(&mut self) {
        self.height = max(Self::height(&self.left), Self::height(&self.right)) + 1;
    }

    /// Positive when left-heavy, negative when right-heavy.
    #[inline]
    pub fn balance_factor(&self) -> i32 {
        Self::height(&self.left) - Self::height(&self.right)
    }
}
