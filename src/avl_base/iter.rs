use std::iter::FusedIterator;

use super::node::Node;

/// Node visiting order of a traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree. Yields keys in ascending order.
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

/// Ascending iterator over the keys of a tree.
///
/// Holds the chain of nodes whose left subtree has been yielded but whose key
/// has not.
pub struct InOrderIter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> InOrderIter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut n: Option<&'a Node<K>>) {
        while let Some(node) = n {
            self.stack.push(node);
            n = node.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for InOrderIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

pub struct PreOrderIter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> PreOrderIter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, K> Iterator for PreOrderIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // right first so the left subtree pops first
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Each stack entry is a node and whether its children were already pushed.
pub struct PostOrderIter<'a, K> {
    stack: Vec<(&'a Node<K>, bool)>,
    remaining: usize,
}

impl<'a, K> PostOrderIter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        Self {
            stack: root.map(|n| (n, false)).into_iter().collect(),
            remaining: len,
        }
    }
}

impl<'a, K> Iterator for PostOrderIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                self.remaining -= 1;
                return Some(&node.key);
            }
            self.stack.push((node, true));
            if let Some(right) = node.right.as_deref() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left.as_deref() {
                self.stack.push((left, false));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// A traversal picked at runtime by [`TraversalOrder`].
pub enum Traversal<'a, K> {
    InOrder(InOrderIter<'a, K>),
    PreOrder(PreOrderIter<'a, K>),
    PostOrder(PostOrderIter<'a, K>),
}

impl<'a, K> Traversal<'a, K> {
    pub fn order(&self) -> TraversalOrder {
        match self {
            Traversal::InOrder(_) => TraversalOrder::InOrder,
            Traversal::PreOrder(_) => TraversalOrder::PreOrder,
            Traversal::PostOrder(_) => TraversalOrder::PostOrder,
        }
    }
}

impl<'a, K> Iterator for Traversal<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Traversal::InOrder(it) => it.next(),
            Traversal::PreOrder(it) => it.next(),
            Traversal::PostOrder(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Traversal::InOrder(it) => it.size_hint(),
            Traversal::PreOrder(it) => it.size_hint(),
            Traversal::PostOrder(it) => it.size_hint(),
        }
    }
}

// Clone by hand, the derive would demand `K: Clone` for borrowed nodes.
macro_rules! traversal_iter_impls {
    ($($iter:ident),*) => {
        $(
            impl<'a, K> Clone for $iter<'a, K> {
                fn clone(&self) -> Self {
                    Self {
                        stack: self.stack.clone(),
                        remaining: self.remaining,
                    }
                }
            }

            impl<'a, K> ExactSizeIterator for $iter<'a, K> {}

            impl<'a, K> FusedIterator for $iter<'a, K> {}
        )*
    };
}

traversal_iter_impls!(InOrderIter, PreOrderIter, PostOrderIter);

impl<'a, K> Clone for Traversal<'a, K> {
    fn clone(&self) -> Self {
        match self {
            Traversal::InOrder(it) => Traversal::InOrder(it.clone()),
            Traversal::PreOrder(it) => Traversal::PreOrder(it.clone()),
            Traversal::PostOrder(it) => Traversal::PostOrder(it.clone()),
        }
    }
}

impl<'a, K> ExactSizeIterator for Traversal<'a, K> {}

impl<'a, K> FusedIterator for Traversal<'a, K> {}
