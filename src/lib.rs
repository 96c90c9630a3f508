//! A height-balanced binary search tree (AVL tree) over any totally ordered
//! key type.
//!
//! [`avl_set::OrderedBalancedTree`] is the entry point. The generic engine it
//! wraps lives in [`avl_base`] and can be configured through
//! [`avl_base::tree_traits::AvlParams`], e.g. to reject duplicate keys or to
//! self-verify after every mutation.
//!
//! ```
//! use avl_index::avl_set::OrderedBalancedTree;
//!
//! let mut tree = OrderedBalancedTree::new();
//! for key in ["A", "B", "C", "D", "E"] {
//!     tree.insert(key);
//! }
//!
//! let pre: Vec<_> = tree.pre_order().copied().collect();
//! assert_eq!(pre, ["B", "A", "D", "C", "E"]);
//! ```

pub mod avl_base;
pub mod avl_set;
