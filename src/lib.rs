//! An ordered set of unique keys backed by an AVL height-balanced binary
//! search tree.
//!
//! [`BalancedTree`] supports insertion, removal and membership queries in
//! `O(log n)` time, and in-order traversal through the [`Iter`] cursor, which
//! walks the tree lazily using an explicit stack rather than recursion.
//!
//! ```
//! use balanced_tree::BalancedTree;
//!
//! let mut t = BalancedTree::default();
//! for v in [5, 6, 7, 8, 9, 10, 4, 2, 3, 1] {
//!     t.insert(v);
//! }
//!
//! t.remove(&1);
//! t.remove(&7);
//!
//! let keys = t.iter().copied().collect::<Vec<_>>();
//! assert_eq!(keys, [2, 3, 4, 5, 6, 8, 9, 10]);
//! ```

mod error;
mod iter;
mod node;
mod tree;


pub use error::*;
pub use iter::*;
pub use tree::*;
