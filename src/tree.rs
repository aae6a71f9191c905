use std::fmt::{self, Debug, Display};

use tracing::{debug, trace};

use crate::{
    iter::{IntoIter, Iter},
    node::{self, Node},
};

/// An ordered set of unique keys, stored in an AVL height-balanced binary
/// search tree.
///
/// Keys are ordered by their [`Ord`] implementation. Inserting a key that is
/// already present, or removing a key that is absent, leaves the tree
/// unchanged.
///
/// ```
/// use balanced_tree::BalancedTree;
///
/// let mut t = BalancedTree::default();
/// for v in [5, 6, 7, 8, 9, 10, 4, 2, 3, 1] {
///     t.insert(v);
/// }
///
/// assert!(t.contains(&7));
/// assert!(t.remove(&7));
/// assert!(!t.contains(&7));
///
/// assert_eq!(t.to_string(), "1 2 3 4 5 6 8 9 10");
/// ```
#[derive(Clone)]
pub struct BalancedTree<K> {
    root: Option<Box<Node<K>>>,
    len: usize,
}

impl<K> Default for BalancedTree<K> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K> BalancedTree<K>
where
    K: Ord,
{
    /// Insert `key` into the tree, returning true if it was not already
    /// present.
    ///
    /// Inserting a key that already exists is a no-op.
    pub fn insert(&mut self, key: K) -> bool {
        let inserted = node::insert(&mut self.root, key);
        if inserted {
            self.len += 1;
        }

        trace!(inserted, len = self.len, "insert");
        inserted
    }

    /// Remove `key` from the tree, returning true if it was present.
    ///
    /// Removing a key that does not exist is a no-op.
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Remove `key` from the tree, returning the stored key if it was present.
    ///
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let mut t = BalancedTree::default();
    /// t.insert(String::from("bananas"));
    ///
    /// assert_eq!(t.take(&"bananas".to_string()).as_deref(), Some("bananas"));
    /// assert_eq!(t.take(&"bananas".to_string()), None);
    /// ```
    pub fn take(&mut self, key: &K) -> Option<K> {
        let removed = node::remove(&mut self.root, key);
        if removed.is_some() {
            self.len -= 1;
        }

        trace!(removed = removed.is_some(), len = self.len, "remove");
        removed
    }

    /// Returns true if `key` is present in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.root
            .as_ref()
            .map(|v| v.contains(key))
            .unwrap_or_default()
    }
}

impl<K> BalancedTree<K> {
    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the tree, or [`None`] when the tree is empty.
    ///
    /// A tree holding a single key has a height of 0.
    pub fn height(&self) -> Option<u8> {
        self.root.as_deref().map(Node::height)
    }

    /// Return a cursor positioned at the smallest key in the tree, or at the
    /// end if the tree is empty.
    pub fn begin(&self) -> Iter<'_, K> {
        Iter::new(self.root.as_deref())
    }

    /// Return a cursor positioned past the largest key in the tree.
    pub fn end(&self) -> Iter<'_, K> {
        Iter::new(None)
    }

    /// Iterate over the keys in the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        self.begin()
    }

    /// Call `f` with each key in the tree, in ascending order.
    ///
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let mut t = BalancedTree::default();
    /// for v in [3, 1, 2] {
    ///     t.insert(v);
    /// }
    ///
    /// let mut sum = 0;
    /// t.visit_in_order(|v| sum += v);
    /// assert_eq!(sum, 6);
    /// ```
    pub fn visit_in_order<F>(&self, mut f: F)
    where
        F: FnMut(&K),
    {
        if let Some(root) = self.root.as_deref() {
            root.visit_in_order(&mut f);
        }
    }

    /// Write all keys to `w` in ascending order, separated by a single space.
    ///
    /// Nothing is written for an empty tree.
    pub fn print<W>(&self, w: &mut W) -> fmt::Result
    where
        W: fmt::Write,
        K: Display,
    {
        match self.root.as_deref() {
            Some(root) => root.print(w, &mut true),
            None => Ok(()),
        }
    }

    /// Remove all keys from the tree.
    pub fn clear(&mut self) {
        let released = self.release();
        debug!(released, "cleared tree");
    }

    /// Release all nodes in post-order, returning the number released.
    fn release(&mut self) -> usize {
        let released = node::destroy(self.root.take());
        debug_assert_eq!(released, self.len);
        self.len = 0;
        released
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }
}

impl<K> Drop for BalancedTree<K> {
    fn drop(&mut self) {
        if self.root.is_some() {
            let released = self.release();
            debug!(released, "released tree");
        }
    }
}

impl<K> Debug for BalancedTree<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Display for BalancedTree<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}

impl<'a, K> IntoIterator for &'a BalancedTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> IntoIterator for BalancedTree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(mut self) -> Self::IntoIter {
        let len = std::mem::take(&mut self.len);
        IntoIter::new(self.root.take(), len)
    }
}
