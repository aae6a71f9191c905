use std::{fmt::Debug, iter::FusedIterator};

use crate::{node::Node, Error};

/// A lazy, in-order cursor over the keys of a
/// [`BalancedTree`](crate::BalancedTree).
///
/// The cursor holds an explicit stack of pending nodes: the left spine of the
/// subtree still to be visited. The key at the top of the stack is the current
/// position, and an empty stack is the end of the sequence.
///
/// An [`Iter`] can be driven manually with [`Iter::get()`] and
/// [`Iter::advance()`], compared against [`BalancedTree::end()`], or consumed
/// as an [`Iterator`].
///
/// ```
/// use balanced_tree::BalancedTree;
///
/// let mut t = BalancedTree::default();
/// for v in [3, 1, 2] {
///     t.insert(v);
/// }
///
/// let mut keys = vec![];
/// let mut it = t.begin();
/// while it != t.end() {
///     keys.push(*it.get().unwrap());
///     it.advance().unwrap();
/// }
///
/// assert_eq!(keys, [1, 2, 3]);
/// ```
///
/// [`BalancedTree::end()`]: crate::BalancedTree::end
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        let mut this = Self { stack: vec![] };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a Node<K>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = v.left();
        }
    }

    /// Return the key at the current position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the cursor is at the end of the
    /// sequence.
    pub fn get(&self) -> Result<&'a K, Error> {
        self.stack
            .last()
            .map(|&v| v.key())
            .ok_or(Error::InvalidOperation("dereference of end cursor"))
    }

    /// Move to the next key in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] if the cursor is already at the end
    /// of the sequence.
    pub fn advance(&mut self) -> Result<(), Error> {
        self.next()
            .map(|_| ())
            .ok_or(Error::InvalidOperation("advance of end cursor"))
    }

    /// Returns true when no keys remain.
    pub fn is_end(&self) -> bool {
        self.stack.is_empty()
    }
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<K> Debug for Iter<'_, K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter")
            .field("current", &self.stack.last().map(|v| v.key()))
            .field("pending", &self.stack.len())
            .finish()
    }
}

/// Two cursors are equal when their pending stacks hold the same nodes, in
/// the same order.
///
/// Nodes are compared by identity, so all end cursors are equal to each other,
/// and cursors over two different trees are never equal unless both are at
/// the end.
impl<K> PartialEq for Iter<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.stack.len() == other.stack.len()
            && self
                .stack
                .iter()
                .zip(&other.stack)
                .all(|(a, b)| std::ptr::eq(*a, *b))
    }
}

impl<K> Eq for Iter<'_, K> {}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.right() {
            self.push_subtree(right);
        }

        Some(v.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every pending node is yielded at least once.
        (self.stack.len(), None)
    }
}

impl<K> FusedIterator for Iter<'_, K> {}
