use std::{
    cmp::Ordering,
    fmt::{self, Display},
};

use tracing::trace;

#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    /// Child nodes pointers.
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 0, and an absent subtree is treated as -1 (see
    /// [`height()`]).
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    height: u8,

    key: K,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 0,
        }
    }

    pub(crate) fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        let node = match key.cmp(&self.key) {
            Ordering::Less => self.left(),
            Ordering::Equal => return true,
            Ordering::Greater => self.right(),
        };

        node.map(|v| v.contains(key)).unwrap_or_default()
    }

    /// Call `f` with each key in the subtree rooted at `self`, in ascending
    /// order.
    pub(crate) fn visit_in_order<F>(&self, f: &mut F)
    where
        F: FnMut(&K),
    {
        if let Some(left) = self.left() {
            left.visit_in_order(f);
        }
        f(&self.key);
        if let Some(right) = self.right() {
            right.visit_in_order(f);
        }
    }

    /// Write the keys of this subtree to `w` in ascending order, separated by
    /// a single space.
    ///
    /// `first` is set to false once any key has been written.
    pub(crate) fn print<W>(&self, w: &mut W, first: &mut bool) -> fmt::Result
    where
        W: fmt::Write,
        K: Display,
    {
        if let Some(left) = self.left() {
            left.print(w, first)?;
        }

        if !*first {
            w.write_char(' ')?;
        }
        *first = false;
        write!(w, "{}", self.key)?;

        if let Some(right) = self.right() {
            right.print(w, first)?;
        }

        Ok(())
    }

    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }
}

/// Returns the cached height of the subtree rooted at `n`, or -1 if the
/// subtree is empty.
pub(crate) fn height<K>(n: Option<&Node<K>>) -> i16 {
    n.map(|v| v.height() as i16).unwrap_or(-1)
}

fn update_height<K>(n: &mut Node<K>) {
    // Correctness: a child height is at most 254, so the result fits in a u8.
    n.height = (height(n.left()).max(height(n.right())) + 1) as u8;
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
pub(crate) fn balance<K>(n: &Node<K>) -> i16 {
    height(n.left()) - height(n.right())
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// A subtree with no right child cannot be rotated and is left unchanged.
fn rotate_left<K>(x: &mut Box<Node<K>>) {
    let Some(mut p) = x.right.take() else {
        return;
    };
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_height(&mut p);

    x.left = Some(p);
    update_height(x);

    trace!(height = x.height, "rotated subtree left");
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// A subtree with no left child cannot be rotated and is left unchanged.
fn rotate_right<K>(y: &mut Box<Node<K>>) {
    let Some(mut p) = y.left.take() else {
        return;
    };
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);

    y.right = Some(p);
    update_height(y);

    trace!(height = y.height, "rotated subtree right");
}

/// Refresh the height of `v` from its children, then restore the AVL
/// invariant of the subtree rooted at `v` with at most one single or double
/// rotation.
///
/// Both children must already satisfy the invariant, and the balance factor of
/// `v` must be within [-2, 2].
fn rebalance<K>(v: &mut Box<Node<K>>) {
    // The height must be current before the balance factor is evaluated.
    update_height(v);

    match balance(v) {
        2.. if v.left().map(balance).unwrap_or_default() >= 0 => {
            rotate_right(v);
        }
        2.. => {
            if let Some(left) = v.left.as_mut() {
                rotate_left(left);
            }
            rotate_right(v);
        }
        ..=-2 if v.right().map(balance).unwrap_or_default() <= 0 => {
            rotate_left(v);
        }
        ..=-2 => {
            if let Some(right) = v.right.as_mut() {
                rotate_right(right);
            }
            rotate_left(v);
        }
        -1..=1 => { /* balanced */ }
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1 after a single insert or remove.
    debug_assert!(balance(v).abs() <= 1);
}

/// Insert `key` into the subtree linked at `slot`, rebalancing each node on
/// the path back up.
///
/// Returns false (leaving the subtree untouched) if `key` is already present.
pub(crate) fn insert<K>(slot: &mut Option<Box<Node<K>>>, key: K) -> bool
where
    K: Ord,
{
    match *slot {
        Some(ref mut node) => {
            let inserted = match key.cmp(&node.key) {
                Ordering::Less => insert(&mut node.left, key),
                Ordering::Equal => return false,
                Ordering::Greater => insert(&mut node.right, key),
            };

            // The subtree structure has not been modified when the key
            // already existed, so it does not require rebalancing.
            if inserted {
                rebalance(node);
            }

            inserted
        }
        None => {
            *slot = Some(Box::new(Node::new(key)));
            true
        }
    }
}

/// Remove `key` from the subtree linked at `slot`, rebalancing each node on
/// the path back up.
///
/// Returns [`None`] if the key is not found.
pub(crate) fn remove<K>(slot: &mut Option<Box<Node<K>>>, key: &K) -> Option<K>
where
    K: Ord,
{
    let node = slot.as_mut()?;

    let removed = match key.cmp(&node.key) {
        Ordering::Less => remove(&mut node.left, key)?,
        Ordering::Greater => remove(&mut node.right, key)?,
        Ordering::Equal => unlink(slot)?,
    };

    // Whatever now occupies the slot (the untouched node, its surviving child
    // or the spliced successor) is refreshed and rebalanced.
    if let Some(node) = slot.as_mut() {
        rebalance(node);
    }

    Some(removed)
}

/// Unlink the node in `slot`, replacing it with the subtree that preserves the
/// binary search property, and return the key it held.
///
/// This node may have 0, 1 or 2 child node(s):
///
/// ```text
///                          +----------+
///                          |  parent  |
///                          +----------+
///                                |
///                                v
///                          +----------+
///                     +----|   slot   |----+
///                     |    +----------+    |
///                     |                    |
///                     v                    v
///               +-----------+       +------------+
///               | slot.left |       | slot.right |
///               +-----------+       +------------+
/// ```
///
/// With no children the slot is emptied, and with one child that child takes
/// its place. With two children the in-order successor (the left-most node of
/// "slot.right") is detached and adopts both subtrees.
fn unlink<K>(slot: &mut Option<Box<Node<K>>>) -> Option<K>
where
    K: Ord,
{
    let mut old = slot.take()?;

    *slot = match (old.take_left(), old.take_right()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let (mut successor, right) = extract_subtree_min(right);

            // The successor was detached with no children.
            debug_assert!(successor.left.is_none());
            debug_assert!(successor.right.is_none());

            successor.left = Some(left);
            successor.right = right;

            trace!("spliced in-order successor");
            Some(successor)
        }
    };

    Some((*old).into_key())
}

/// Detach the node holding the minimum key of the subtree rooted at `root`.
///
/// Returns the detached node (with no children) and the remaining subtree, in
/// which the right child of the detached node takes its former place. Every
/// ancestor of the detached node is rebalanced on the way back up.
fn extract_subtree_min<K>(mut root: Box<Node<K>>) -> (Box<Node<K>>, Option<Box<Node<K>>>) {
    match root.take_left() {
        Some(left) => {
            // Descend the left spine.
            let (min, rest) = extract_subtree_min(left);
            root.left = rest;
            rebalance(&mut root);
            (min, Some(root))
        }
        None => {
            // "root" is the end of the left spine.
            //
            // ```text
            //                 6
            //                / \
            //    here ->   <4>   7
            //                \
            //                 5
            // ```
            //
            // Unlink the right node of it, which will take its place (if any).
            let rest = root.take_right();
            (root, rest)
        }
    }
}

/// Release the subtree rooted at `node` in post-order: the left subtree, then
/// the right subtree, then the node itself.
///
/// Returns the number of nodes released.
pub(crate) fn destroy<K>(node: Option<Box<Node<K>>>) -> usize {
    let Some(mut node) = node else {
        return 0;
    };

    let released = destroy(node.take_left()) + destroy(node.take_right());
    drop(node);

    released + 1
}
