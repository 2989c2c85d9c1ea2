//! An ordered map implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::{MapError, Result};

mod iter;
mod printer;

pub use iter::{Iter, Keys, Values};
pub use printer::TreeDisplay;

/// An ordered map implemented with an AVL tree.
///
/// Unlike `std::collections::BTreeMap`, insertion and update are separate,
/// checked operations: `insert` refuses keys that are already present and
/// `put` refuses keys that are missing.
///
/// ```
/// use avlmap::{AvlTreeMap, MapError};
/// let mut map = AvlTreeMap::new();
/// map.insert(0, "zero").unwrap();
/// map.insert(1, "one").unwrap();
/// assert_eq!(map.insert(1, "uno"), Err(MapError::DuplicateKey));
/// map.put(&1, "uno").unwrap();
/// assert_eq!(map.get(&1), Ok(&"uno"));
/// assert_eq!(map.remove(&0), Ok("zero"));
/// assert!(!map.has(&0));
/// ```
#[derive(Clone)]
pub struct AvlTreeMap<K, V> {
    root: Link<K, V>,
    num_nodes: usize,
}

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    height: isize,
}

type Link<K, V> = Option<Box<Node<K, V>>>;

impl<K, V> AvlTreeMap<K, V> {
    /// Creates an empty map.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree, counted in edges from the root to the
    /// deepest leaf. A single entry has height 0, an empty map has none.
    pub fn height(&self) -> Option<usize> {
        self.root
            .as_deref()
            .and_then(|root| usize::try_from(root.height).ok())
    }

    /// Clears the map, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.num_nodes)
    }
}

impl<K: PartialOrd, V> AvlTreeMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        self.find(key)
            .map(|node| &node.value)
            .map_err(|err| rejected("get", err))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        self.find_mut(key)
            .map(|node| &mut node.value)
            .map_err(|err| rejected("get_mut", err))
    }

    /// Returns true if the map contains a value for the specified key.
    /// A key that cannot be compared is never contained.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        self.find(key).is_ok()
    }

    /// Inserts a new key-value pair into the map.
    /// Fails without touching the map if the key is already present.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        check_key(&key)
            .and_then(|()| Node::insert(&mut self.root, key, value))
            .map_err(|err| rejected("insert", err))?;
        self.num_nodes += 1;
        Ok(())
    }

    /// Replaces the value of an existing key.
    /// Fails without touching the map if the key is not present.
    pub fn put<Q>(&mut self, key: &Q, value: V) -> Result<()>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        let node = self.find_mut(key).map_err(|err| rejected("put", err))?;
        node.value = value;
        Ok(())
    }

    /// Removes a key from the map, returning the value at the key.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        let value = check_key(key)
            .and_then(|()| Node::remove(&mut self.root, key))
            .map_err(|err| rejected("remove", err))?;
        debug_assert!(self.num_nodes >= 1);
        self.num_nodes -= 1;
        Ok(value)
    }

    /// Walks the whole tree and panics if any AVL tree invariant is violated.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let num_nodes = Node::check_consistency(&self.root);
        assert_eq!(num_nodes, self.num_nodes, "node count out of sync");

        // Local child checks do not catch keys misplaced further down
        let mut keys = self.keys();
        if let Some(mut prev) = keys.next() {
            for key in keys {
                assert!(prev < key, "keys out of order");
                prev = key;
            }
        }
    }

    fn find<Q>(&self, key: &Q) -> Result<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        check_key(key)?;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match compare(key, &node.key)? {
                Ordering::Equal => return Ok(node),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        Err(MapError::KeyNotFound)
    }

    fn find_mut<Q>(&mut self, key: &Q) -> Result<&mut Node<K, V>>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        check_key(key)?;
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match compare(key, &node.key)? {
                Ordering::Equal => return Ok(node),
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        Err(MapError::KeyNotFound)
    }
}

impl<K, V> Default for AvlTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AvlTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for AvlTreeMap<K, V> {}

impl<'a, K, V> IntoIterator for &'a AvlTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn rejected(op: &'static str, err: MapError) -> MapError {
    debug!(op, error = %err, "map operation rejected");
    err
}

// A key that is not even comparable with itself (NaN) has no place in the order.
fn check_key<Q: PartialOrd + ?Sized>(key: &Q) -> Result<()> {
    match key.partial_cmp(key) {
        Some(Ordering::Equal) => Ok(()),
        _ => Err(MapError::InvalidKey),
    }
}

fn compare<Q, K>(key: &Q, other: &K) -> Result<Ordering>
where
    K: Borrow<Q>,
    Q: PartialOrd + ?Sized,
{
    key.partial_cmp(other.borrow()).ok_or(MapError::InvalidKey)
}

fn height<K, V>(link: &Link<K, V>) -> isize {
    link.as_ref().map_or(-1, |node| node.height)
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
            height: 0,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    fn balance(&self) -> isize {
        height(&self.left) - height(&self.right)
    }

    /// Lifts the left child above `node` and returns it as the new subtree top.
    /// Returns `node` unchanged if it has no left child.
    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        match node.left.take() {
            Some(mut new_top) => {
                node.left = new_top.right.take();
                node.update_height();
                new_top.right = Some(node);
                new_top.update_height();
                trace!(direction = "right", height = new_top.height, "rotated subtree");
                new_top
            }
            None => node,
        }
    }

    /// Mirror image of `rotate_right`.
    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        match node.right.take() {
            Some(mut new_top) => {
                node.right = new_top.left.take();
                node.update_height();
                new_top.left = Some(node);
                new_top.update_height();
                trace!(direction = "left", height = new_top.height, "rotated subtree");
                new_top
            }
            None => node,
        }
    }

    /// Restores balance at a node on the insertion path.
    /// `inserted` tells how the new key compared to the key of the child it was
    /// inserted under, which tells a straight imbalance from a zig-zag one.
    fn rebalance_after_insert(mut node: Box<Self>, inserted: Ordering) -> Box<Self> {
        let balance = node.balance();
        debug_assert!(balance.abs() <= 2);
        match inserted {
            Ordering::Less if balance > 1 => Self::rotate_right(node),
            Ordering::Greater if balance < -1 => Self::rotate_left(node),
            Ordering::Greater if balance > 1 => {
                trace!(case = "left-right", "rebalancing after insert");
                node.left = node.left.take().map(Self::rotate_left);
                Self::rotate_right(node)
            }
            Ordering::Less if balance < -1 => {
                trace!(case = "right-left", "rebalancing after insert");
                node.right = node.right.take().map(Self::rotate_right);
                Self::rotate_left(node)
            }
            _ => node,
        }
    }

    /// Restores balance at a node on the removal path.
    /// Only the heavy child's own balance decides between single and double
    /// rotation; a level child gets the single rotation.
    fn rebalance_after_delete(mut node: Box<Self>) -> Box<Self> {
        let balance = node.balance();
        debug_assert!(balance.abs() <= 2);
        if balance > 1 {
            if node.left.as_ref().is_some_and(|left| left.balance() < 0) {
                trace!(case = "left-right", "rebalancing after remove");
                node.left = node.left.take().map(Self::rotate_left);
            }
            Self::rotate_right(node)
        } else if balance < -1 {
            if node.right.as_ref().is_some_and(|right| right.balance() > 0) {
                trace!(case = "right-left", "rebalancing after remove");
                node.right = node.right.take().map(Self::rotate_right);
            }
            Self::rotate_left(node)
        } else {
            node
        }
    }

    // Recomputes the height of the subtree top and writes the rebalanced
    // subtree back into the slot it came from.
    fn rebuild(link: &mut Link<K, V>, rebalance: impl FnOnce(Box<Self>) -> Box<Self>) {
        if let Some(mut node) = link.take() {
            node.update_height();
            *link = Some(rebalance(node));
        }
    }

    /// Detaches the maximum node of the subtree.
    /// Returns the remaining, rebalanced subtree and the detached node.
    fn detach_max(mut node: Box<Self>) -> (Link<K, V>, Box<Self>) {
        match node.right.take() {
            None => (node.left.take(), node),
            Some(right) => {
                let (rest, max) = Self::detach_max(right);
                node.right = rest;
                node.update_height();
                (Some(Self::rebalance_after_delete(node)), max)
            }
        }
    }

    /// Removes `node` from the top of its subtree.
    /// Returns the subtree that takes its place and the removed value.
    fn unlink(mut node: Box<Self>) -> (Link<K, V>, V) {
        match (node.left.take(), node.right.take()) {
            (left, None) => (left, node.value),
            (None, right) => (right, node.value),
            (Some(left), Some(right)) => {
                // Keep the node in place, take over key and value of the predecessor
                let (rest, predecessor) = Self::detach_max(left);
                node.left = rest;
                node.right = Some(right);
                node.key = predecessor.key;
                let value = mem::replace(&mut node.value, predecessor.value);
                node.update_height();
                (Some(Self::rebalance_after_delete(node)), value)
            }
        }
    }
}

impl<K: PartialOrd, V> Node<K, V> {
    /// Inserts below `link`, rebalancing on the way back up.
    /// Returns how the key compared to the key at the top of `link`,
    /// `Equal` if the new leaf itself became the top.
    fn insert(link: &mut Link<K, V>, key: K, value: V) -> Result<Ordering> {
        let (side, below) = match link {
            None => {
                *link = Some(Self::leaf(key, value));
                return Ok(Ordering::Equal);
            }
            Some(node) => {
                let side = compare(&key, &node.key)?;
                let below = match side {
                    Ordering::Less => Self::insert(&mut node.left, key, value)?,
                    Ordering::Greater => Self::insert(&mut node.right, key, value)?,
                    Ordering::Equal => return Err(MapError::DuplicateKey),
                };
                (side, below)
            }
        };
        Self::rebuild(link, |node| Self::rebalance_after_insert(node, below));
        Ok(side)
    }

    /// Removes the entry for `key` below `link`, rebalancing on the way back up.
    fn remove<Q>(link: &mut Link<K, V>, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        let node = link.as_mut().ok_or(MapError::KeyNotFound)?;
        let value = match compare(key, &node.key)? {
            Ordering::Less => Self::remove(&mut node.left, key)?,
            Ordering::Greater => Self::remove(&mut node.right, key)?,
            Ordering::Equal => {
                let (rest, value) = match link.take() {
                    Some(target) => Self::unlink(target),
                    None => return Err(MapError::KeyNotFound),
                };
                *link = rest;
                return Ok(value);
            }
        };
        Self::rebuild(link, Self::rebalance_after_delete);
        Ok(value)
    }

    // Returns the number of nodes in the subtree.
    #[cfg(any(test, feature = "consistency_check"))]
    fn check_consistency(link: &Link<K, V>) -> usize {
        let Some(node) = link.as_deref() else {
            return 0;
        };

        let mut num_nodes = 1;
        if let Some(left) = node.left.as_deref() {
            assert!(left.key < node.key, "left child not less than parent");
            num_nodes += Self::check_consistency(&node.left);
        }
        if let Some(right) = node.right.as_deref() {
            assert!(right.key > node.key, "right child not greater than parent");
            num_nodes += Self::check_consistency(&node.right);
        }

        // Check height
        let expected = 1 + cmp::max(height(&node.left), height(&node.right));
        assert_eq!(node.height, expected, "stale height");

        // Check AVL condition (nearly balance)
        assert!(node.balance().abs() <= 1, "subtree out of balance");

        num_nodes
    }
}
