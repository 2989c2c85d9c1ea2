//! The generic ordered-map contract.

use crate::error::Result;
use crate::map::{self, AvlTreeMap};

/// A map that keeps its keys in sorted order and reports misuse as errors.
///
/// `insert` only adds new keys and `put` only updates existing ones, so a
/// caller always states which of the two it expects.
pub trait OrderedMap<K, V> {
    /// Iterator over the keys in ascending order.
    type Keys<'a>: Iterator<Item = &'a K>
    where
        Self: 'a,
        K: 'a;

    /// Adds a new entry. Fails with `DuplicateKey` if the key is present and
    /// with `InvalidKey` if it cannot be ordered.
    fn insert(&mut self, key: K, value: V) -> Result<()>;

    /// Updates the value of an existing entry. Fails with `KeyNotFound`.
    fn put(&mut self, key: &K, value: V) -> Result<()>;

    /// Fails with `KeyNotFound` if the key is absent.
    fn get(&self, key: &K) -> Result<&V>;

    /// Never fails.
    fn has(&self, key: &K) -> bool;

    /// Removes an entry and returns its value. Fails with `KeyNotFound`.
    fn remove(&mut self, key: &K) -> Result<V>;

    fn size(&self) -> usize;

    fn keys(&self) -> Self::Keys<'_>;
}

impl<K: PartialOrd, V> OrderedMap<K, V> for AvlTreeMap<K, V> {
    type Keys<'a>
        = map::Keys<'a, K, V>
    where
        Self: 'a,
        K: 'a;

    fn insert(&mut self, key: K, value: V) -> Result<()> {
        AvlTreeMap::insert(self, key, value)
    }

    fn put(&mut self, key: &K, value: V) -> Result<()> {
        AvlTreeMap::put(self, key, value)
    }

    fn get(&self, key: &K) -> Result<&V> {
        AvlTreeMap::get(self, key)
    }

    fn has(&self, key: &K) -> bool {
        AvlTreeMap::has(self, key)
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        AvlTreeMap::remove(self, key)
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn keys(&self) -> Self::Keys<'_> {
        AvlTreeMap::keys(self)
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedMap;
    use crate::{AvlTreeMap, MapError};

    fn exercise<M: OrderedMap<u32, String>>(map: &mut M) {
        for key in [3, 1, 2] {
            map.insert(key, key.to_string()).unwrap();
        }
        assert_eq!(map.size(), 3);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(map.insert(2, "again".into()), Err(MapError::DuplicateKey));
        assert_eq!(map.put(&4, "four".into()), Err(MapError::KeyNotFound));
        map.put(&2, "deux".into()).unwrap();
        assert_eq!(map.get(&2).map(String::as_str), Ok("deux"));
        assert_eq!(map.remove(&1), Ok("1".to_string()));
        assert!(!map.has(&1));
        assert_eq!(map.size(), 2);
    }

    #[test]
    fn test_contract_through_trait() {
        let mut map = AvlTreeMap::new();
        exercise(&mut map);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
    }
}
