use std::iter::FusedIterator;

use super::Node;

/// An iterator over the entries of a map, sorted by key.
///
/// Walks the tree in order with an explicit stack holding the left spine of
/// the subtree that has not been visited yet.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

/// An iterator over the keys of a map, in sorted order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a map, in order by key.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(root: Option<&'a Node<K, V>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Values<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

#[cfg(test)]
mod tests {
    use crate::AvlTreeMap;

    #[test]
    fn test_iter_empty() {
        let map = AvlTreeMap::<i32, i32>::new();
        assert_eq!(map.iter().next(), None);
        assert_eq!(map.keys().len(), 0);
    }

    #[test]
    fn test_iter_sorted() {
        let mut map = AvlTreeMap::new();
        for key in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
            map.insert(key, key * 10).unwrap();
        }
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, (1..=9).collect::<Vec<_>>());
        let values: Vec<_> = map.values().copied().collect();
        assert_eq!(values, (1..=9).map(|k| k * 10).collect::<Vec<_>>());
    }

    #[test]
    fn test_iter_size_hint() {
        let mut map = AvlTreeMap::new();
        for key in 0..10 {
            map.insert(key, ()).unwrap();
        }
        let mut keys = map.keys();
        assert_eq!(keys.len(), 10);
        keys.next();
        keys.next();
        assert_eq!(keys.size_hint(), (8, Some(8)));
        let rest = keys.clone().count();
        assert_eq!(rest, 8);
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn test_iter_fused() {
        let mut map = AvlTreeMap::new();
        map.insert(1, "one").unwrap();
        let mut iter = map.iter();
        assert_eq!(iter.next(), Some((&1, &"one")));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
