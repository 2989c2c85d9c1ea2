use std::collections::VecDeque;
use std::fmt;

use super::{AvlTreeMap, Node};

/// Renders the shape of a map's tree, one line per level.
///
/// Every entry prints as `key:value`. A missing child of a node on the level
/// above prints as `null`, so each line holds exactly two slots per node of
/// the previous line. Created by [`AvlTreeMap::display_tree`].
///
/// ```
/// use avlmap::AvlTreeMap;
/// let mut map = AvlTreeMap::new();
/// map.insert(10, 'a').unwrap();
/// map.insert(20, 'b').unwrap();
/// assert_eq!(map.display_tree().to_string(), "10:a\nnull 20:b\n");
/// ```
pub struct TreeDisplay<'a, K, V> {
    root: Option<&'a Node<K, V>>,
}

impl<K, V> AvlTreeMap<K, V> {
    /// Calls `f` for every entry in level order: the root first, then its
    /// children left to right, then their children.
    pub fn traverse_level_order<F: FnMut(&K, &V)>(&self, mut f: F) {
        let mut queue: VecDeque<&Node<K, V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            f(&node.key, &node.value);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
    }

    /// Returns a printable view of the tree shape, for debugging.
    pub fn display_tree(&self) -> TreeDisplay<'_, K, V> {
        TreeDisplay {
            root: self.root.as_deref(),
        }
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for TreeDisplay<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut level = vec![self.root];
        while level.iter().any(Option::is_some) {
            let mut next = Vec::with_capacity(level.len() * 2);
            for (i, slot) in level.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                match slot {
                    Some(node) => {
                        write!(f, "{}:{}", node.key, node.value)?;
                        next.push(node.left.as_deref());
                        next.push(node.right.as_deref());
                    }
                    None => f.write_str("null")?,
                }
            }
            f.write_str("\n")?;
            level = next;
        }
        Ok(())
    }
}
