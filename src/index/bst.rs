//! Unbalanced binary search tree keyed by record id.
//!
//! Primary catalog index: ordered enumeration comes for free from an
//! in-order walk. No rebalancing is performed, so sorted insertion order
//! degrades lookups to O(n); acceptable for catalog-sized data sets.

/// A single tree node. Children are boxed to keep the type sized.
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Box<Node<K, V>>>,
    right: Option<Box<Node<K, V>>>,
}

/// Binary search tree mapping `K` to `V`.
pub struct BstIndex<K, V> {
    root: Option<Box<Node<K, V>>>,
    size: usize,
}

impl<K: Ord, V> Default for BstIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> BstIndex<K, V> {
    pub fn new() -> Self {
        Self { root: None, size: 0 }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Insert a key-value pair. If the key already exists its value is
    /// overwritten in place. Returns `true` when a new node was created.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            match key.cmp(&node.key) {
                std::cmp::Ordering::Less => cursor = &mut node.left,
                std::cmp::Ordering::Greater => cursor = &mut node.right,
                std::cmp::Ordering::Equal => {
                    node.value = value;
                    return false;
                }
            }
        }
        *cursor = Some(Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        }));
        self.size += 1;
        true
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                std::cmp::Ordering::Less => node.left.as_deref(),
                std::cmp::Ordering::Greater => node.right.as_deref(),
                std::cmp::Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                std::cmp::Ordering::Less => node.left.as_deref_mut(),
                std::cmp::Ordering::Greater => node.right.as_deref_mut(),
                std::cmp::Ordering::Equal => return Some(&mut node.value),
            };
        }
        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove a key. Returns `true` when a node was actually removed.
    pub fn remove(&mut self, key: &K) -> bool {
        let before = self.size;
        let root = self.root.take();
        self.root = Self::remove_node(root, key, &mut self.size);
        self.size < before
    }

    fn remove_node(
        node: Option<Box<Node<K, V>>>,
        key: &K,
        size: &mut usize,
    ) -> Option<Box<Node<K, V>>> {
        let mut node = node?;
        match key.cmp(&node.key) {
            std::cmp::Ordering::Less => {
                let left = node.left.take();
                node.left = Self::remove_node(left, key, size);
                Some(node)
            }
            std::cmp::Ordering::Greater => {
                let right = node.right.take();
                node.right = Self::remove_node(right, key, size);
                Some(node)
            }
            std::cmp::Ordering::Equal => {
                *size -= 1;
                match (node.left.take(), node.right.take()) {
                    (None, right) => right,
                    (left, None) => left,
                    (Some(left), Some(right)) => {
                        // Two children: splice out the in-order successor
                        // (leftmost node of the right subtree) and adopt
                        // its key and value.
                        let (right, successor) = Self::pop_min(right);
                        let mut successor = successor;
                        successor.left = Some(left);
                        successor.right = right;
                        Some(successor)
                    }
                }
            }
        }
    }

    /// Detach the minimum node of a subtree, returning the remaining
    /// subtree and the detached node (children cleared).
    fn pop_min(mut node: Box<Node<K, V>>) -> (Option<Box<Node<K, V>>>, Box<Node<K, V>>) {
        if node.left.is_none() {
            let right = node.right.take();
            return (right, node);
        }
        let (rest, min) = Self::pop_min(node.left.take().unwrap());
        node.left = rest;
        (Some(node), min)
    }

    /// All entries in ascending key order (in-order traversal).
    pub fn enumerate(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.size);
        Self::inorder(self.root.as_deref(), &mut out);
        out
    }

    fn inorder<'a>(node: Option<&'a Node<K, V>>, out: &mut Vec<(&'a K, &'a V)>) {
        if let Some(node) = node {
            Self::inorder(node.left.as_deref(), out);
            out.push((&node.key, &node.value));
            Self::inorder(node.right.as_deref(), out);
        }
    }
}
