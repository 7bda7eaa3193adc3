//! Singly linked list used for the ordered ledgers: transactions,
//! reservations, reviews, search history and per-category shelf lists.
//!
//! Append-heavy with occasional positional access; a tail pointer is not
//! kept, matching the simple head-walk behavior of the original design.

struct Node<T> {
    data: T,
    next: Option<Box<Node<T>>>,
}

pub struct LinkedList<T> {
    head: Option<Box<Node<T>>>,
    size: usize,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self { head: None, size: 0 }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Append to the end of the list.
    pub fn append(&mut self, data: T) {
        let node = Box::new(Node { data, next: None });
        let mut cursor = &mut self.head;
        while let Some(current) = cursor {
            cursor = &mut current.next;
        }
        *cursor = Some(node);
        self.size += 1;
    }

    /// Insert at `index`. Returns `false` when `index` is outside
    /// `[0, len]`, leaving the list untouched.
    pub fn insert_at(&mut self, index: usize, data: T) -> bool {
        if index > self.size {
            return false;
        }
        let mut cursor = &mut self.head;
        for _ in 0..index {
            cursor = &mut cursor.as_mut().unwrap().next;
        }
        let node = Box::new(Node {
            data,
            next: cursor.take(),
        });
        *cursor = Some(node);
        self.size += 1;
        true
    }

    /// Remove the element at `index`, returning it, or `None` when the
    /// index is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.size {
            return None;
        }
        let mut cursor = &mut self.head;
        for _ in 0..index {
            cursor = &mut cursor.as_mut().unwrap().next;
        }
        let node = cursor.take().unwrap();
        *cursor = node.next;
        self.size -= 1;
        Some(node.data)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.size {
            return None;
        }
        let mut cursor = self.head.as_deref();
        for _ in 0..index {
            cursor = cursor.unwrap().next.as_deref();
        }
        cursor.map(|node| &node.data)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.size {
            return None;
        }
        let mut cursor = self.head.as_deref_mut();
        for _ in 0..index {
            cursor = cursor.unwrap().next.as_deref_mut();
        }
        cursor.map(|node| &mut node.data)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.head.as_deref(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            cursor: self.head.as_deref_mut(),
        }
    }
}

impl<T: Clone> LinkedList<T> {
    /// Full materialization in list order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

pub struct Iter<'a, T> {
    cursor: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor?;
        self.cursor = node.next.as_deref();
        Some(&node.data)
    }
}

pub struct IterMut<'a, T> {
    cursor: Option<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cursor.take()?;
        self.cursor = node.next.as_deref_mut();
        Some(&mut node.data)
    }
}

// Dropping node-by-node iteratively; the default recursive drop can blow
// the stack on long ledgers.
impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_get() {
        let mut list = LinkedList::new();
        list.append("a");
        list.append("b");
        list.append("c");
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0), Some(&"a"));
        assert_eq!(list.get(2), Some(&"c"));
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn insert_at_bounds() {
        let mut list = LinkedList::new();
        list.append(1);
        list.append(3);
        assert!(list.insert_at(1, 2));
        assert!(list.insert_at(3, 4));
        assert!(list.insert_at(0, 0));
        assert!(!list.insert_at(99, 5));
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn remove_at_returns_element() {
        let mut list = LinkedList::new();
        for i in 0..5 {
            list.append(i);
        }
        assert_eq!(list.remove_at(0), Some(0));
        assert_eq!(list.remove_at(3), Some(4));
        assert_eq!(list.remove_at(10), None);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut list = LinkedList::new();
        list.append(1);
        list.append(2);
        for v in list.iter_mut() {
            *v *= 10;
        }
        assert_eq!(list.to_vec(), vec![10, 20]);
    }

    #[test]
    fn long_list_drops_without_overflow() {
        let mut list = LinkedList::new();
        for i in 0..200_000 {
            list.insert_at(0, i);
        }
        assert_eq!(list.len(), 200_000);
        drop(list);
    }
}
