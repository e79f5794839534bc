/*!
 * Skew Heap
 * Self-adjusting mergeable min-heap with removal of arbitrary elements
 *
 * Nodes live in a slab and link to each other by index, so callers hold
 * opaque [`HeapHandle`]s instead of pointers into the structure.
 */

use std::cmp::Ordering;
use std::fmt;

/// Three-way comparator supplied by the owner of the heap
///
/// Equal keys are legal; ties are broken consistently but insertion order
/// is not preserved.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Handle to an element stored in a [`SkewHeap`]
///
/// Valid until the element is removed. The slot is then recycled, and a
/// stale handle is indistinguishable from one issued for the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapHandle(usize);

#[derive(Debug)]
struct Node<T> {
    item: T,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Mergeable min-heap ordered by a caller-supplied comparator
///
/// # Performance
/// - Insert and remove are amortized O(log n), via melding only
/// - Peek is O(1) and never restructures the heap
/// - Slab storage reuses freed slots, so a pre-sized heap does not allocate
pub struct SkewHeap<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
    cmp: Comparator<T>,
}

impl<T> SkewHeap<T> {
    /// Create an empty heap
    pub fn new(cmp: Comparator<T>) -> Self {
        Self::with_capacity(0, cmp)
    }

    /// Create an empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize, cmp: Comparator<T>) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            root: None,
            len: 0,
            cmp,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Minimum element, without removing it
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.root.map(|root| &self.node(root).item)
    }

    /// Handle of the minimum element
    #[inline]
    pub fn peek_handle(&self) -> Option<HeapHandle> {
        self.root.map(HeapHandle)
    }

    /// Mutable access to the minimum element
    ///
    /// The heap is not reordered afterwards. A key changed through this
    /// reference only takes effect on later comparisons against this node.
    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        let root = self.root?;
        Some(&mut self.node_mut(root).item)
    }

    /// Element behind `handle`, if it is still stored
    pub fn get(&self, handle: HeapHandle) -> Option<&T> {
        self.nodes.get(handle.0)?.as_ref().map(|node| &node.item)
    }

    /// Insert `item`, returning the handle used to remove it later
    pub fn insert(&mut self, item: T) -> HeapHandle {
        let node = Node {
            item,
            parent: None,
            left: None,
            right: None,
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        self.root = self.merge(self.root, Some(slot));
        if let Some(root) = self.root {
            self.node_mut(root).parent = None;
        }
        self.len += 1;

        HeapHandle(slot)
    }

    /// Remove the element behind `handle`, wherever it sits in the heap
    ///
    /// Returns `None` if the handle's slot is vacant. Slots are recycled by
    /// later inserts, so a handle kept past its element's removal may name
    /// a different element; owners must drop handles when they remove.
    pub fn remove(&mut self, handle: HeapHandle) -> Option<T> {
        let node = self.nodes.get_mut(handle.0)?.take()?;

        let replacement = self.merge(node.left, node.right);
        if let Some(rep) = replacement {
            self.node_mut(rep).parent = node.parent;
        }

        match node.parent {
            Some(parent) => {
                let parent = self.node_mut(parent);
                if parent.left == Some(handle.0) {
                    parent.left = replacement;
                } else {
                    parent.right = replacement;
                }
            }
            None => self.root = replacement,
        }

        self.free.push(handle.0);
        self.len -= 1;

        Some(node.item)
    }

    /// Remove and return the minimum element
    pub fn pop(&mut self) -> Option<T> {
        let root = self.peek_handle()?;
        self.remove(root)
    }

    /// Drop every element, keeping allocated capacity
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Meld two heaps rooted at `a` and `b`
    ///
    /// Walks the right spines top-down, swapping children of every node on
    /// the merge path. The returned root keeps whatever parent link it had;
    /// callers fix it up.
    fn merge(&mut self, a: Option<usize>, b: Option<usize>) -> Option<usize> {
        let (a, b) = match (a, b) {
            (None, other) | (other, None) => return other,
            (Some(a), Some(b)) => (a, b),
        };

        let (root, mut pending) = self.order(a, b);
        let mut cur = root;

        loop {
            let Some(right) = self.node(cur).right else {
                self.attach_swapped(cur, pending);
                break;
            };

            let (lo, hi) = self.order(right, pending);
            self.attach_swapped(cur, lo);
            cur = lo;
            pending = hi;
        }

        Some(root)
    }

    /// Strictly smaller element first; ties favour `b`
    #[inline]
    fn order(&self, a: usize, b: usize) -> (usize, usize) {
        if (self.cmp)(&self.node(a).item, &self.node(b).item) == Ordering::Less {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Make `child` the merged right subtree of `parent`, then swap sides
    #[inline]
    fn attach_swapped(&mut self, parent: usize, child: usize) {
        self.node_mut(child).parent = Some(parent);
        let node = self.node_mut(parent);
        node.right = node.left;
        node.left = Some(child);
    }

    #[inline]
    fn node(&self, slot: usize) -> &Node<T> {
        match self.nodes[slot].as_ref() {
            Some(node) => node,
            None => unreachable!("skew heap link to vacant slot {slot}"),
        }
    }

    #[inline]
    fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match self.nodes[slot].as_mut() {
            Some(node) => node,
            None => unreachable!("skew heap link to vacant slot {slot}"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SkewHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkewHeap")
            .field("len", &self.len)
            .field("min", &self.peek())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_value(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn test_empty_heap() {
        let mut heap = SkewHeap::new(by_value);
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_pop_in_order() {
        let mut heap = SkewHeap::new(by_value);
        for v in [5, 1, 9, 3, 3, 7, -2] {
            heap.insert(v);
        }
        assert_eq!(heap.len(), 7);

        let mut out = Vec::new();
        while let Some(v) = heap.pop() {
            out.push(v);
        }
        assert_eq!(out, vec![-2, 1, 3, 3, 5, 7, 9]);
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut heap = SkewHeap::new(by_value);
        heap.insert(4);
        heap.insert(2);
        assert_eq!(heap.peek(), Some(&2));
        assert_eq!(heap.peek(), Some(&2));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_remove_interior_node() {
        let mut heap = SkewHeap::new(by_value);
        let handles: Vec<_> = (0..10).map(|v| heap.insert(v)).collect();

        assert_eq!(heap.remove(handles[6]), Some(6));
        assert_eq!(heap.remove(handles[0]), Some(0));
        assert_eq!(heap.remove(handles[6]), None);
        assert_eq!(heap.len(), 8);
        assert_eq!(heap.peek(), Some(&1));

        let mut out = Vec::new();
        while let Some(v) = heap.pop() {
            out.push(v);
        }
        assert_eq!(out, vec![1, 2, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut heap = SkewHeap::with_capacity(2, by_value);
        let a = heap.insert(1);
        heap.remove(a);
        let b = heap.insert(2);
        assert_eq!(a, b);
        assert_eq!(heap.get(b), Some(&2));
    }

    #[test]
    fn test_peek_mut_keeps_position() {
        let mut heap = SkewHeap::new(by_value);
        let low = heap.insert(1);
        heap.insert(5);

        *heap.peek_mut().unwrap() = 10;
        // Not re-sifted: the mutated node stays on top until removed
        assert_eq!(heap.peek(), Some(&10));
        assert_eq!(heap.remove(low), Some(10));
        assert_eq!(heap.peek(), Some(&5));
    }
}
