/*!
 * Run List
 * FIFO list of processes linked by PID
 *
 * Links are kept in a per-list table rather than inside the process
 * descriptor. Append, removal by identity and membership tests are O(1).
 */

use crate::core::types::Pid;
use ahash::RandomState;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
struct Link {
    prev: Option<Pid>,
    next: Option<Pid>,
}

/// Doubly linked FIFO of PIDs
#[derive(Debug, Clone)]
pub struct RunList {
    links: HashMap<Pid, Link, RandomState>,
    head: Option<Pid>,
    tail: Option<Pid>,
}

impl Default for RunList {
    fn default() -> Self {
        Self::new()
    }
}

impl RunList {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a list with link storage for `capacity` members
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    pub fn contains(&self, pid: Pid) -> bool {
        self.links.contains_key(&pid)
    }

    /// Oldest member
    #[inline]
    pub fn front(&self) -> Option<Pid> {
        self.head
    }

    /// Append `pid` at the tail
    ///
    /// Returns `false` and leaves the list untouched if `pid` is already linked.
    pub fn push_back(&mut self, pid: Pid) -> bool {
        if self.links.contains_key(&pid) {
            return false;
        }

        self.links.insert(
            pid,
            Link {
                prev: self.tail,
                next: None,
            },
        );

        match self.tail {
            Some(tail) => self.link_mut(tail).next = Some(pid),
            None => self.head = Some(pid),
        }
        self.tail = Some(pid);
        true
    }

    /// Unlink `pid`; returns `false` if it was not a member
    pub fn remove(&mut self, pid: Pid) -> bool {
        let Some(link) = self.links.remove(&pid) else {
            return false;
        };

        match link.prev {
            Some(prev) => self.link_mut(prev).next = link.next,
            None => self.head = link.next,
        }
        match link.next {
            Some(next) => self.link_mut(next).prev = link.prev,
            None => self.tail = link.prev,
        }
        true
    }

    /// Drop all members, keeping allocated capacity
    pub fn clear(&mut self) {
        self.links.clear();
        self.head = None;
        self.tail = None;
    }

    /// Members from head to tail
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn link_mut(&mut self, pid: Pid) -> &mut Link {
        match self.links.get_mut(&pid) {
            Some(link) => link,
            None => unreachable!("run list link to unlinked pid {pid}"),
        }
    }
}

/// Head-to-tail iterator over a [`RunList`]
pub struct Iter<'a> {
    list: &'a RunList,
    cursor: Option<Pid>,
}

impl Iterator for Iter<'_> {
    type Item = Pid;

    fn next(&mut self) -> Option<Pid> {
        let pid = self.cursor?;
        self.cursor = self.list.links.get(&pid).and_then(|link| link.next);
        Some(pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut list = RunList::new();
        assert!(list.push_back(1));
        assert!(list.push_back(2));
        assert!(list.push_back(3));

        assert_eq!(list.front(), Some(1));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_push_rejected() {
        let mut list = RunList::new();
        assert!(list.push_back(4));
        assert!(!list.push_back(4));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut list = RunList::with_capacity(8);
        for pid in 1..=5 {
            list.push_back(pid);
        }

        assert!(list.remove(3));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 4, 5]);
        assert!(list.remove(1));
        assert_eq!(list.front(), Some(2));
        assert!(list.remove(5));
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![2, 4]);
        assert!(!list.remove(5));

        list.push_back(6);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![2, 4, 6]);
    }

    #[test]
    fn test_remove_last_member_empties_list() {
        let mut list = RunList::new();
        list.push_back(9);
        assert!(list.remove(9));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert!(!list.contains(9));
    }
}
