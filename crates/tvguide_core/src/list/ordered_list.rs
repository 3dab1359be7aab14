//! Arena-backed doubly linked list.
//!
//! Nodes live in one `Vec` and link to each other by slot index. Removed
//! slots go to a free list and are reused by later insertions, so a long run
//! of insert/remove cycles does not grow storage.
//!
//! # Invariants
//! - A slot is either linked (holds `Some(value)`) or on the free list.
//! - `free` always has capacity for every slot, so releasing never allocates.
//! - `insert_before` searches its anchor head to tail; `insert_after`
//!   searches tail to head. Anchors are unique identities, so both directions
//!   find the same node.

use super::{Identity, ListError, ListResult};
use std::collections::HashSet;

#[derive(Debug)]
struct Node<T> {
    value: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Duplicate-free doubly linked list keyed by `Identity`.
///
/// Dropping the list drops any values still stored in it.
#[derive(Debug)]
pub struct OrderedList<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }
}

// `is_empty` surfaces count/endpoint corruption, so it returns a `ListResult`.
#[allow(clippy::len_without_is_empty)]
impl<T: Identity> OrderedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tracked element count without walking the chain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the list holds no values.
    ///
    /// # Errors
    /// - `InvariantViolation` when the count disagrees with the endpoints.
    pub fn is_empty(&self) -> ListResult<bool> {
        match (self.len, self.head, self.tail) {
            (0, None, None) => Ok(true),
            (len, Some(_), Some(_)) if len > 0 => Ok(false),
            (len, head, tail) => Err(ListError::InvariantViolation(format!(
                "len={len} head={head:?} tail={tail:?}"
            ))),
        }
    }

    /// Inserts `value` immediately before the node holding `anchor`.
    ///
    /// On an empty list `anchor` must be `None` and `value` becomes the only
    /// element. On a non-empty list the anchor is located head to tail.
    ///
    /// # Errors
    /// - `DuplicateValue` when `value`'s identity is already stored.
    /// - `AnchorNotFound` when `anchor` is not stored, or is `None` on a
    ///   non-empty list, or is `Some` on an empty list.
    /// - `AllocationFailure` when node storage cannot grow.
    pub fn insert_before(&mut self, anchor: Option<T::Id>, value: T) -> ListResult<()> {
        if self.is_empty()? {
            return match anchor {
                None => self.insert_sole(value),
                Some(_) => Err(ListError::AnchorNotFound),
            };
        }
        self.ensure_absent(&value)?;
        let anchor = anchor.ok_or(ListError::AnchorNotFound)?;
        let at = self
            .position_from_head(anchor)?
            .ok_or(ListError::AnchorNotFound)?;

        let prev = self.node(at)?.prev;
        let index = self.allocate(value, prev, Some(at))?;
        self.node_mut(at)?.prev = Some(index);
        match prev {
            Some(prev) => self.node_mut(prev)?.next = Some(index),
            None => self.head = Some(index),
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts `value` immediately after the node holding `anchor`.
    ///
    /// Same contract as `insert_before`, except the anchor is located tail to
    /// head.
    pub fn insert_after(&mut self, anchor: Option<T::Id>, value: T) -> ListResult<()> {
        if self.is_empty()? {
            return match anchor {
                None => self.insert_sole(value),
                Some(_) => Err(ListError::AnchorNotFound),
            };
        }
        self.ensure_absent(&value)?;
        let anchor = anchor.ok_or(ListError::AnchorNotFound)?;
        let at = self
            .position_from_tail(anchor)?
            .ok_or(ListError::AnchorNotFound)?;

        let next = self.node(at)?.next;
        let index = self.allocate(value, Some(at), next)?;
        self.node_mut(at)?.next = Some(index);
        match next {
            Some(next) => self.node_mut(next)?.prev = Some(index),
            None => self.tail = Some(index),
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts `value` as the new head.
    pub fn insert_first(&mut self, value: T) -> ListResult<()> {
        let anchor = self.endpoint_identity(self.head)?;
        self.insert_before(anchor, value)
    }

    /// Inserts `value` as the new tail.
    pub fn insert_last(&mut self, value: T) -> ListResult<()> {
        let anchor = self.endpoint_identity(self.tail)?;
        self.insert_after(anchor, value)
    }

    /// Removes and returns the head value.
    ///
    /// # Errors
    /// - `Empty` when there is nothing to remove.
    pub fn remove_first(&mut self) -> ListResult<T> {
        if self.is_empty()? {
            return Err(ListError::Empty);
        }
        let head = self.head.ok_or(ListError::Empty)?;
        self.unlink(head)
    }

    /// Removes and returns the tail value in constant time.
    ///
    /// # Errors
    /// - `Empty` when there is nothing to remove.
    pub fn remove_last(&mut self) -> ListResult<T> {
        if self.is_empty()? {
            return Err(ListError::Empty);
        }
        let tail = self.tail.ok_or(ListError::Empty)?;
        self.unlink(tail)
    }

    /// Removes the value whose identity equals `id`, searching head to tail.
    ///
    /// # Errors
    /// - `Empty` on an empty list, so callers can tell it apart from a miss.
    /// - `NotFound` when no stored value has that identity.
    pub fn remove_value(&mut self, id: T::Id) -> ListResult<T> {
        if self.is_empty()? {
            return Err(ListError::Empty);
        }
        let index = self.position_from_head(id)?.ok_or(ListError::NotFound)?;
        self.unlink(index)
    }

    pub fn peek_first(&self) -> Option<&T> {
        self.value_ref(self.head)
    }

    pub fn peek_last(&self) -> Option<&T> {
        self.value_ref(self.tail)
    }

    /// Returns whether a value with identity `id` is stored.
    pub fn find(&self, id: T::Id) -> bool {
        matches!(self.position_from_head(id), Ok(Some(_)))
    }

    /// Removes and drops every value, then releases node storage.
    ///
    /// # Errors
    /// - `InvariantViolation` when the list cannot be emptied.
    pub fn clear(&mut self) -> ListResult<()> {
        while !self.is_empty()? {
            let remaining = self.len;
            self.remove_first().map_err(|err| {
                ListError::InvariantViolation(format!(
                    "clear stopped with {remaining} values left: {err}"
                ))
            })?;
        }
        if self.len != 0 {
            return Err(ListError::InvariantViolation(format!(
                "clear finished with len={}",
                self.len
            )));
        }
        self.nodes.clear();
        self.free.clear();
        Ok(())
    }

    /// Borrowing iterator, head to tail (reversible).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Walks the whole chain and checks every structural invariant.
    ///
    /// Checks back links, reachable count, tail position and identity
    /// uniqueness.
    pub fn verify_links(&self) -> ListResult<()> {
        self.is_empty()?;

        let mut seen = HashSet::with_capacity(self.len);
        let mut visited = 0usize;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            visited += 1;
            if visited > self.len {
                return Err(ListError::InvariantViolation(format!(
                    "more than {} nodes reachable from head",
                    self.len
                )));
            }
            let node = self.node(index)?;
            if node.prev != prev {
                return Err(ListError::InvariantViolation(format!(
                    "slot {index} links back to {:?}, expected {prev:?}",
                    node.prev
                )));
            }
            let value = node.value.as_ref().ok_or_else(|| vacant_slot(index))?;
            if !seen.insert(value.identity()) {
                return Err(ListError::InvariantViolation(format!(
                    "identity {:?} stored twice",
                    value.identity()
                )));
            }
            prev = Some(index);
            cursor = node.next;
        }

        if visited != self.len {
            return Err(ListError::InvariantViolation(format!(
                "{visited} nodes reachable but len={}",
                self.len
            )));
        }
        if prev != self.tail {
            return Err(ListError::InvariantViolation(format!(
                "chain ends at {prev:?} but tail={:?}",
                self.tail
            )));
        }
        Ok(())
    }

    fn insert_sole(&mut self, value: T) -> ListResult<()> {
        let index = self.allocate(value, None, None)?;
        self.head = Some(index);
        self.tail = Some(index);
        self.len = 1;
        Ok(())
    }

    fn ensure_absent(&self, value: &T) -> ListResult<()> {
        match self.position_from_head(value.identity())? {
            Some(_) => Err(ListError::DuplicateValue),
            None => Ok(()),
        }
    }

    fn endpoint_identity(&self, endpoint: Option<usize>) -> ListResult<Option<T::Id>> {
        endpoint
            .map(|index| self.value_at(index).map(Identity::identity))
            .transpose()
    }

    fn position_from_head(&self, id: T::Id) -> ListResult<Option<usize>> {
        self.scan(id, self.head, |node| node.next)
    }

    fn position_from_tail(&self, id: T::Id) -> ListResult<Option<usize>> {
        self.scan(id, self.tail, |node| node.prev)
    }

    fn scan(
        &self,
        id: T::Id,
        start: Option<usize>,
        step: impl Fn(&Node<T>) -> Option<usize>,
    ) -> ListResult<Option<usize>> {
        let mut visited = 0usize;
        let mut cursor = start;
        while let Some(index) = cursor {
            visited += 1;
            if visited > self.len {
                return Err(ListError::InvariantViolation(format!(
                    "scan visited more than {} nodes",
                    self.len
                )));
            }
            let node = self.node(index)?;
            let value = node.value.as_ref().ok_or_else(|| vacant_slot(index))?;
            if value.identity() == id {
                return Ok(Some(index));
            }
            cursor = step(node);
        }
        Ok(None)
    }

    fn allocate(
        &mut self,
        value: T,
        prev: Option<usize>,
        next: Option<usize>,
    ) -> ListResult<usize> {
        if let Some(index) = self.free.pop() {
            *self.node_mut(index)? = Node {
                value: Some(value),
                prev,
                next,
            };
            return Ok(index);
        }

        self.nodes
            .try_reserve(1)
            .map_err(|_| ListError::AllocationFailure)?;
        self.free
            .try_reserve(self.nodes.len() + 1)
            .map_err(|_| ListError::AllocationFailure)?;
        self.nodes.push(Node {
            value: Some(value),
            prev,
            next,
        });
        Ok(self.nodes.len() - 1)
    }

    fn unlink(&mut self, index: usize) -> ListResult<T> {
        let (prev, next) = {
            let node = self.node(index)?;
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.node_mut(prev)?.next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next)?.prev = prev,
            None => self.tail = prev,
        }
        self.len = self.len.checked_sub(1).ok_or_else(|| {
            ListError::InvariantViolation(format!("unlinked slot {index} with len=0"))
        })?;
        self.release(index)
    }

    fn release(&mut self, index: usize) -> ListResult<T> {
        let node = self.node_mut(index)?;
        node.prev = None;
        node.next = None;
        let value = node.value.take().ok_or_else(|| vacant_slot(index))?;
        self.free.push(index);
        Ok(value)
    }

    fn value_at(&self, index: usize) -> ListResult<&T> {
        self.node(index)?
            .value
            .as_ref()
            .ok_or_else(|| vacant_slot(index))
    }

    fn value_ref(&self, endpoint: Option<usize>) -> Option<&T> {
        self.nodes.get(endpoint?)?.value.as_ref()
    }

    fn node(&self, index: usize) -> ListResult<&Node<T>> {
        self.nodes.get(index).ok_or_else(|| missing_slot(index))
    }

    fn node_mut(&mut self, index: usize) -> ListResult<&mut Node<T>> {
        self.nodes.get_mut(index).ok_or_else(|| missing_slot(index))
    }
}

fn vacant_slot(index: usize) -> ListError {
    ListError::InvariantViolation(format!("slot {index} is linked but holds no value"))
}

fn missing_slot(index: usize) -> ListError {
    ListError::InvariantViolation(format!("slot {index} is out of bounds"))
}

/// Borrowing iterator over an `OrderedList`.
pub struct Iter<'a, T> {
    list: &'a OrderedList<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T: Identity> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedList;
    use crate::list::{Identity, ListError};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Item {
        id: u32,
        label: &'static str,
    }

    impl Identity for Item {
        type Id = u32;

        fn identity(&self) -> u32 {
            self.id
        }
    }

    fn item(id: u32) -> Item {
        Item { id, label: "item" }
    }

    fn ids(list: &OrderedList<Item>) -> Vec<u32> {
        list.iter().map(|item| item.id).collect()
    }

    fn filled(count: u32) -> OrderedList<Item> {
        let mut list = OrderedList::new();
        for id in 1..=count {
            list.insert_last(item(id)).expect("distinct ids insert");
        }
        list
    }

    #[test]
    fn new_list_is_empty_with_no_endpoints() {
        let list: OrderedList<Item> = OrderedList::new();
        assert_eq!(list.is_empty(), Ok(true));
        assert_eq!(list.len(), 0);
        assert!(list.peek_first().is_none());
        assert!(list.peek_last().is_none());
        list.verify_links().expect("empty list is consistent");
    }

    #[test]
    fn insert_before_head_becomes_new_head() {
        let mut list = filled(2);
        list.insert_before(Some(1), item(9)).expect("anchor exists");
        assert_eq!(ids(&list), vec![9, 1, 2]);
        assert_eq!(list.peek_first().map(|item| item.id), Some(9));
        list.verify_links().expect("links stay consistent");
    }

    #[test]
    fn insert_before_and_after_interior_nodes() {
        let mut list = filled(3);
        list.insert_before(Some(3), item(7)).expect("anchor exists");
        list.insert_after(Some(1), item(8)).expect("anchor exists");
        assert_eq!(ids(&list), vec![1, 8, 2, 7, 3]);
        assert_eq!(list.len(), 5);
        list.verify_links().expect("links stay consistent");
    }

    #[test]
    fn insert_after_tail_becomes_new_tail() {
        let mut list = filled(2);
        list.insert_after(Some(2), item(5)).expect("anchor exists");
        assert_eq!(list.peek_last().map(|item| item.id), Some(5));
        assert_eq!(ids(&list), vec![1, 2, 5]);
    }

    #[test]
    fn anchors_are_checked_on_empty_and_non_empty_lists() {
        let mut empty: OrderedList<Item> = OrderedList::new();
        assert_eq!(
            empty.insert_before(Some(1), item(2)),
            Err(ListError::AnchorNotFound)
        );
        assert_eq!(
            empty.insert_after(Some(1), item(2)),
            Err(ListError::AnchorNotFound)
        );
        assert_eq!(empty.len(), 0);

        let mut list = filled(2);
        assert_eq!(
            list.insert_before(Some(42), item(3)),
            Err(ListError::AnchorNotFound)
        );
        assert_eq!(list.insert_after(None, item(3)), Err(ListError::AnchorNotFound));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn duplicate_identity_wins_over_anchor_errors() {
        let mut list = filled(2);
        let clash = Item { id: 2, label: "other" };
        assert_eq!(
            list.insert_before(Some(42), clash),
            Err(ListError::DuplicateValue)
        );
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn removing_the_only_element_clears_both_endpoints() {
        let mut list = filled(1);
        let removed = list.remove_last().expect("one element");
        assert_eq!(removed.id, 1);
        assert_eq!(list.is_empty(), Ok(true));
        assert!(list.peek_first().is_none());
        list.verify_links().expect("empty after removal");
    }

    #[test]
    fn remove_last_relinks_new_tail() {
        let mut list = filled(3);
        list.remove_last().expect("non-empty");
        list.insert_last(item(4)).expect("fresh id");
        assert_eq!(ids(&list), vec![1, 2, 4]);
        let reversed: Vec<u32> = list.iter().rev().map(|item| item.id).collect();
        assert_eq!(reversed, vec![4, 2, 1]);
        list.verify_links().expect("links stay consistent");
    }

    #[test]
    fn remove_value_handles_each_position() {
        let mut list = filled(5);
        assert_eq!(list.remove_value(3).map(|item| item.id), Ok(3));
        assert_eq!(list.remove_value(1).map(|item| item.id), Ok(1));
        assert_eq!(list.remove_value(5).map(|item| item.id), Ok(5));
        assert_eq!(ids(&list), vec![2, 4]);
        assert_eq!(list.remove_value(3), Err(ListError::NotFound));
        list.verify_links().expect("links stay consistent");
    }

    #[test]
    fn remove_on_empty_reports_empty() {
        let mut list: OrderedList<Item> = OrderedList::new();
        assert_eq!(list.remove_first(), Err(ListError::Empty));
        assert_eq!(list.remove_last(), Err(ListError::Empty));
        assert_eq!(list.remove_value(1), Err(ListError::Empty));
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut list = filled(3);
        list.remove_value(2).expect("present");
        list.insert_first(item(10)).expect("fresh id");
        assert_eq!(list.nodes.len(), 3);
        assert_eq!(ids(&list), vec![10, 1, 3]);
        list.verify_links().expect("links stay consistent");
    }

    #[test]
    fn clear_releases_storage() {
        let mut list = filled(4);
        list.clear().expect("clear succeeds");
        assert_eq!(list.is_empty(), Ok(true));
        assert!(list.nodes.is_empty());
        assert!(list.free.is_empty());
    }

    #[test]
    fn count_and_endpoint_mismatch_is_an_invariant_violation() {
        let mut list = filled(2);
        list.len = 0;
        assert!(matches!(
            list.is_empty(),
            Err(ListError::InvariantViolation(_))
        ));
        assert!(matches!(
            list.insert_last(item(3)),
            Err(ListError::InvariantViolation(_))
        ));
    }

    #[test]
    fn clear_reports_overcounted_length() {
        let mut list = filled(2);
        list.len = 3;
        let err = list.clear().expect_err("count cannot reach zero");
        assert!(matches!(err, ListError::InvariantViolation(_)));
        assert!(err.to_string().contains("len=1"));
    }

    #[test]
    fn clear_reports_undercounted_length() {
        let mut list = filled(2);
        list.len = 1;
        let err = list.clear().expect_err("chain outlives the count");
        assert!(matches!(err, ListError::InvariantViolation(_)));
        assert!(list.peek_first().is_some());
    }

    #[test]
    fn verify_links_detects_broken_back_link() {
        let mut list = filled(3);
        let tail = list.tail.expect("tail exists");
        list.nodes[tail].prev = None;
        let err = list.verify_links().expect_err("broken back link");
        assert!(matches!(err, ListError::InvariantViolation(_)));
        assert!(err.to_string().contains("links back"));
    }

    #[test]
    fn iterator_reports_exact_size_from_both_ends() {
        let list = filled(4);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next().map(|item| item.id), Some(1));
        assert_eq!(iter.next_back().map(|item| item.id), Some(4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.map(|item| item.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn labels_travel_with_their_nodes() {
        let mut list = OrderedList::new();
        list.insert_last(Item { id: 1, label: "first" }).expect("insert");
        list.insert_first(Item { id: 2, label: "second" }).expect("insert");
        let labels: Vec<&str> = list.iter().map(|item| item.label).collect();
        assert_eq!(labels, vec!["second", "first"]);
    }
}
