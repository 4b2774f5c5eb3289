//! Values held in the keyspace
//!
//! A key holds exactly one kind of data. Collections that become empty are
//! removed from the keyspace by the handlers, so an empty collection is never
//! observable.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use ordered_float::OrderedFloat;
use redkit_core::{KeyType, Order, Payload};
use rustc_hash::FxHashMap;

/// Data stored under one key
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// Plain string value
    String(Payload),
    /// Ordered sequence, index 0 is the head
    List(VecDeque<Payload>),
    /// Unique members, iterated in byte order
    Set(BTreeSet<Payload>),
    /// Members ordered by score
    SortedSet(SortedSet),
    /// Field → value, iterated in field order
    Hash(BTreeMap<String, Payload>),
}

impl StoredValue {
    /// Kind of data, as reported by `TYPE`
    pub fn key_type(&self) -> KeyType {
        match self {
            StoredValue::String(_) => KeyType::String,
            StoredValue::List(_) => KeyType::List,
            StoredValue::Set(_) => KeyType::Set,
            StoredValue::SortedSet(_) => KeyType::SortedSet,
            StoredValue::Hash(_) => KeyType::Hash,
        }
    }

    /// True for a collection with no elements. Strings are never empty here.
    pub fn is_empty_collection(&self) -> bool {
        match self {
            StoredValue::String(_) => false,
            StoredValue::List(l) => l.is_empty(),
            StoredValue::Set(s) => s.is_empty(),
            StoredValue::SortedSet(z) => z.is_empty(),
            StoredValue::Hash(h) => h.is_empty(),
        }
    }
}

/// Score-ordered set
///
/// Two views kept in sync: member → score for lookups and
/// (score, member) for ordered traversal. Equal scores fall back to byte
/// order of the member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedSet {
    by_member: FxHashMap<Payload, f64>,
    by_score: BTreeSet<(OrderedFloat<f64>, Payload)>,
}

impl SortedSet {
    /// Create an empty sorted set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.by_member.len()
    }

    /// True when there are no members
    pub fn is_empty(&self) -> bool {
        self.by_member.is_empty()
    }

    /// Score of `member`
    pub fn score(&self, member: &Payload) -> Option<f64> {
        self.by_member.get(member).copied()
    }

    /// Insert or rescore a member. Returns true if the member is new.
    pub fn insert(&mut self, member: Payload, score: f64) -> bool {
        match self.by_member.insert(member.clone(), score) {
            Some(old) => {
                self.by_score.remove(&(OrderedFloat(old), member.clone()));
                self.by_score.insert((OrderedFloat(score), member));
                false
            }
            None => {
                self.by_score.insert((OrderedFloat(score), member));
                true
            }
        }
    }

    /// Remove a member. Returns true if it was present.
    pub fn remove(&mut self, member: &Payload) -> bool {
        match self.by_member.remove(member) {
            Some(score) => {
                self.by_score.remove(&(OrderedFloat(score), member.clone()));
                true
            }
            None => false,
        }
    }

    /// Members with scores, lowest score first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Payload, f64)> + '_ {
        self.by_score.iter().map(|(score, member)| (member, score.0))
    }

    /// Members with scores in the requested order
    pub fn ordered(&self, order: Order) -> Vec<(Payload, f64)> {
        let ascending = self.iter().map(|(m, s)| (m.clone(), s));
        match order {
            Order::Ascending => ascending.collect(),
            Order::Descending => ascending.rev().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_set_orders_by_score_then_member() {
        let mut z = SortedSet::new();
        assert!(z.insert(Payload::from("b"), 2.0));
        assert!(z.insert(Payload::from("a"), 2.0));
        assert!(z.insert(Payload::from("c"), 1.0));

        let members: Vec<Payload> = z.ordered(Order::Ascending).into_iter().map(|(m, _)| m).collect();
        assert_eq!(
            members,
            vec![Payload::from("c"), Payload::from("a"), Payload::from("b")]
        );
        let first_desc = &z.ordered(Order::Descending)[0];
        assert_eq!(first_desc.0, Payload::from("b"));
    }

    #[test]
    fn test_sorted_set_rescore_keeps_views_in_sync() {
        let mut z = SortedSet::new();
        z.insert(Payload::from("m"), 1.0);
        assert!(!z.insert(Payload::from("m"), 5.0));
        assert_eq!(z.len(), 1);
        assert_eq!(z.score(&Payload::from("m")), Some(5.0));
        assert_eq!(z.iter().count(), 1);

        assert!(z.remove(&Payload::from("m")));
        assert!(!z.remove(&Payload::from("m")));
        assert!(z.is_empty());
        assert_eq!(z.iter().count(), 0);
    }

    #[test]
    fn test_empty_collection_detection() {
        assert!(!StoredValue::String(Payload::empty()).is_empty_collection());
        assert!(StoredValue::List(VecDeque::new()).is_empty_collection());
        assert!(StoredValue::SortedSet(SortedSet::new()).is_empty_collection());
        assert_eq!(StoredValue::Hash(BTreeMap::new()).key_type(), KeyType::Hash);
    }
}
