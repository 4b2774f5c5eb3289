//! Sorted set command handlers.
//!
//! Scores are finite or infinite `f64`s; NaN is rejected on write. Ties are
//! ordered by member bytes.

use std::collections::BTreeMap;

use redkit_core::{
    Aggregate, Error, Exclude, KeyType, Order, Output, Payload, Result, SetOperation,
    SortedSetEntry,
};

use super::normalize_range;
use crate::keyspace::{wrong_type, Keyspace};
use crate::stored_value::{SortedSet, StoredValue};

fn not_a_float() -> Error {
    Error::store("ERR value is not a valid float")
}

fn render(members: Vec<(Payload, f64)>, with_scores: bool) -> Output {
    if with_scores {
        Output::Entries(
            members
                .into_iter()
                .map(|(element, score)| SortedSetEntry { element, score })
                .collect(),
        )
    } else {
        Output::Values(members.into_iter().map(|(m, _)| m).collect())
    }
}

/// Handle SortedSetAdd command.
pub fn sorted_set_add(ks: &mut Keyspace, key: String, entries: Vec<SortedSetEntry>) -> Result<Output> {
    if entries.iter().any(|e| e.score.is_nan()) {
        return Err(not_a_float());
    }
    if entries.is_empty() {
        ks.sorted_set(&key)?;
        return Ok(Output::Int(0));
    }
    let zset = ks.sorted_set_entry(&key)?;
    let added = entries
        .into_iter()
        .filter(|e| zset.insert(e.element.clone(), e.score))
        .count();
    Ok(Output::Int(added as i64))
}

/// Handle SortedSetIncrement command.
pub fn sorted_set_increment(
    ks: &mut Keyspace,
    key: String,
    member: Payload,
    delta: f64,
) -> Result<Output> {
    if delta.is_nan() {
        return Err(not_a_float());
    }
    let current = ks
        .sorted_set(&key)?
        .and_then(|z| z.score(&member))
        .unwrap_or(0.0);
    let next = current + delta;
    if next.is_nan() {
        return Err(Error::store("ERR resulting score is not a number (NaN)"));
    }
    ks.sorted_set_entry(&key)?.insert(member, next);
    Ok(Output::Float(next))
}

/// Handle SortedSetRemove command.
pub fn sorted_set_remove(ks: &mut Keyspace, key: String, members: Vec<Payload>) -> Result<Output> {
    let removed = match ks.sorted_set_mut(&key)? {
        Some(zset) => members.iter().filter(|m| zset.remove(m)).count(),
        None => 0,
    };
    ks.remove_if_empty(&key);
    Ok(Output::Int(removed as i64))
}

fn remove_matching<F>(ks: &mut Keyspace, key: &str, select: F) -> Result<Output>
where
    F: FnOnce(&SortedSet) -> Vec<Payload>,
{
    let removed = match ks.sorted_set_mut(key)? {
        Some(zset) => {
            let doomed = select(&*zset);
            doomed.iter().filter(|m| zset.remove(m)).count()
        }
        None => 0,
    };
    ks.remove_if_empty(key);
    Ok(Output::Int(removed as i64))
}

/// Handle SortedSetRemoveRangeByRank command.
pub fn sorted_set_remove_range_by_rank(
    ks: &mut Keyspace,
    key: String,
    start: i64,
    stop: i64,
) -> Result<Output> {
    remove_matching(ks, &key, |zset| match normalize_range(start, stop, zset.len()) {
        Some((from, to)) => zset
            .iter()
            .skip(from)
            .take(to - from + 1)
            .map(|(m, _)| m.clone())
            .collect(),
        None => Vec::new(),
    })
}

/// Handle SortedSetRemoveRangeByScore command.
pub fn sorted_set_remove_range_by_score(
    ks: &mut Keyspace,
    key: String,
    start: f64,
    stop: f64,
    exclude: Exclude,
) -> Result<Output> {
    remove_matching(ks, &key, |zset| {
        zset.iter()
            .filter(|(_, score)| exclude.contains(start, stop, *score))
            .map(|(m, _)| m.clone())
            .collect()
    })
}

/// Handle SortedSetLength command.
pub fn sorted_set_length(
    ks: &mut Keyspace,
    key: String,
    min: f64,
    max: f64,
    exclude: Exclude,
) -> Result<Output> {
    let count = ks
        .sorted_set(&key)?
        .map(|zset| {
            zset.iter()
                .filter(|(_, score)| exclude.contains(min, max, *score))
                .count()
        })
        .unwrap_or(0);
    Ok(Output::Int(count as i64))
}

/// Handle SortedSetScore command.
pub fn sorted_set_score(ks: &mut Keyspace, key: String, member: Payload) -> Result<Output> {
    Ok(Output::Score(ks.sorted_set(&key)?.and_then(|z| z.score(&member))))
}

/// Handle SortedSetRangeByRank command.
pub fn sorted_set_range_by_rank(
    ks: &mut Keyspace,
    key: String,
    start: i64,
    stop: i64,
    order: Order,
    with_scores: bool,
) -> Result<Output> {
    let members = match ks.sorted_set(&key)? {
        Some(zset) => match normalize_range(start, stop, zset.len()) {
            Some((from, to)) => {
                let mut ordered = zset.ordered(order);
                ordered.truncate(to + 1);
                ordered.drain(..from);
                ordered
            }
            None => Vec::new(),
        },
        None => Vec::new(),
    };
    Ok(render(members, with_scores))
}

/// Handle SortedSetRangeByScore command.
///
/// `start` and `stop` are the lower and upper score bounds for either order.
/// A negative `take` keeps everything after `skip`.
#[allow(clippy::too_many_arguments)]
pub fn sorted_set_range_by_score(
    ks: &mut Keyspace,
    key: String,
    start: f64,
    stop: f64,
    exclude: Exclude,
    order: Order,
    skip: i64,
    take: i64,
    with_scores: bool,
) -> Result<Output> {
    let skip = skip.max(0) as usize;
    let take = if take < 0 { usize::MAX } else { take as usize };
    let members: Vec<(Payload, f64)> = ks
        .sorted_set(&key)?
        .map(|zset| {
            zset.ordered(order)
                .into_iter()
                .filter(|(_, score)| exclude.contains(start, stop, *score))
                .skip(skip)
                .take(take)
                .collect()
        })
        .unwrap_or_default();
    Ok(render(members, with_scores))
}

/// Members and scores of a combine source. Plain sets count as score 1.
fn source_scores(ks: &mut Keyspace, key: &str) -> Result<Vec<(Payload, f64)>> {
    match ks.get(key) {
        None => Ok(Vec::new()),
        Some(StoredValue::SortedSet(zset)) => Ok(zset.iter().map(|(m, s)| (m.clone(), s)).collect()),
        Some(StoredValue::Set(set)) => Ok(set.iter().map(|m| (m.clone(), 1.0)).collect()),
        Some(other) => Err(wrong_type(key, KeyType::SortedSet, other.key_type())),
    }
}

fn weighted(score: f64, weight: f64) -> f64 {
    let product = score * weight;
    if product.is_nan() {
        0.0
    } else {
        product
    }
}

/// Handle SortedSetCombineStore command.
pub fn sorted_set_combine_store(
    ks: &mut Keyspace,
    operation: SetOperation,
    destination: String,
    keys: Vec<String>,
    weights: Option<Vec<f64>>,
    aggregate: Aggregate,
) -> Result<Output> {
    let weights = match weights {
        Some(w) if w.len() != keys.len() => {
            return Err(Error::store("ERR weights count does not match number of keys"))
        }
        Some(w) => w,
        None => vec![1.0; keys.len()],
    };

    let mut sources = Vec::with_capacity(keys.len());
    for (key, weight) in keys.iter().zip(&weights) {
        let members: BTreeMap<Payload, f64> = source_scores(ks, key)?
            .into_iter()
            .map(|(m, s)| (m, weighted(s, *weight)))
            .collect();
        sources.push(members);
    }

    let mut sources = sources.into_iter();
    let mut result = sources.next().unwrap_or_default();
    for next in sources {
        match operation {
            SetOperation::Union => {
                for (member, score) in next {
                    result
                        .entry(member)
                        .and_modify(|acc| *acc = aggregate.combine(*acc, score))
                        .or_insert(score);
                }
            }
            SetOperation::Intersect => {
                result = result
                    .into_iter()
                    .filter_map(|(member, acc)| {
                        next.get(&member)
                            .map(|score| (member, aggregate.combine(acc, *score)))
                    })
                    .collect();
            }
            SetOperation::Difference => result.retain(|member, _| !next.contains_key(member)),
        }
    }

    let len = result.len();
    if result.is_empty() {
        ks.remove(&destination);
    } else {
        let mut zset = SortedSet::new();
        for (member, score) in result {
            // Sum of +inf and -inf
            zset.insert(member, if score.is_nan() { 0.0 } else { score });
        }
        ks.insert(&destination, StoredValue::SortedSet(zset), None);
    }
    Ok(Output::Int(len as i64))
}
