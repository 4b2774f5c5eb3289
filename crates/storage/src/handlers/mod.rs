//! Command handlers organized by data kind.
//!
//! | Module | Commands | Data |
//! |--------|----------|------|
//! | `keys` | 5 | Any |
//! | `strings` | 5 | String |
//! | `lists` | 7 | List |
//! | `sets` | 8 | Set |
//! | `sorted_sets` | 10 | SortedSet |
//! | `hashes` | 9 | Hash |
//!
//! Every handler runs with exclusive access to the keyspace, which is what
//! makes each command atomic.

pub mod hashes;
pub mod keys;
pub mod lists;
pub mod sets;
pub mod sorted_sets;
pub mod strings;

/// Resolve an inclusive `[start, stop]` index range against a sequence of
/// `len` elements. Negative indices count from the end. Returns `None` when
/// the range selects nothing.
pub(crate) fn normalize_range(start: i64, stop: i64, len: usize) -> Option<(usize, usize)> {
    let len = len as i64;
    if len == 0 {
        return None;
    }
    let start = if start < 0 { (start + len).max(0) } else { start };
    let stop = if stop < 0 { stop + len } else { stop.min(len - 1) };
    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

/// Resolve a single possibly-negative index.
pub(crate) fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let index = if index < 0 { index + len } else { index };
    if index < 0 || index >= len {
        None
    } else {
        Some(index as usize)
    }
}
