//! Concurrency tests: one facade shared across threads

use std::sync::{Arc, Barrier};
use std::thread;

use redkit::{CommandFlags, Order, When};

use crate::common::redkit;

#[test]
fn concurrent_increments_sum_to_total() {
    let (redkit, _) = redkit();
    let redkit = Arc::new(redkit);
    let threads = 8;
    let per_thread = 250;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let redkit = Arc::clone(&redkit);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..per_thread {
                    redkit.increment_by("visits", 2).unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let total: i64 = redkit.item_get("visits").unwrap();
    assert_eq!(total, (threads * per_thread * 2) as i64);
}

#[test]
fn cloned_facades_share_the_store() {
    let (redkit, store) = redkit();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let redkit = redkit.with_flags(CommandFlags::DemandPrimary);
            thread::spawn(move || {
                for i in 0..50 {
                    redkit.sorted_set_add("board", &format!("{}-{}", t, i), (t * 100 + i) as f64).unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(redkit.sorted_set_count("board").unwrap(), 200);
    let top: Vec<String> = redkit.sorted_set_get_page("board", 1, 1, Order::Descending).unwrap();
    assert_eq!(top, vec!["3-49"]);
    assert!(store
        .command_log()
        .iter()
        .filter(|(name, _)| *name == "SortedSetAdd")
        .all(|(_, flags)| *flags == CommandFlags::DemandPrimary));
}

#[test]
fn set_if_absent_has_one_winner() {
    let (redkit, _) = redkit();
    let redkit = Arc::new(redkit);
    let barrier = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|t| {
            let redkit = Arc::clone(&redkit);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                redkit.item_set_when("leader", &t, When::NotExists).unwrap()
            })
        })
        .collect();

    let winners = handles.into_iter().map(|h| h.join().unwrap()).filter(|won| *won).count();
    assert_eq!(winners, 1);
}
