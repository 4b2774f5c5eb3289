//! Sorted set tests: leaderboards, paging, trimming and combination

use proptest::prelude::*;
use redkit::{Exclude, Order, Redkit, ScoreRange, SetOperation};

use crate::common::redkit;

fn ranked(redkit: &Redkit, key: &str, count: i64) {
    let members: Vec<(String, f64)> = (0..count).map(|i| (format!("m{}", i), i as f64)).collect();
    assert_eq!(redkit.sorted_set_add_range(key, &members).unwrap(), count);
}

#[test]
fn trim_top_two_keeps_the_highest_scores() {
    let (redkit, _) = redkit();
    for score in 1..=5 {
        redkit.sorted_set_add("scores", &format!("p{}", score), score as f64).unwrap();
    }

    assert_eq!(redkit.sorted_set_trim_top("scores", 2).unwrap(), 3);
    let left: Vec<String> = redkit.sorted_set_get_all("scores", Order::Descending).unwrap();
    assert_eq!(left, vec!["p5", "p4"]);
}

#[test]
fn second_page_of_three_returns_ranks_three_to_five() {
    let (redkit, _) = redkit();
    ranked(&redkit, "board", 10);

    let page: Vec<String> = redkit.sorted_set_get_page("board", 2, 3, Order::Ascending).unwrap();
    assert_eq!(page, vec!["m3", "m4", "m5"]);

    let page: Vec<(String, f64)> = redkit
        .sorted_set_get_page_with_scores("board", 4, 3, Order::Descending)
        .unwrap();
    assert_eq!(page, vec![("m0".to_string(), 0.0)]);
}

#[test]
fn score_paging_honours_exclusions() {
    let (redkit, _) = redkit();
    ranked(&redkit, "board", 10);

    let range = ScoreRange::new(2.0, 6.0).exclude(Exclude::Both);
    let first: Vec<String> = redkit
        .sorted_set_get_page_by_score("board", range, 1, 2, Order::Ascending)
        .unwrap();
    let second: Vec<String> = redkit
        .sorted_set_get_page_by_score("board", range, 2, 2, Order::Ascending)
        .unwrap();
    assert_eq!(first, vec!["m3", "m4"]);
    assert_eq!(second, vec!["m5"]);

    let top: Vec<(String, f64)> = redkit
        .sorted_set_get_page_by_score_with_scores("board", ScoreRange::default(), 1, 1, Order::Descending)
        .unwrap();
    assert_eq!(top, vec![("m9".to_string(), 9.0)]);
}

#[test]
fn min_and_max_follow_scores() {
    let (redkit, _) = redkit();
    redkit.sorted_set_add("z", "mid", 5.0).unwrap();
    redkit.sorted_set_add("z", "low", -1.0).unwrap();
    redkit.sorted_set_add("z", "high", 10.0).unwrap();

    assert_eq!(redkit.sorted_set_get_min_by_score::<String>("z").unwrap(), "low");
    assert_eq!(redkit.sorted_set_get_max_by_score::<String>("z").unwrap(), "high");
    assert_eq!(redkit.sorted_set_get_max_by_score::<String>("empty").unwrap(), "");
}

#[test]
fn increment_reorders_members() {
    let (redkit, _) = redkit();
    redkit.sorted_set_add("z", "a", 1.0).unwrap();
    redkit.sorted_set_add("z", "b", 2.0).unwrap();

    assert_eq!(redkit.sorted_set_increment_score("z", "a", 5.0).unwrap(), 6.0);
    assert_eq!(redkit.sorted_set_decrement_score("z", "b", 0.5).unwrap(), 1.5);
    let order: Vec<String> = redkit.sorted_set_get_all("z", Order::Ascending).unwrap();
    assert_eq!(order, vec!["b", "a"]);
}

#[test]
fn remove_by_score_and_rank() {
    let (redkit, _) = redkit();
    ranked(&redkit, "board", 10);

    assert_eq!(redkit.sorted_set_remove_by_score("board", 0.0, 2.0, Exclude::Stop).unwrap(), 2);
    assert_eq!(redkit.sorted_set_remove_by_rank("board", -2, -1).unwrap(), 2);
    assert_eq!(redkit.sorted_set_count("board").unwrap(), 6);
    assert!(!redkit.sorted_set_exists("board", "m9").unwrap());
    assert!(redkit.sorted_set_exists("board", "m2").unwrap());
}

#[test]
fn combine_store_sums_scores() {
    let (redkit, _) = redkit();
    redkit.sorted_set_add("week1", "ada", 3.0).unwrap();
    redkit.sorted_set_add("week1", "bob", 1.0).unwrap();
    redkit.sorted_set_add("week2", "ada", 2.0).unwrap();
    redkit.sorted_set_add("week2", "cy", 4.0).unwrap();

    let size = redkit
        .sorted_set_combine_store("total", &["week1", "week2"], SetOperation::Union)
        .unwrap();
    assert_eq!(size, 3);
    let totals: Vec<(String, f64)> = redkit
        .sorted_set_get_page_with_scores("total", 1, 10, Order::Descending)
        .unwrap();
    assert_eq!(
        totals,
        vec![("ada".to_string(), 5.0), ("cy".to_string(), 4.0), ("bob".to_string(), 1.0)]
    );
}

#[test]
fn invalid_paging_arguments_are_rejected() {
    let (redkit, store) = redkit();
    assert!(redkit
        .sorted_set_get_page::<String>("z", 0, 10, Order::Ascending)
        .unwrap_err()
        .is_argument_error());
    assert!(redkit
        .sorted_set_get_page::<String>("z", 1, 0, Order::Ascending)
        .unwrap_err()
        .is_argument_error());
    assert!(redkit.sorted_set_trim("z", -1, Order::Ascending).unwrap_err().is_argument_error());
    assert_eq!(store.commands_executed(), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Walking every page yields every member exactly once, in order.
    #[test]
    fn pages_partition_the_set(count in 0i64..40, page_size in 1i64..8) {
        let (redkit, _) = redkit();
        if count > 0 {
            ranked(&redkit, "p", count);
        }

        let mut seen = Vec::new();
        let mut page = 1;
        loop {
            let chunk: Vec<String> = redkit.sorted_set_get_page("p", page, page_size, Order::Ascending).unwrap();
            if chunk.is_empty() {
                break;
            }
            prop_assert!(chunk.len() as i64 <= page_size);
            seen.extend(chunk);
            page += 1;
        }

        let expected: Vec<String> = (0..count).map(|i| format!("m{}", i)).collect();
        prop_assert_eq!(seen, expected);
    }
}
