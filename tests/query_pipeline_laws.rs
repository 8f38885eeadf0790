//! Property-based tests for the query pipeline.
//!
//! These tests verify the filter predicate against an independent oracle,
//! the period-two behavior of the sort toggle, and the asymmetry between
//! search and sort.

mod common;

use std::sync::Arc;

use proptest::prelude::*;
use todo_browser::browser::{QueryPipeline, SortDirection};
use todo_browser::domain::{TaskId, TaskRecord};

// =============================================================================
// Strategies
// =============================================================================

fn record_strategy() -> impl Strategy<Value = TaskRecord> {
    (1u64..300, "[a-zA-Z ]{0,16}", any::<bool>(), 1u64..11).prop_map(
        |(id, title, completed, owner)| common::task(id, &title, completed, owner),
    )
}

fn records_strategy() -> impl Strategy<Value = Vec<TaskRecord>> {
    prop::collection::vec(record_strategy(), 0..40)
}

fn term_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z ]{1,3}",
        "[0-9]{1,2}",
        Just("Completed".to_string()),
        Just("pend".to_string()),
    ]
}

/// Reference predicate, written independently of the pipeline.
fn oracle(record: &TaskRecord, raw_term: &str) -> bool {
    let term = raw_term.to_lowercase();
    let status = if record.completed { "completed" } else { "pending" };
    term.is_empty()
        || record.id.get().to_string().contains(&term)
        || record.title.to_lowercase().contains(&term)
        || status.contains(&term)
}

fn pipeline_over(records: &[TaskRecord]) -> QueryPipeline {
    QueryPipeline::new(Arc::from(records.to_vec()))
}

fn ids_of(records: &[TaskRecord]) -> Vec<TaskId> {
    records.iter().map(|record| record.id).collect()
}

proptest! {
    // =========================================================================
    // Filter Correctness
    // =========================================================================

    #[test]
    fn prop_search_matches_oracle_in_store_order(
        records in records_strategy(),
        term in term_strategy(),
    ) {
        let mut pipeline = pipeline_over(&records);

        pipeline.apply_search(&term);

        let expected: Vec<TaskId> = records
            .iter()
            .filter(|record| oracle(record, &term))
            .map(|record| record.id)
            .collect();
        prop_assert_eq!(pipeline.view_ids(), expected);
    }

    #[test]
    fn prop_empty_search_is_identity(records in records_strategy()) {
        let mut pipeline = pipeline_over(&records);

        pipeline.apply_search("");

        prop_assert_eq!(pipeline.view_ids(), ids_of(&records));
    }

    #[test]
    fn prop_view_never_exceeds_store(
        records in records_strategy(),
        term in term_strategy(),
        toggles in 0usize..4,
    ) {
        let mut pipeline = pipeline_over(&records);
        pipeline.apply_search(&term);
        for _ in 0..toggles {
            pipeline.toggle_sort();
        }

        prop_assert!(pipeline.len() <= records.len());
        prop_assert!(pipeline.view().all(|record| records.contains(record)));
    }

    // =========================================================================
    // Sort Period Two
    // =========================================================================

    #[test]
    fn prop_ascending_and_descending_are_reverses(records in records_strategy()) {
        let mut pipeline = pipeline_over(&records);

        pipeline.toggle_sort();
        let ascending = pipeline.view_ids();
        pipeline.toggle_sort();
        let mut descending = pipeline.view_ids();
        descending.reverse();

        prop_assert!(ascending.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert_eq!(ascending, descending);
    }

    #[test]
    fn prop_toggling_twice_more_returns_to_same_order(records in records_strategy()) {
        let mut pipeline = pipeline_over(&records);

        pipeline.toggle_sort();
        let once = pipeline.view_ids();
        pipeline.toggle_sort();
        pipeline.toggle_sort();

        prop_assert_eq!(pipeline.view_ids(), once);
        prop_assert_eq!(pipeline.applied_sort(), Some(SortDirection::Ascending));
    }

    // =========================================================================
    // Search / Sort Composition
    // =========================================================================

    #[test]
    fn prop_search_after_sort_discards_sort(
        records in records_strategy(),
        term in term_strategy(),
        toggles in 1usize..4,
    ) {
        let mut sorted_first = pipeline_over(&records);
        for _ in 0..toggles {
            sorted_first.toggle_sort();
        }
        sorted_first.apply_search(&term);

        let mut search_only = pipeline_over(&records);
        search_only.apply_search(&term);

        prop_assert_eq!(sorted_first.view_ids(), search_only.view_ids());
        prop_assert_eq!(sorted_first.applied_sort(), None);
    }

    #[test]
    fn prop_sort_after_search_keeps_filtered_subset(
        records in records_strategy(),
        term in term_strategy(),
    ) {
        let mut pipeline = pipeline_over(&records);
        pipeline.apply_search(&term);
        let mut filtered = pipeline.view_ids();

        pipeline.toggle_sort();
        let sorted = pipeline.view_ids();

        filtered.sort();
        prop_assert_eq!(sorted, filtered);
    }
}

// =============================================================================
// Worked Example
// =============================================================================

#[test]
fn walk_dog_search_then_sort() {
    let mut pipeline = pipeline_over(&common::milk_and_dog());

    pipeline.apply_search("dog");
    assert_eq!(pipeline.view_ids(), vec![TaskId::new(2)]);

    pipeline.toggle_sort();
    assert_eq!(pipeline.view_ids(), vec![TaskId::new(2)]);
    assert_eq!(pipeline.state().sort_direction, SortDirection::Descending);
}
