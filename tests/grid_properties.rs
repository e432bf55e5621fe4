//! Property tests for the grid engine.
//!
//! Each property drives a `TableController` through its public operations and
//! checks the derived view.

use std::collections::HashSet;

use datagrid::grid::pagination::{page_window, total_pages, PAGE_WINDOW};
use datagrid::grid::{Column, ColumnSchema, GridConfig, Record, RowKey, TableController};
use proptest::prelude::*;

fn records(scores: &[i64], names: &[String]) -> Vec<Record> {
    scores
        .iter()
        .zip(names)
        .enumerate()
        .map(|(i, (score, name))| {
            Record::new()
                .with("id", format!("r{}", i))
                .with("score", *score)
                .with("name", name.as_str())
        })
        .collect()
}

fn controller(records: Vec<Record>, page_size: usize, pagination: bool) -> TableController {
    let schema = ColumnSchema::new(vec![
        Column::new("name", "Name"),
        Column::new("score", "Score"),
    ])
    .unwrap();
    let config = GridConfig {
        filterable: true,
        selectable: true,
        pagination,
        page_size,
        identity_field: Some("id".to_string()),
        ..GridConfig::default()
    };
    TableController::new(records, schema, config)
}

fn visible_sources(grid: &TableController) -> Vec<usize> {
    grid.view().rows.iter().map(|row| row.source_index).collect()
}

fn rows_strategy() -> impl Strategy<Value = (Vec<i64>, Vec<String>)> {
    prop::collection::vec((-1_000_000i64..1_000_000, "[a-c]{0,4}"), 0..60)
        .prop_map(|pairs| pairs.into_iter().unzip())
}

proptest! {
    /// Searching keeps a duplicate-free subset whose rows all match.
    #[test]
    fn prop_search_result_is_matching_subset((scores, names) in rows_strategy(), term in "[a-c]{0,2}") {
        let mut grid = controller(records(&scores, &names), 10, false);
        grid.set_search_term(term.as_str());

        let shown = visible_sources(&grid);
        let unique: HashSet<usize> = shown.iter().copied().collect();
        prop_assert_eq!(unique.len(), shown.len());

        let needle = term.to_lowercase();
        for &index in &shown {
            prop_assert!(index < names.len());
            let hit = names[index].to_lowercase().contains(&needle)
                || scores[index].to_string().contains(&needle);
            prop_assert!(hit);
        }
        let expected = (0..names.len())
            .filter(|&i| {
                names[i].to_lowercase().contains(&needle) || scores[i].to_string().contains(&needle)
            })
            .count();
        prop_assert_eq!(shown.len(), expected);
    }

    /// For distinct values, descending order is ascending order reversed.
    #[test]
    fn prop_descending_reverses_ascending(scores in prop::collection::hash_set(-1_000_000i64..1_000_000, 0..40)) {
        let scores: Vec<i64> = scores.into_iter().collect();
        let names = vec![String::new(); scores.len()];
        let mut grid = controller(records(&scores, &names), 10, false);

        grid.set_sort("score");
        let ascending = visible_sources(&grid);
        grid.set_sort("score");
        let mut descending = visible_sources(&grid);
        descending.reverse();
        prop_assert_eq!(&ascending, &descending);

        let values: Vec<i64> = ascending.iter().map(|&i| scores[i]).collect();
        prop_assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Walking every page visits each matching row exactly once.
    #[test]
    fn prop_pages_cover_rows_once((scores, names) in rows_strategy(), page_size in 1usize..15) {
        let mut grid = controller(records(&scores, &names), page_size, true);
        grid.set_sort("name");

        let pages = grid.view().total_pages;
        prop_assert_eq!(pages, total_pages(scores.len(), page_size));

        let mut seen = Vec::new();
        for page in 1..=pages {
            grid.set_page(page);
            prop_assert_eq!(grid.view().current_page, page);
            prop_assert!(grid.view().rows.len() <= page_size);
            seen.extend(visible_sources(&grid));
        }
        let unique: HashSet<usize> = seen.iter().copied().collect();
        prop_assert_eq!(seen.len(), scores.len());
        prop_assert_eq!(unique.len(), scores.len());
    }

    /// Requested pages are clamped into range.
    #[test]
    fn prop_page_is_clamped((scores, names) in rows_strategy(), page_size in 1usize..15, page in 0usize..100) {
        let mut grid = controller(records(&scores, &names), page_size, true);
        grid.set_page(page);

        let view = grid.view();
        prop_assert!(view.current_page >= 1);
        prop_assert!(view.current_page <= view.total_pages);
        prop_assert_eq!(view.current_page, page.clamp(1, view.total_pages));
    }

    /// The button window is contiguous, bounded and contains the current page.
    #[test]
    fn prop_page_window_bounds(total in 1usize..200, current in 1usize..200) {
        let current = current.min(total);
        let window = page_window(current, total);

        prop_assert_eq!(window.len(), total.min(PAGE_WINDOW));
        prop_assert!(window.contains(&current));
        prop_assert!(window.windows(2).all(|pair| pair[1] == pair[0] + 1));
        prop_assert!(window.first().copied().unwrap_or(0) >= 1);
        prop_assert!(window.last().copied().unwrap_or(0) <= total);
    }

    /// Select-all toggles the current page on, then off again.
    #[test]
    fn prop_toggle_all_round_trip((scores, names) in rows_strategy(), page_size in 1usize..15) {
        let mut grid = controller(records(&scores, &names), page_size, true);
        let visible = grid.view().rows.len();

        grid.toggle_select_all();
        prop_assert_eq!(grid.view().selected_count, visible);
        prop_assert_eq!(grid.view().all_visible_selected, visible > 0);

        grid.toggle_select_all();
        prop_assert_eq!(grid.view().selected_count, 0);
        prop_assert!(grid.selected_keys().is_empty());
    }

    /// Selections survive paging and drop out when their record disappears.
    #[test]
    fn prop_selection_follows_records((scores, names) in rows_strategy(), keep in 0usize..60) {
        let all = records(&scores, &names);
        let mut grid = controller(all.clone(), 5, true);
        for i in 0..all.len() {
            grid.toggle_select_row(&RowKey::Id(format!("r{}", i)));
        }
        prop_assert_eq!(grid.view().selected_count, all.len());

        let keep = keep.min(all.len());
        grid.set_records(all[..keep].to_vec());
        prop_assert_eq!(grid.view().selected_count, keep);
    }

    /// Positional selections never carry over to a new set of records.
    #[test]
    fn prop_positional_selection_cleared_by_new_records(
        (scores, names) in rows_strategy(),
        picks in prop::collection::vec(0usize..60, 0..10),
    ) {
        let all = records(&scores, &names);
        let schema = ColumnSchema::new(vec![Column::new("name", "Name")]).unwrap();
        let config = GridConfig {
            selectable: true,
            ..GridConfig::default()
        };
        let mut grid = TableController::new(all.clone(), schema, config);
        for pick in picks {
            grid.toggle_select_row(&RowKey::Position(pick));
        }

        grid.set_records(all.into_iter().rev().collect());
        prop_assert_eq!(grid.view().selected_count, 0);
        prop_assert!(grid.selected_records().is_empty());
    }
}
