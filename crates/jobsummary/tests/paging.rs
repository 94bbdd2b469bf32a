mod common;

use common::{numbered_rows, row, StaticClient};
use jobsummary::client::FetchResult;
use jobsummary::jobs::SummaryRow;
use jobsummary::view::{role_link, PageRequest, SummaryViewModel};

async fn loaded_view(rows: Vec<SummaryRow>) -> SummaryViewModel {
    let client = StaticClient::new(FetchResult::ok(rows));
    let mut view = SummaryViewModel::initialize();
    view.load_summaries(&client).await.unwrap();
    view
}

fn roles(rows: &[SummaryRow]) -> Vec<&str> {
    rows.iter().map(|r| r.role.as_str()).collect()
}

#[tokio::test]
async fn first_page_holds_items_by_page_rows() {
    let view = loaded_view(numbered_rows(60)).await;

    let page = view.page(&PageRequest::default());

    assert_eq!(page.page, 1);
    assert_eq!(page.page_count, 3);
    assert_eq!(page.total_items, 60);
    assert_eq!(page.rows.len(), 25);
    assert_eq!(page.rows[0].role, "role-000");
    assert_eq!(page.page_links, vec![1, 2, 3]);
}

#[tokio::test]
async fn last_page_holds_the_remainder() {
    let view = loaded_view(numbered_rows(60)).await;

    let page = view.page(&PageRequest::page(3));

    assert_eq!(page.rows.len(), 10);
    assert_eq!(page.rows[0].role, "role-050");
}

#[tokio::test]
async fn out_of_range_pages_are_clamped() {
    let view = loaded_view(numbered_rows(30)).await;

    assert_eq!(view.page(&PageRequest::page(0)).page, 1);

    let page = view.page(&PageRequest::page(99));
    assert_eq!(page.page, 2);
    assert_eq!(page.rows.len(), 5);
}

#[tokio::test]
async fn page_links_are_capped_at_max_size() {
    let view = loaded_view(numbered_rows(25 * 20)).await;

    let page = view.page(&PageRequest::page(10));

    assert_eq!(page.page_count, 20);
    assert_eq!(page.page_links, (6..=13).collect::<Vec<_>>());
}

#[tokio::test]
async fn empty_view_still_has_one_page() {
    let view = loaded_view(Vec::new()).await;

    let page = view.page(&PageRequest::page(4));

    assert_eq!(page.page, 1);
    assert_eq!(page.page_count, 1);
    assert_eq!(page.total_items, 0);
    assert!(page.rows.is_empty());
    assert_eq!(page.page_links, vec![1]);
}

#[tokio::test]
async fn global_search_matches_any_column_case_insensitively() {
    let view = loaded_view(vec![
        row("www-data", 12, 0),
        row("ops", 3, 1),
        row("Mesos", 0, 12),
    ])
    .await;

    let by_role = view.page(&PageRequest::default().with_search("  MES "));
    assert_eq!(roles(&by_role.rows), vec!["Mesos"]);

    let by_count = view.page(&PageRequest::default().with_search("12"));
    assert_eq!(roles(&by_count.rows), vec!["www-data", "Mesos"]);
    assert_eq!(by_count.total_items, 2);

    let blank = view.page(&PageRequest::default().with_search("   "));
    assert_eq!(blank.total_items, 3);
}

#[tokio::test]
async fn search_is_ignored_when_deactivated() {
    let client = StaticClient::new(FetchResult::ok(vec![row("www-data", 1, 0), row("ops", 1, 0)]));
    let mut view = SummaryViewModel::initialize();
    view.load_summaries(&client).await.unwrap();

    let mut state = view.into_state();
    state.pagination.is_global_search_activated = false;

    let page = state.page(&PageRequest::default().with_search("ops"));
    assert_eq!(page.total_items, 2);
}

#[tokio::test]
async fn disabled_pagination_returns_everything() {
    let view = loaded_view(numbered_rows(40)).await;
    let mut state = view.into_state();
    state.pagination.is_pagination_enabled = false;

    let page = state.page(&PageRequest::page(2));

    assert_eq!(page.page, 1);
    assert_eq!(page.page_count, 1);
    assert_eq!(page.rows.len(), 40);
}

#[tokio::test]
async fn sorts_numeric_columns_numerically() {
    let view = loaded_view(vec![row("a", 9, 0), row("b", 10, 2), row("c", 1, 1)]).await;

    let asc = view.page(&PageRequest::default().sorted_by("jobCount", false));
    assert_eq!(roles(&asc.rows), vec!["c", "a", "b"]);

    let desc = view.page(&PageRequest::default().sorted_by("cronJobCount", true));
    assert_eq!(roles(&desc.rows), vec!["b", "c", "a"]);
}

#[tokio::test]
async fn equal_sort_keys_keep_fetch_order() {
    let view = loaded_view(vec![
        row("d", 2, 0),
        row("b", 1, 0),
        row("c", 2, 0),
        row("a", 1, 0),
    ])
    .await;

    let asc = view.page(&PageRequest::default().sorted_by("jobCount", false));
    assert_eq!(roles(&asc.rows), vec!["b", "a", "d", "c"]);
}

#[tokio::test]
async fn unknown_sort_field_keeps_fetch_order() {
    let view = loaded_view(vec![row("b", 1, 0), row("a", 2, 0)]).await;

    let page = view.page(&PageRequest::default().sorted_by("owner", false));

    assert_eq!(roles(&page.rows), vec!["b", "a"]);
}

#[tokio::test]
async fn search_then_sort_then_paginate() {
    let view = loaded_view(numbered_rows(60)).await;

    let page = view.page(
        &PageRequest::page(2)
            .with_search("role-0")
            .sorted_by("role", true),
    );

    // role-000 .. role-059 all match; descending puts role-059 first
    assert_eq!(page.total_items, 60);
    assert_eq!(page.rows[0].role, "role-034");
}

#[test]
fn role_cells_link_to_the_role_page() {
    assert_eq!(role_link("www-data"), "/scheduler/www-data");
}
