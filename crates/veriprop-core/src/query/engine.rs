//! QueryPage engine: filter -> sort -> paginate over an in-memory snapshot.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::page::{Page, PageWindow};
use super::params::QueryParams;

/// A record the engine knows how to search, filter and order.
///
/// # 実装ガイド
/// - `search_fields`: free-text `query` の対象フィールド（どれか一つに部分一致すれば OK）
/// - `status`: `status` フィルタと比較する値
/// - `FILTER_KEYS` / `filter_value`: リソース固有の完全一致フィルタ
/// - `date_created`: `None` を返すリソースは入力順のまま
pub trait Listable: Clone {
    /// Resource name, used in logs.
    const RESOURCE: &'static str;

    /// Extra filters this resource understands (e.g. `verifier_id`).
    /// Unknown keys in the request are ignored.
    const FILTER_KEYS: &'static [&'static str] = &[];

    fn search_fields(&self) -> Vec<&str>;

    fn status(&self) -> Option<&str> {
        None
    }

    fn filter_value(&self, _key: &str) -> Option<String> {
        None
    }

    fn date_created(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Filter, sort and slice `items`.
///
/// `compare` runs through a stable sort, so records it considers equal keep
/// their input order.
pub fn query_page<T, P, C>(items: &[T], predicate: P, compare: C, window: PageWindow) -> Page<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
    C: Fn(&T, &T) -> Ordering,
{
    let mut matched: Vec<&T> = items.iter().filter(|item| predicate(*item)).collect();
    matched.sort_by(|a, b| compare(*a, *b));
    Page::from_sorted(&matched, window)
}

/// Run a [`Listable`] collection through the engine with normalized params.
pub fn list_page<T: Listable>(items: &[T], params: &QueryParams) -> Page<T> {
    let needle = params.query.as_deref().map(str::to_lowercase);
    let page = query_page(
        items,
        |record| matches(record, needle.as_deref(), params),
        newest_first,
        PageWindow::new(params.page, params.page_size),
    );

    tracing::debug!(
        resource = T::RESOURCE,
        scanned = items.len(),
        total = page.total,
        page = page.page,
        page_size = page.page_size,
        count = page.count,
        "list page"
    );
    page
}

/// Descending `date_created`; records without one sort after those with one.
pub fn newest_first<T: Listable>(a: &T, b: &T) -> Ordering {
    b.date_created().cmp(&a.date_created())
}

fn matches<T: Listable>(record: &T, needle: Option<&str>, params: &QueryParams) -> bool {
    if let Some(needle) = needle
        && !record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    {
        return false;
    }

    if let Some(expected) = params.status.as_deref()
        && !record.status().is_some_and(|value| one_of(value, expected))
    {
        return false;
    }

    T::FILTER_KEYS.iter().all(|key| match params.filter(key) {
        Some(expected) => record
            .filter_value(key)
            .is_some_and(|value| one_of(&value, expected)),
        None => true,
    })
}

/// Case-insensitive exact match against a comma-separated list of accepted values.
fn one_of(value: &str, expected: &str) -> bool {
    let mut accepted = expected.split(',').map(str::trim).filter(|e| !e.is_empty()).peekable();
    if accepted.peek().is_none() {
        return true;
    }
    accepted.any(|e| e.eq_ignore_ascii_case(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        note: &'static str,
        status: &'static str,
        owner: &'static str,
        created: Option<DateTime<Utc>>,
    }

    impl Listable for Row {
        const RESOURCE: &'static str = "rows";
        const FILTER_KEYS: &'static [&'static str] = &["owner"];

        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.note]
        }

        fn status(&self) -> Option<&str> {
            Some(self.status)
        }

        fn filter_value(&self, key: &str) -> Option<String> {
            (key == "owner").then(|| self.owner.to_string())
        }

        fn date_created(&self) -> Option<DateTime<Utc>> {
            self.created
        }
    }

    fn at(hours: i64) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours))
    }

    fn row(name: &'static str, status: &'static str, owner: &'static str, h: i64) -> Row {
        Row {
            name,
            note: "",
            status,
            owner,
            created: at(h),
        }
    }

    fn names(page: &Page<Row>) -> Vec<&'static str> {
        page.items.iter().map(|r| r.name).collect()
    }

    fn sample() -> Vec<Row> {
        vec![
            row("Roof inspection", "OPEN", "ann", 1),
            row("Title search", "CLOSED", "bob", 5),
            row("Boundary survey", "open", "ann", 3),
            row("Roof repair check", "PENDING", "cat", 4),
        ]
    }

    #[test]
    fn sorts_newest_first() {
        let page = list_page(&sample(), &QueryParams::new());
        assert_eq!(
            names(&page),
            vec!["Title search", "Roof repair check", "Boundary survey", "Roof inspection"]
        );
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let rows = vec![
            row("a", "OPEN", "x", 2),
            row("b", "OPEN", "x", 2),
            row("newer", "OPEN", "x", 9),
            row("c", "OPEN", "x", 2),
        ];
        let page = list_page(&rows, &QueryParams::new());
        assert_eq!(names(&page), vec!["newer", "a", "b", "c"]);
    }

    #[test]
    fn records_without_timestamp_keep_input_order_and_sort_last() {
        let mut rows = sample();
        rows[0].created = None;
        rows[2].created = None;
        let page = list_page(&rows, &QueryParams::new());
        assert_eq!(
            names(&page),
            vec!["Title search", "Roof repair check", "Roof inspection", "Boundary survey"]
        );
    }

    #[rstest]
    #[case::lowercase("roof", 2)]
    #[case::uppercase("ROOF", 2)]
    #[case::substring("vey", 1)]
    #[case::nothing("chimney", 0)]
    fn free_text_is_case_insensitive_substring(#[case] q: &str, #[case] expected: usize) {
        let page = list_page(&sample(), &QueryParams::new().with_query(q));
        assert_eq!(page.total, expected);
    }

    #[test]
    fn free_text_checks_every_designated_field() {
        let mut rows = sample();
        rows[1].note = "needs the CHIMNEY photos";
        let page = list_page(&rows, &QueryParams::new().with_query("chimney"));
        assert_eq!(names(&page), vec!["Title search"]);
    }

    #[test]
    fn status_is_exact_and_case_insensitive() {
        let page = list_page(&sample(), &QueryParams::new().with_status("OPEN"));
        assert_eq!(names(&page), vec!["Boundary survey", "Roof inspection"]);

        // exact, not substring
        let page = list_page(&sample(), &QueryParams::new().with_status("OPE"));
        assert_eq!(page.total, 0);
    }

    #[test]
    fn status_accepts_a_list() {
        let page = list_page(&sample(), &QueryParams::new().with_status("closed, pending"));
        assert_eq!(names(&page), vec!["Title search", "Roof repair check"]);
    }

    #[test]
    fn status_all_equals_no_filter() {
        let unfiltered = list_page(&sample(), &QueryParams::new());
        let all = list_page(&sample(), &QueryParams::new().with_status("all"));
        assert_eq!(all.total, unfiltered.total);
        assert_eq!(all, unfiltered);
    }

    #[test]
    fn filters_are_conjunctive() {
        let params = QueryParams::new()
            .with_query("roof")
            .with_status("open")
            .with_filter("owner", "ann");
        let page = list_page(&sample(), &params);
        assert_eq!(names(&page), vec!["Roof inspection"]);

        let params = QueryParams::new().with_query("roof").with_filter("owner", "bob");
        assert_eq!(list_page(&sample(), &params).total, 0);
    }

    #[test]
    fn unknown_filter_keys_are_ignored() {
        let params = QueryParams::new().with_filter("colour", "blue");
        assert_eq!(list_page(&sample(), &params).total, 4);
    }

    #[test]
    fn is_idempotent() {
        let rows = sample();
        let params = QueryParams::new().with_page_size(2).with_page(1);
        assert_eq!(list_page(&rows, &params), list_page(&rows, &params));
    }

    #[test]
    fn generic_engine_takes_any_predicate_and_comparator() {
        let numbers = vec![5, 3, 8, 1, 9, 2];
        let page = query_page(
            &numbers,
            |n| n % 2 == 1,
            |a, b| a.cmp(b),
            PageWindow::new(0, 2),
        );
        assert_eq!(page.items, vec![1, 3]);
        assert_eq!(page.total, 4);
        assert_eq!(page.next_page, Some(1));
    }

    #[test]
    fn one_of_handles_degenerate_lists() {
        assert!(one_of("OPEN", " , "));
        assert!(one_of("OPEN", "closed,open"));
        assert!(!one_of("OPEN", "closed"));
    }
}
