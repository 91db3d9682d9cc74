//! Client-side windowing over an already-fetched ordered dataset.
//!
//! The table never owns its rows: they stay in the resolved profile and are
//! lent in at render time. The table only remembers which dataset it is
//! bound to, how long it is, and the current page index.

use std::num::NonZeroUsize;
use std::ops::Range;

use stintel_core::NOT_AVAILABLE;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// A row the table can look up cells in by column key.
pub trait TableRow {
    /// Raw value for `key`, or `None` when the row has no such field.
    fn field(&self, key: &str) -> Option<String>;
}

impl TableRow for serde_json::Value {
    fn field(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

pub type CellRenderer<R> = fn(&R) -> String;

pub struct Column<R> {
    pub key: &'static str,
    pub label: &'static str,
    pub render: Option<CellRenderer<R>>,
}

impl<R> Column<R> {
    #[must_use]
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            render: None,
        }
    }

    /// A column whose cell is computed from the whole row.
    #[must_use]
    pub fn rendered(key: &'static str, label: &'static str, render: CellRenderer<R>) -> Self {
        Self {
            key,
            label,
            render: Some(render),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label,
            render: self.render,
        }
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("rendered", &self.render.is_some())
            .finish()
    }
}

/// Identity of the dataset a table is windowing. A new identity means a new
/// dataset even when its contents happen to be equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetId(pub u64);

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    /// `"6-10 of 12"`, or `"0-0 of 0"` when empty.
    pub range_label: String,
    pub page_index: usize,
    pub page_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone)]
pub struct PaginatedTable<R> {
    columns: Vec<Column<R>>,
    page_size: NonZeroUsize,
    sentinel: String,
    page_index: usize,
    dataset: Option<DatasetId>,
    len: usize,
}

impl<R> PaginatedTable<R> {
    #[must_use]
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            sentinel: NOT_AVAILABLE.to_owned(),
            page_index: 0,
            dataset: None,
            len: 0,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Text shown for a column the row does not have.
    #[must_use]
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Binds the table to a dataset of `len` rows.
    ///
    /// A different `dataset` resets to the first page; the same dataset
    /// with a new length keeps the page but clamps it into range.
    pub fn bind(&mut self, dataset: DatasetId, len: usize) {
        if self.dataset != Some(dataset) {
            self.page_index = 0;
            self.dataset = Some(dataset);
        }
        self.len = len;
        self.page_index = self.page_index.min(self.last_page_index());
    }

    /// Detaches from any dataset; the table becomes empty.
    pub fn clear(&mut self) {
        self.dataset = None;
        self.len = 0;
        self.page_index = 0;
    }

    /// Advances one page. Returns `false` (and does nothing) on the last page.
    pub fn next(&mut self) -> bool {
        let target = (self.page_index + 1).min(self.last_page_index());
        let moved = target != self.page_index;
        self.page_index = target;
        moved
    }

    /// Goes back one page. Returns `false` (and does nothing) on the first page.
    pub fn previous(&mut self) -> bool {
        let target = self.page_index.saturating_sub(1);
        let moved = target != self.page_index;
        self.page_index = target;
        moved
    }

    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn dataset(&self) -> Option<DatasetId> {
        self.dataset
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.len.div_ceil(self.page_size.get())
    }

    fn last_page_index(&self) -> usize {
        self.page_count().saturating_sub(1)
    }
}

impl<R: TableRow> PaginatedTable<R> {
    /// Renders the current page of `rows`.
    ///
    /// The window is computed against `rows` itself, so a caller that forgot
    /// to [`bind`](Self::bind) still never sees an out-of-range page.
    #[must_use]
    pub fn page(&self, rows: &[R]) -> Page {
        let size = self.page_size.get();
        let n = rows.len();
        let page_count = n.div_ceil(size);
        let page_index = self.page_index.min(page_count.saturating_sub(1));
        let range = window(page_index, size, n);

        let range_label = if n == 0 {
            "0-0 of 0".to_owned()
        } else {
            format!("{}-{} of {n}", range.start + 1, range.end)
        };

        let rendered = rows[range.clone()]
            .iter()
            .map(|row| self.columns.iter().map(|col| self.cell(row, col)).collect())
            .collect();

        Page {
            headers: self.columns.iter().map(|c| c.label).collect(),
            rows: rendered,
            range_label,
            page_index,
            page_count,
            has_previous: page_index > 0,
            has_next: range.end < n,
        }
    }

    fn cell(&self, row: &R, column: &Column<R>) -> String {
        match column.render {
            Some(render) => render(row),
            None => row
                .field(column.key)
                .unwrap_or_else(|| self.sentinel.clone()),
        }
    }
}

fn window(page_index: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = (page_index * page_size).min(len);
    let end = (start + page_size).min(len);
    start..end
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rows(n: usize) -> Vec<serde_json::Value> {
        (0..n).map(|i| json!({ "id": i, "name": format!("row-{i}") })).collect()
    }

    fn table(page_size: usize) -> PaginatedTable<serde_json::Value> {
        PaginatedTable::new(vec![Column::new("id", "Id"), Column::new("name", "Name")])
            .with_page_size(NonZeroUsize::new(page_size).unwrap())
    }

    #[test]
    fn defaults_to_five_rows_and_na_sentinel() {
        let t = PaginatedTable::<serde_json::Value>::new(vec![Column::new("missing", "Missing")]);
        assert_eq!(t.page_size(), 5);
        let page = t.page(&[json!({})]);
        assert_eq!(page.rows, vec![vec!["N/A".to_owned()]]);
    }

    #[test]
    fn first_page_shows_first_window() {
        let data = rows(12);
        let mut t = table(5);
        t.bind(DatasetId(1), data.len());
        let page = t.page(&data);
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.rows[0], vec!["0", "row-0"]);
        assert_eq!(page.range_label, "1-5 of 12");
        assert!(!page.has_previous);
        assert!(page.has_next);
        assert_eq!(page.page_count, 3);
    }

    #[test]
    fn last_page_is_partial() {
        let data = rows(12);
        let mut t = table(5);
        t.bind(DatasetId(1), data.len());
        assert!(t.next());
        assert!(t.next());
        let page = t.page(&data);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.range_label, "11-12 of 12");
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn next_at_last_page_is_noop() {
        let mut t = table(5);
        t.bind(DatasetId(1), 10);
        assert!(t.next());
        assert!(!t.next());
        assert_eq!(t.page_index(), 1);
    }

    #[test]
    fn previous_at_first_page_is_noop() {
        let mut t = table(5);
        t.bind(DatasetId(1), 10);
        assert!(!t.previous());
        assert_eq!(t.page_index(), 0);
    }

    #[test]
    fn empty_dataset_has_no_rows_and_no_navigation() {
        let data = rows(0);
        let mut t = table(5);
        t.bind(DatasetId(1), 0);
        assert!(!t.next());
        assert!(!t.previous());
        let page = t.page(&data);
        assert!(page.rows.is_empty());
        assert_eq!(page.range_label, "0-0 of 0");
        assert!(!page.has_previous);
        assert!(!page.has_next);
        assert_eq!(t.page_index(), 0);
    }

    #[test]
    fn new_dataset_resets_page_index() {
        let mut t = table(5);
        t.bind(DatasetId(1), 20);
        t.next();
        t.next();
        assert_eq!(t.page_index(), 2);

        t.bind(DatasetId(2), 20);
        assert_eq!(t.page_index(), 0);
    }

    #[test]
    fn same_dataset_shrinking_clamps_page_index() {
        let mut t = table(5);
        t.bind(DatasetId(1), 20);
        t.next();
        t.next();
        t.next();
        t.bind(DatasetId(1), 7);
        assert_eq!(t.page_index(), 1);
    }

    #[test]
    fn page_never_goes_out_of_range_without_rebinding() {
        let mut t = table(5);
        t.bind(DatasetId(1), 20);
        t.next();
        t.next();
        let page = t.page(&rows(3));
        assert_eq!(page.rows.len(), 3);
        assert_eq!(page.page_index, 0);
    }

    #[test]
    fn clear_empties_the_table() {
        let mut t = table(5);
        t.bind(DatasetId(1), 20);
        t.next();
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.page_index(), 0);
        assert_eq!(t.dataset(), None);
    }

    #[test]
    fn renderer_overrides_field_lookup() {
        fn shout(row: &serde_json::Value) -> String {
            row.field("name").unwrap_or_default().to_uppercase()
        }
        let mut t = PaginatedTable::new(vec![Column::rendered("name", "Name", shout)]);
        t.bind(DatasetId(1), 1);
        let page = t.page(&[json!({ "name": "acme" })]);
        assert_eq!(page.rows[0], vec!["ACME"]);
    }

    #[test]
    fn custom_sentinel_for_missing_fields() {
        let t = table(5).with_sentinel("-");
        let page = t.page(&[json!({ "id": 1, "name": null })]);
        assert_eq!(page.rows[0], vec!["1", "-"]);
    }

    #[test]
    fn page_size_and_index_invariants_hold_for_any_walk() {
        for page_size in 1..=7 {
            for n in 0..=23 {
                let data = rows(n);
                let mut t = table(page_size);
                t.bind(DatasetId(1), n);
                let last = n.div_ceil(page_size).saturating_sub(1);

                let mut seen = 0;
                loop {
                    let page = t.page(&data);
                    assert!(page.rows.len() <= page_size);
                    assert!(t.page_index() <= last);
                    seen += page.rows.len();
                    if !t.next() {
                        break;
                    }
                }
                assert_eq!(seen, n, "every row shown exactly once (p={page_size}, n={n})");
                assert_eq!(t.page_index(), last);

                while t.previous() {
                    assert!(t.page_index() <= last);
                }
                assert_eq!(t.page_index(), 0);
            }
        }
    }
}
