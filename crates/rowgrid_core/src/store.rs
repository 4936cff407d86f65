use crate::filter::CompiledFilter;
use crate::form::{self, InsertPosition, RowDraft};
use crate::search::SearchQuery;
use crate::sort::compare_rows;
use crate::{
    ColumnDescriptor, FilterSpec, PageRequest, Row, RowKey, SelectAllState, SelectMode,
    SelectionSet, SortDirection, SortInfo, StoreError, TableConfig, TableHooks, Value, ViewMode,
    page_window,
};
use std::collections::HashSet;

/// In-memory row collection backing a table.
///
/// Rows are kept in insertion order. Sorting produces a separate ordering, and
/// filter, search and view mode narrow that ordering into the cached view.
/// Paging slices the view only when `get()` is called, so the page number is
/// always clamped against the current view size.
///
/// Mutating projections return `&mut Self` so reads can be chained:
///
/// ```
/// # use rowgrid_core::{ColumnDescriptor, RowStore, SortDirection, TableConfig};
/// let config = TableConfig::new(vec![
///     ColumnDescriptor::key("id"),
///     ColumnDescriptor::new("price").sortable(),
/// ]);
/// let mut store = RowStore::new(config, Vec::new()).unwrap();
/// let view = store.sort(SortDirection::Descending, "price").unwrap().get();
/// assert!(view.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RowStore {
    columns: Vec<ColumnDescriptor>,
    key_field: String,
    pagination: bool,
    multi_column_search: bool,
    select_mode: SelectMode,
    csv_file_name: Option<String>,
    pagination_size: usize,
    hooks: TableHooks,

    rows: Vec<Row>,
    keys: HashSet<RowKey>,
    order: Vec<usize>,
    view: Vec<usize>,

    sort: Option<SortInfo>,
    filter: Option<CompiledFilter>,
    search: Option<SearchQuery>,
    view_mode: ViewMode,
    page: PageRequest,
    selected: SelectionSet,
}

impl RowStore {
    /// Validate the configuration and load the initial rows.
    ///
    /// Initially selected keys that match no row are dropped, and the default
    /// sort is applied before the store is returned. Hooks are installed last,
    /// so none of them fire during construction.
    pub fn new(config: TableConfig, rows: Vec<Row>) -> Result<Self, StoreError> {
        let key_field = config.validate()?;
        let page = config.pagination.initial_page();

        let mut store = Self {
            columns: config.columns,
            key_field,
            pagination: config.pagination.enabled,
            multi_column_search: config.multi_column_search,
            select_mode: config.select_mode,
            csv_file_name: config.csv_file_name,
            pagination_size: config.pagination.pagination_size,
            hooks: TableHooks::default(),
            rows: Vec::new(),
            keys: HashSet::new(),
            order: Vec::new(),
            view: Vec::new(),
            sort: None,
            filter: None,
            search: None,
            view_mode: ViewMode::All,
            page,
            selected: SelectionSet::new(),
        };

        store.set_data(rows)?;

        if let Some(sort) = config.default_sort {
            store.sort(sort.direction, &sort.field)?;
        }

        if !config.selected.is_empty() {
            let keys = config.selected.into_iter().filter_map(RowKey::new);
            store.set_selected_row_keys(keys);
        }

        store.hooks = config.hooks;
        Ok(store)
    }

    // --- Data ---

    /// Replace every row. The active sort, filter and search are re-applied;
    /// selected keys that no longer exist are dropped.
    pub fn set_data(&mut self, rows: Vec<Row>) -> Result<&mut Self, StoreError> {
        let mut keys = HashSet::with_capacity(rows.len());
        for row in &rows {
            let key = self.key_of(row)?;
            if !keys.insert(key.clone()) {
                return Err(StoreError::DuplicateKey(key.to_string()));
            }
        }

        self.rows = rows;
        self.keys = keys;
        self.order = (0..self.rows.len()).collect();
        self.resort();
        self.prune_selection();
        self.rebuild_view();

        log::debug!("Loaded {} rows into store", self.rows.len());
        Ok(self)
    }

    /// Append a row. It lands in sort position if a sort is active.
    pub fn add(&mut self, row: Row) -> Result<RowKey, StoreError> {
        self.insert_row(row, InsertPosition::End)
    }

    /// Insert a row before all others.
    pub fn add_at_begin(&mut self, row: Row) -> Result<RowKey, StoreError> {
        self.insert_row(row, InsertPosition::Begin)
    }

    fn insert_row(&mut self, row: Row, position: InsertPosition) -> Result<RowKey, StoreError> {
        let key = self.key_of(&row)?;
        if self.keys.contains(&key) {
            log::warn!("Rejected row with duplicate key {}", key);
            return Err(StoreError::DuplicateKey(key.to_string()));
        }

        let row_ix = match position {
            InsertPosition::End => {
                self.order.push(self.rows.len());
                self.rows.push(row);
                self.rows.len() - 1
            }
            InsertPosition::Begin => {
                for ix in &mut self.order {
                    *ix += 1;
                }
                self.order.insert(0, 0);
                self.rows.insert(0, row);
                0
            }
        };

        self.keys.insert(key.clone());
        self.resort();
        self.rebuild_view();

        if let Some(hook) = &self.hooks.after_insert_row {
            hook.call(&self.rows[row_ix]);
        }

        Ok(key)
    }

    /// Delete rows by key and drop those keys from the selection.
    ///
    /// Returns the number of rows removed; unknown keys are ignored.
    pub fn remove(&mut self, keys: impl IntoIterator<Item = RowKey>) -> usize {
        let doomed: HashSet<RowKey> = keys.into_iter().collect();
        if doomed.is_empty() {
            return 0;
        }

        let mut remap = Vec::with_capacity(self.rows.len());
        let mut kept = Vec::with_capacity(self.rows.len());
        let mut removed_keys = Vec::new();
        for row in std::mem::take(&mut self.rows) {
            let doomed_key = self.key_of(&row).ok().filter(|key| doomed.contains(key));
            if let Some(key) = doomed_key {
                removed_keys.push(key);
                remap.push(None);
            } else {
                remap.push(Some(kept.len()));
                kept.push(row);
            }
        }

        let removed = removed_keys.len();
        self.rows = kept;
        self.order = self.order.iter().filter_map(|&ix| remap[ix]).collect();

        for key in &doomed {
            self.keys.remove(key);
            self.selected.remove(key);
        }

        self.rebuild_view();

        log::debug!("Removed {} rows", removed);
        if removed > 0 {
            if let Some(hook) = &self.hooks.after_delete_row {
                hook.call(&removed_keys);
            }
        }
        removed
    }

    /// Set one field of the row at `row_index` in the current `get()` output.
    ///
    /// The edited row keeps its place until the next projection change.
    /// Read-only columns are rejected with `NotEditable`.
    pub fn edit(
        &mut self,
        value: Value,
        row_index: usize,
        field: &str,
    ) -> Result<&mut Self, StoreError> {
        let column = self
            .column(field)
            .ok_or_else(|| StoreError::UnknownColumn(field.to_string()))?;
        if !column.editable {
            log::warn!("Rejected edit of read-only column {}", field);
            return Err(StoreError::NotEditable(field.to_string()));
        }

        let range = self.visible_range();
        if row_index >= range.len() {
            log::warn!(
                "Ignored edit of row {} in a view of {} rows",
                row_index,
                range.len()
            );
            return Err(StoreError::RowIndexOutOfRange {
                index: row_index,
                len: range.len(),
            });
        }

        let row_ix = self.view[range.start + row_index];

        if field == self.key_field {
            let new_key =
                RowKey::new(value.clone()).ok_or_else(|| StoreError::MissingKey(field.to_string()))?;
            let old_key = self.key_of(&self.rows[row_ix])?;

            if new_key != old_key {
                if self.keys.contains(&new_key) {
                    return Err(StoreError::DuplicateKey(new_key.to_string()));
                }
                self.keys.remove(&old_key);
                self.keys.insert(new_key.clone());
                if self.selected.remove(&old_key) {
                    self.selected.insert(new_key);
                }
            }
        }

        self.rows[row_ix].insert(field.to_string(), value);

        if let Some(hook) = &self.hooks.after_save_cell {
            let row = &self.rows[row_ix];
            hook.call(row, field, row.get(field).unwrap_or(&Value::Null));
        }
        Ok(self)
    }

    /// Parse and validate insert-form input into a row without storing it.
    pub fn build_row(&self, draft: &RowDraft) -> Result<Row, StoreError> {
        form::build_row(&self.columns, draft).map_err(StoreError::Validation)
    }

    /// Validate a draft and insert the resulting row.
    pub fn insert_draft(
        &mut self,
        draft: &RowDraft,
        position: InsertPosition,
    ) -> Result<RowKey, StoreError> {
        let row = self.build_row(draft)?;
        self.insert_row(row, position)
    }

    // --- Projections ---

    /// Stable sort of the current ordering by one column.
    ///
    /// Successive sorts compose: rows tied on the new column keep the order
    /// left by the previous one.
    pub fn sort(&mut self, direction: SortDirection, field: &str) -> Result<&mut Self, StoreError> {
        let column = self
            .column(field)
            .ok_or_else(|| StoreError::UnknownColumn(field.to_string()))?;
        if !column.sortable {
            return Err(StoreError::NotSortable(field.to_string()));
        }

        self.sort = Some(SortInfo {
            field: field.to_string(),
            direction,
        });
        self.resort();
        self.rebuild_view();

        log::debug!("Sorted by {} {}", field, direction.as_str());
        if let Some(hook) = &self.hooks.on_sort_change {
            hook.call(field, direction);
        }
        Ok(self)
    }

    /// Drop the sort and go back to insertion order.
    pub fn clear_sort(&mut self) -> &mut Self {
        self.sort = None;
        self.order = (0..self.rows.len()).collect();
        self.rebuild_view();
        self
    }

    /// Replace the column filters. An empty spec clears filtering.
    /// The page goes back to the first one.
    pub fn filter(&mut self, spec: FilterSpec) -> Result<&mut Self, StoreError> {
        self.filter = if spec.is_empty() {
            None
        } else {
            Some(CompiledFilter::compile(spec, &self.columns)?)
        };
        self.page.page = 1;
        self.rebuild_view();

        log::debug!("Filter applied, {} rows match", self.view.len());
        if let Some(hook) = &self.hooks.after_column_filter {
            let cleared = FilterSpec::new();
            let spec = self.filter_spec().unwrap_or(&cleared);
            hook.call(spec, &self.data_ignoring_pagination());
        }
        Ok(self)
    }

    /// Free-text search over searchable columns. Blank text clears it.
    /// The page goes back to the first one.
    pub fn search(&mut self, text: &str) -> &mut Self {
        self.search = SearchQuery::parse(text, self.multi_column_search);
        self.page.page = 1;
        self.rebuild_view();

        log::debug!("Search '{}' matched {} rows", text, self.view.len());
        if let Some(hook) = &self.hooks.after_search {
            hook.call(text, &self.data_ignoring_pagination());
        }
        self
    }

    /// Select the page `get()` returns when pagination is enabled.
    pub fn page(&mut self, page: usize, size: usize) -> Result<&mut Self, StoreError> {
        self.page = PageRequest::new(page, size).ok_or(StoreError::InvalidPage { page, size })?;
        if let Some(hook) = &self.hooks.on_page_change {
            hook.call(page, size);
        }
        Ok(self)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> &mut Self {
        if self.view_mode != mode {
            self.view_mode = mode;
            self.page.page = 1;
            self.rebuild_view();
        }
        self
    }

    pub fn toggle_only_selected(&mut self) -> &mut Self {
        let next = match self.view_mode {
            ViewMode::All => ViewMode::OnlySelected,
            ViewMode::OnlySelected => ViewMode::All,
        };
        self.set_view_mode(next)
    }

    // --- Reads ---

    /// The materialized view: narrowed, ordered and, with pagination, sliced.
    pub fn get(&self) -> Vec<&Row> {
        self.view[self.visible_range()]
            .iter()
            .map(|&ix| &self.rows[ix])
            .collect()
    }

    /// The view without the page slice, for export and callbacks.
    pub fn data_ignoring_pagination(&self) -> Vec<&Row> {
        self.view.iter().map(|&ix| &self.rows[ix]).collect()
    }

    /// Number of rows in the view before paging.
    pub fn data_num(&self) -> usize {
        self.view.len()
    }

    /// Total rows stored, ignoring every projection.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keys of every stored row, in insertion order.
    pub fn all_row_keys(&self) -> Vec<RowKey> {
        self.rows.iter().filter_map(|row| self.key_of(row).ok()).collect()
    }

    pub fn row_by_key(&self, key: &RowKey) -> Option<&Row> {
        self.rows
            .iter()
            .find(|row| self.key_of(row).is_ok_and(|k| &k == key))
    }

    pub fn contains_key(&self, key: &RowKey) -> bool {
        self.keys.contains(key)
    }

    /// Page actually shown, after clamping to the last valid page.
    pub fn current_page(&self) -> usize {
        self.page.clamped(self.view.len()).page
    }

    pub fn page_size(&self) -> usize {
        self.page.size
    }

    pub fn last_page(&self) -> usize {
        PageRequest::last_page(self.page.size, self.view.len())
    }

    pub fn total_pages(&self) -> usize {
        self.last_page()
    }

    /// Page numbers to offer as links around the current page.
    pub fn page_links(&self) -> std::ops::Range<usize> {
        page_window(self.current_page(), self.last_page(), self.pagination_size)
    }

    pub fn is_pagination(&self) -> bool {
        self.pagination
    }

    pub fn sort_info(&self) -> Option<&SortInfo> {
        self.sort.as_ref()
    }

    pub fn filter_spec(&self) -> Option<&FilterSpec> {
        self.filter.as_ref().map(CompiledFilter::spec)
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search.as_ref().map(SearchQuery::text)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    // --- Selection ---

    /// Replace the selection. Keys matching no row are dropped, and in single
    /// select mode only the first known key is kept.
    pub fn set_selected_row_keys(&mut self, keys: impl IntoIterator<Item = RowKey>) -> &mut Self {
        let (mut known, unknown): (Vec<RowKey>, Vec<RowKey>) =
            keys.into_iter().partition(|key| self.keys.contains(key));
        if !unknown.is_empty() {
            log::warn!("Ignored {} selected keys with no matching row", unknown.len());
        }
        if self.select_mode == SelectMode::Single && known.len() > 1 {
            log::warn!("Single select mode keeps 1 of {} selected keys", known.len());
            known.truncate(1);
        }

        self.selected.replace(known);
        self.selection_changed();
        self
    }

    pub fn selected_row_keys(&self) -> Vec<RowKey> {
        self.selected.keys().cloned().collect()
    }

    pub fn is_selected(&self, key: &RowKey) -> bool {
        self.selected.contains(key)
    }

    /// Apply a row click according to the configured select mode.
    ///
    /// Returns `false` if the key matches no row or the `on_select` hook
    /// vetoed the change.
    pub fn select_row(&mut self, key: RowKey, selected: bool) -> bool {
        let Some(row) = self.row_by_key(&key) else {
            return false;
        };
        if let Some(hook) = &self.hooks.on_select {
            if !hook.call(row, selected) {
                log::debug!("Selection change of {} vetoed", key);
                return false;
            }
        }
        self.selected.apply(key, selected, self.select_mode);
        self.selection_changed();
        true
    }

    /// Select every stored row, or clear the selection, unless the
    /// `on_select_all` hook vetoes it.
    pub fn select_all(&mut self, selected: bool) -> &mut Self {
        if let Some(hook) = &self.hooks.on_select_all {
            let rows: Vec<&Row> = self.rows.iter().collect();
            if !hook.call(selected, &rows) {
                log::debug!("Select all ({}) vetoed", selected);
                return self;
            }
        }

        if selected {
            let keys = self.all_row_keys();
            self.selected.replace(keys);
        } else {
            self.selected.clear();
        }
        self.selection_changed();
        self
    }

    /// Drop every selected key without consulting hooks.
    pub fn clear_selection(&mut self) -> &mut Self {
        self.selected.clear();
        self.selection_changed();
        self
    }

    pub fn select_all_state(&self) -> SelectAllState {
        self.selected.select_all_state(self.rows.len())
    }

    pub fn select_mode(&self) -> SelectMode {
        self.select_mode
    }

    // --- Columns ---

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of non-hidden columns, in declaration order.
    pub fn visible_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| !c.hidden)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Display text of one cell, through the column formatter if any.
    pub fn format_cell(&self, row: &Row, field: &str) -> Option<String> {
        let column = self.column(field)?;
        let value = row.get(field).unwrap_or(&Value::Null);
        Some(column.format(value, row))
    }

    pub fn csv_file_name(&self) -> Option<&str> {
        self.csv_file_name.as_deref()
    }

    pub fn row_key(&self, row: &Row) -> Option<RowKey> {
        self.key_of(row).ok()
    }

    // --- Internals ---

    fn key_of(&self, row: &Row) -> Result<RowKey, StoreError> {
        row.get(&self.key_field)
            .cloned()
            .and_then(RowKey::new)
            .ok_or_else(|| StoreError::MissingKey(self.key_field.clone()))
    }

    fn visible_range(&self) -> std::ops::Range<usize> {
        if self.pagination {
            self.page.range(self.view.len())
        } else {
            0..self.view.len()
        }
    }

    fn resort(&mut self) {
        let Some(sort) = &self.sort else {
            return;
        };
        let Some(column) = self.columns.iter().find(|c| c.name == sort.field) else {
            return;
        };

        let rows = &self.rows;
        let direction = sort.direction;
        self.order
            .sort_by(|&a, &b| compare_rows(column, &rows[a], &rows[b], direction));
    }

    fn prune_selection(&mut self) {
        let keys = &self.keys;
        let dropped = self.selected.retain(|key| keys.contains(key));
        if !dropped.is_empty() {
            log::warn!("Dropped {} selected keys with no matching row", dropped.len());
        }
    }

    fn selection_changed(&mut self) {
        if self.view_mode == ViewMode::OnlySelected {
            self.rebuild_view();
        }
    }

    fn rebuild_view(&mut self) {
        let view: Vec<usize> = self
            .order
            .iter()
            .copied()
            .filter(|&ix| self.is_in_view(&self.rows[ix]))
            .collect();
        self.view = view;
    }

    fn is_in_view(&self, row: &Row) -> bool {
        let passes_filter = self
            .filter
            .as_ref()
            .is_none_or(|filter| filter.matches(row, &self.columns));
        let passes_search = self
            .search
            .as_ref()
            .is_none_or(|search| search.matches(row, &self.columns));
        let passes_mode = match self.view_mode {
            ViewMode::All => true,
            ViewMode::OnlySelected => self
                .key_of(row)
                .is_ok_and(|key| self.selected.contains(&key)),
        };

        passes_filter && passes_search && passes_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnFilter, PaginationSettings};

    fn product(id: i64, name: &str, price: i64) -> Row {
        let mut row = Row::new();
        row.insert("id".to_string(), Value::Int(id));
        row.insert("name".to_string(), Value::text(name));
        row.insert("price".to_string(), Value::Int(price));
        row
    }

    fn config() -> TableConfig {
        TableConfig::new(vec![
            ColumnDescriptor::key("id").sortable(),
            ColumnDescriptor::new("name").sortable(),
            ColumnDescriptor::new("price").sortable(),
        ])
    }

    fn ids(rows: &[&Row]) -> Vec<i64> {
        rows.iter()
            .map(|row| match row["id"] {
                Value::Int(id) => id,
                ref other => panic!("unexpected id {:?}", other),
            })
            .collect()
    }

    #[test]
    fn add_at_begin_puts_row_first() {
        let mut store = RowStore::new(config(), vec![product(1, "a", 1)]).unwrap();
        store.add_at_begin(product(2, "b", 2)).unwrap();
        store.add(product(3, "c", 3)).unwrap();
        assert_eq!(ids(&store.get()), vec![2, 1, 3]);
    }

    #[test]
    fn remove_keeps_ordering_consistent() {
        let rows = vec![product(1, "a", 3), product(2, "b", 1), product(3, "c", 2)];
        let mut store = RowStore::new(config(), rows).unwrap();
        store.sort(SortDirection::Ascending, "price").unwrap();

        assert_eq!(store.remove([RowKey::from(3)]), 1);
        assert_eq!(ids(&store.get()), vec![2, 1]);
        assert!(!store.contains_key(&RowKey::from(3)));
    }

    #[test]
    fn edit_key_updates_index_and_selection() {
        let mut store = RowStore::new(config(), vec![product(1, "a", 1), product(2, "b", 2)])
            .unwrap();
        store.set_selected_row_keys([RowKey::from(1)]);

        store.edit(Value::Int(10), 0, "id").unwrap();
        assert!(store.contains_key(&RowKey::from(10)));
        assert!(!store.contains_key(&RowKey::from(1)));
        assert_eq!(store.selected_row_keys(), vec![RowKey::from(10)]);

        assert!(matches!(
            store.edit(Value::Int(2), 0, "id"),
            Err(StoreError::DuplicateKey(_))
        ));
        assert!(matches!(
            store.edit(Value::Null, 0, "id"),
            Err(StoreError::MissingKey(_))
        ));
    }

    #[test]
    fn edit_index_is_relative_to_page() {
        let rows = (1..=5).map(|i| product(i, "x", i)).collect();
        let config = config().with_pagination(PaginationSettings::enabled());
        let mut store = RowStore::new(config, rows).unwrap();

        store.page(2, 2).unwrap();
        store.edit(Value::text("edited"), 1, "name").unwrap();

        let row = store.row_by_key(&RowKey::from(4)).unwrap();
        assert_eq!(row["name"], Value::text("edited"));
    }

    #[test]
    fn filter_and_search_reset_to_first_page() {
        let rows = (1..=30).map(|i| product(i, "item", i)).collect();
        let config = config().with_pagination(PaginationSettings::enabled());
        let mut store = RowStore::new(config, rows).unwrap();

        store.page(3, 10).unwrap();
        assert_eq!(store.current_page(), 3);

        store.search("item");
        assert_eq!(store.current_page(), 1);

        store.page(2, 10).unwrap();
        let spec: FilterSpec = [("name".to_string(), ColumnFilter::text("it"))]
            .into_iter()
            .collect();
        store.filter(spec).unwrap();
        assert_eq!(store.current_page(), 1);
    }

    #[test]
    fn failed_filter_keeps_previous_one() {
        let mut store = RowStore::new(config(), vec![product(1, "a", 1), product(2, "b", 2)])
            .unwrap();
        let spec: FilterSpec = [("name".to_string(), ColumnFilter::select("a"))]
            .into_iter()
            .collect();
        store.filter(spec).unwrap();

        let bad: FilterSpec = [("name".to_string(), ColumnFilter::regex("["))]
            .into_iter()
            .collect();
        assert!(store.filter(bad).is_err());
        assert_eq!(ids(&store.get()), vec![1]);
    }

    #[test]
    fn set_data_reapplies_projections() {
        let mut store = RowStore::new(config(), vec![product(1, "a", 1)]).unwrap();
        store.sort(SortDirection::Descending, "price").unwrap();
        store.search("keep");

        store
            .set_data(vec![
                product(1, "keep", 1),
                product(2, "drop", 5),
                product(3, "keep", 9),
            ])
            .unwrap();
        assert_eq!(ids(&store.get()), vec![3, 1]);
    }

    #[test]
    fn set_data_rejects_duplicates_without_change() {
        let mut store = RowStore::new(config(), vec![product(1, "a", 1)]).unwrap();
        let result = store.set_data(vec![product(2, "b", 2), product(2, "c", 3)]);
        assert!(matches!(result, Err(StoreError::DuplicateKey(_))));
        assert_eq!(ids(&store.get()), vec![1]);
    }

    #[test]
    fn sort_rejects_unknown_and_unsortable_columns() {
        let config = TableConfig::new(vec![
            ColumnDescriptor::key("id"),
            ColumnDescriptor::new("name"),
        ]);
        let mut store = RowStore::new(config, Vec::new()).unwrap();
        assert!(matches!(
            store.sort(SortDirection::Ascending, "name"),
            Err(StoreError::NotSortable(_))
        ));
        assert!(matches!(
            store.sort(SortDirection::Ascending, "nope"),
            Err(StoreError::UnknownColumn(_))
        ));
    }

    #[test]
    fn clear_sort_restores_insertion_order() {
        let rows = vec![product(1, "b", 2), product(2, "a", 1)];
        let mut store = RowStore::new(config(), rows).unwrap();
        store.sort(SortDirection::Ascending, "name").unwrap();
        assert_eq!(ids(&store.get()), vec![2, 1]);

        store.clear_sort();
        assert_eq!(ids(&store.get()), vec![1, 2]);
        assert!(store.sort_info().is_none());
    }

    #[test]
    fn format_cell_uses_formatter() {
        let config = TableConfig::new(vec![
            ColumnDescriptor::key("id"),
            ColumnDescriptor::new("price").with_formatter(|v, _| format!("${}", v)),
        ]);
        let store = RowStore::new(config, vec![product(1, "a", 7)]).unwrap();
        let row = store.get()[0];
        assert_eq!(store.format_cell(row, "price").as_deref(), Some("$7"));
        assert_eq!(store.format_cell(row, "id").as_deref(), Some("1"));
        assert_eq!(store.format_cell(row, "missing"), None);
    }
}
