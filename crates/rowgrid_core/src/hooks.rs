use crate::{FilterSpec, Row, RowKey, SortDirection, Value};
use std::fmt;
use std::sync::Arc;

macro_rules! hook {
    ($(#[$meta:meta])* $name:ident, ($($arg:ident: $ty:ty),*) -> $ret:ty) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(Arc<dyn Fn($($ty),*) -> $ret + Send + Sync>);

        impl $name {
            pub fn new(f: impl Fn($($ty),*) -> $ret + Send + Sync + 'static) -> Self {
                Self(Arc::new(f))
            }

            pub fn call(&self, $($arg: $ty),*) -> $ret {
                (self.0)($($arg),*)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(..)"))
            }
        }
    };
}

hook!(
    /// Search text and the matching rows, ignoring pagination.
    AfterSearch, (text: &str, rows: &[&Row]) -> ()
);
hook!(
    /// Active filters (empty when cleared) and the matching rows, ignoring pagination.
    AfterColumnFilter, (spec: &FilterSpec, rows: &[&Row]) -> ()
);
hook!(AfterDeleteRow, (keys: &[RowKey]) -> ());
hook!(AfterInsertRow, (row: &Row) -> ());
hook!(
    /// Edited row, column name and the new value.
    AfterSaveCell, (row: &Row, field: &str, value: &Value) -> ()
);
hook!(OnSortChange, (field: &str, direction: SortDirection) -> ());
hook!(OnPageChange, (page: usize, size: usize) -> ());
hook!(
    /// Row about to be (de)selected. Returning `false` cancels the change.
    OnSelect, (row: &Row, selected: bool) -> bool
);
hook!(
    /// Select-all or deselect-all over every stored row. Returning `false` cancels it.
    OnSelectAll, (selected: bool, rows: &[&Row]) -> bool
);

/// Callbacks a table registers on its row store.
///
/// They fire after the store has changed, except `on_select` and
/// `on_select_all`, which run first and may veto the change. None of them
/// fire while the store is being constructed.
#[derive(Debug, Clone, Default)]
pub struct TableHooks {
    pub after_search: Option<AfterSearch>,
    pub after_column_filter: Option<AfterColumnFilter>,
    pub after_delete_row: Option<AfterDeleteRow>,
    pub after_insert_row: Option<AfterInsertRow>,
    pub after_save_cell: Option<AfterSaveCell>,
    pub on_sort_change: Option<OnSortChange>,
    pub on_page_change: Option<OnPageChange>,
    pub on_select: Option<OnSelect>,
    pub on_select_all: Option<OnSelectAll>,
}

impl TableHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn after_search(mut self, f: impl Fn(&str, &[&Row]) + Send + Sync + 'static) -> Self {
        self.after_search = Some(AfterSearch::new(f));
        self
    }

    pub fn after_column_filter(
        mut self,
        f: impl Fn(&FilterSpec, &[&Row]) + Send + Sync + 'static,
    ) -> Self {
        self.after_column_filter = Some(AfterColumnFilter::new(f));
        self
    }

    pub fn after_delete_row(mut self, f: impl Fn(&[RowKey]) + Send + Sync + 'static) -> Self {
        self.after_delete_row = Some(AfterDeleteRow::new(f));
        self
    }

    pub fn after_insert_row(mut self, f: impl Fn(&Row) + Send + Sync + 'static) -> Self {
        self.after_insert_row = Some(AfterInsertRow::new(f));
        self
    }

    pub fn after_save_cell(
        mut self,
        f: impl Fn(&Row, &str, &Value) + Send + Sync + 'static,
    ) -> Self {
        self.after_save_cell = Some(AfterSaveCell::new(f));
        self
    }

    pub fn on_sort_change(
        mut self,
        f: impl Fn(&str, SortDirection) + Send + Sync + 'static,
    ) -> Self {
        self.on_sort_change = Some(OnSortChange::new(f));
        self
    }

    pub fn on_page_change(mut self, f: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_page_change = Some(OnPageChange::new(f));
        self
    }

    pub fn on_select(mut self, f: impl Fn(&Row, bool) -> bool + Send + Sync + 'static) -> Self {
        self.on_select = Some(OnSelect::new(f));
        self
    }

    pub fn on_select_all(
        mut self,
        f: impl Fn(bool, &[&Row]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.on_select_all = Some(OnSelectAll::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_register_hooks() {
        let hooks = TableHooks::new()
            .on_select(|_, selected| selected)
            .on_page_change(|_, _| {});

        assert!(hooks.on_select.is_some());
        assert!(hooks.on_page_change.is_some());
        assert!(hooks.after_search.is_none());
        assert!(!hooks.on_select.unwrap().call(&Row::new(), false));
    }

    #[test]
    fn debug_is_opaque() {
        let hook = OnSortChange::new(|_, _| {});
        assert_eq!(format!("{:?}", hook), "OnSortChange(..)");
    }
}
