use anyhow::Context;
use rowgrid_core::{FilterSpec, RowStore, ViewMode};

use crate::cli::Cli;

/// Apply the projections requested on the command line, in the order a
/// user would click through a table: filter, search, view mode, sort, page.
pub fn apply(store: &mut RowStore, cli: &Cli) -> anyhow::Result<()> {
    if !cli.filters.is_empty() {
        let spec: FilterSpec = cli.filters.iter().cloned().collect();
        store.filter(spec).context("Invalid --filter")?;
    }

    if let Some(text) = &cli.search {
        store.search(text);
    }

    if cli.only_selected {
        store.set_view_mode(ViewMode::OnlySelected);
    }

    if let Some(sort) = &cli.sort {
        store
            .sort(sort.direction, &sort.field)
            .context("Invalid --sort")?;
    }

    if cli.page.is_some() || cli.size.is_some() {
        let page = cli.page.unwrap_or(1);
        let size = cli.size.unwrap_or_else(|| store.page_size());
        store.page(page, size).context("Invalid --page/--size")?;
    }

    Ok(())
}

/// One-line description of what is being shown.
pub fn summary(store: &RowStore) -> String {
    if store.is_pagination() {
        let current = store.current_page();
        let links: Vec<String> = store
            .page_links()
            .map(|page| {
                if page == current {
                    format!("[{}]", page)
                } else {
                    page.to_string()
                }
            })
            .collect();

        format!(
            "page {} of {} ({}), {} of {} rows",
            current,
            store.total_pages(),
            links.join(" "),
            store.data_num(),
            store.len()
        )
    } else {
        format!("{} of {} rows", store.data_num(), store.len())
    }
}
