use rowgrid_core::{
    ColumnDescriptor, ColumnKind, PaginationSettings, Row, TableConfig, Value, row_from,
    row_from_json,
};

/// `{id, name, price}` product row.
pub fn product(id: i64, name: impl Into<String>, price: i64) -> Row {
    row_from([
        ("id", Value::Int(id)),
        ("name", Value::Text(name.into())),
        ("price", Value::Int(price)),
    ])
}

/// Products `0..count` named like the widget's demo data, priced upwards from 2100.
pub fn products(count: i64) -> Vec<Row> {
    (0..count)
        .map(|id| product(id, format!("Item name {}", id), 2100 + id))
        .collect()
}

pub fn product_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::key("id")
            .with_title("Product ID")
            .with_kind(ColumnKind::Integer)
            .sortable(),
        ColumnDescriptor::new("name")
            .with_title("Product Name")
            .sortable(),
        ColumnDescriptor::new("price")
            .with_title("Product Price")
            .with_kind(ColumnKind::Integer)
            .sortable(),
    ]
}

/// Product table, paginated with the given page size when `page_size` is set.
pub fn product_config(page_size: Option<usize>) -> TableConfig {
    let config = TableConfig::new(product_columns());
    match page_size {
        Some(size) => config.with_pagination(PaginationSettings::enabled().with_size_per_page(size)),
        None => config,
    }
}

/// Rows from a JSON array literal; non-object entries are skipped.
pub fn products_from_json(json: serde_json::Value) -> Vec<Row> {
    match json {
        serde_json::Value::Array(items) => items.into_iter().filter_map(row_from_json).collect(),
        _ => Vec::new(),
    }
}

/// The `id` column of each row, for compact assertions.
pub fn row_ids(rows: &[&Row]) -> Vec<i64> {
    rows.iter()
        .filter_map(|row| match row.get("id") {
            Some(Value::Int(id)) => Some(*id),
            _ => None,
        })
        .collect()
}
