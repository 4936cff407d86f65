pub mod fixtures;

pub use fixtures::{
    product, product_columns, product_config, products, products_from_json, row_ids,
};
