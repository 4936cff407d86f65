//! Command line arguments for the `rowgrid` binary.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use rowgrid_core::{ColumnFilter, Comparator, SortDirection, SortInfo};
use rowgrid_export::ExportFormat;

/// Sort, filter, search and page a JSON table file, then print the view
#[derive(Debug, Parser)]
#[command(name = "rowgrid", version, about)]
pub struct Cli {
    /// Table file: `{ "settings": {...}, "rows": [...] }`
    pub table: PathBuf,

    /// Sort column, optionally with direction (`price:desc`)
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortInfo>,

    /// Free-text search over searchable columns
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Column filter: `name=text`, `name~regex`, `price>=10`, `price<5`
    #[arg(long = "filter", short = 'f', value_parser = parse_filter)]
    pub filters: Vec<(String, ColumnFilter)>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<usize>,

    /// Rows per page
    #[arg(long)]
    pub size: Option<usize>,

    /// Show only the rows selected in the table file
    #[arg(long)]
    pub only_selected: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Also save the whole view as CSV into this directory
    #[arg(long, value_name = "DIR")]
    pub export_csv: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated text
    Text,
    Csv,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ExportFormat::Text,
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Json => ExportFormat::JsonPretty,
            OutputFormat::JsonCompact => ExportFormat::JsonCompact,
        }
    }
}

fn parse_sort(raw: &str) -> anyhow::Result<SortInfo> {
    let (field, direction) = match raw.split_once(':') {
        Some((field, direction)) => (
            field,
            direction
                .parse::<SortDirection>()
                .map_err(anyhow::Error::msg)?,
        ),
        None => (raw, SortDirection::Ascending),
    };

    if field.trim().is_empty() {
        bail!("missing sort column in '{}'", raw);
    }

    Ok(SortInfo {
        field: field.trim().to_string(),
        direction,
    })
}

// Earliest operator wins; at the same position the longer one does.
const OPERATORS: [&str; 7] = [">=", "<=", "!=", ">", "<", "~", "="];

fn parse_filter(raw: &str) -> anyhow::Result<(String, ColumnFilter)> {
    let (pos, op) = OPERATORS
        .iter()
        .filter_map(|op| raw.find(op).map(|pos| (pos, *op)))
        .min_by_key(|(pos, op)| (*pos, std::cmp::Reverse(op.len())))
        .with_context(|| format!("filter '{}' has no operator", raw))?;

    let field = raw[..pos].trim();
    let operand = raw[pos + op.len()..].trim();
    if field.is_empty() {
        bail!("missing filter column in '{}'", raw);
    }

    let filter = match op {
        "=" => ColumnFilter::text(operand),
        "~" => ColumnFilter::regex(operand),
        _ => {
            let comparator = match op {
                ">=" => Comparator::Ge,
                "<=" => Comparator::Le,
                "!=" => Comparator::Ne,
                ">" => Comparator::Gt,
                _ => Comparator::Lt,
            };
            let value: f64 = operand
                .parse()
                .with_context(|| format!("'{}' is not a number", operand))?;
            ColumnFilter::number(comparator, value)
        }
    };

    Ok((field.to_string(), filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_defaults_to_ascending() {
        assert_eq!(parse_sort("price").unwrap(), SortInfo::asc("price"));
        assert_eq!(parse_sort("price:desc").unwrap(), SortInfo::desc("price"));
        assert!(parse_sort("price:sideways").is_err());
        assert!(parse_sort(":asc").is_err());
    }

    #[test]
    fn filter_operators() {
        let (field, filter) = parse_filter("name=Item 1").unwrap();
        assert_eq!(field, "name");
        assert!(matches!(filter, ColumnFilter::Text { ref value } if value == "Item 1"));

        let (field, filter) = parse_filter("price>=2100").unwrap();
        assert_eq!(field, "price");
        assert!(matches!(
            filter,
            ColumnFilter::Number { comparator: Comparator::Ge, value } if value == 2100.0
        ));

        let (_, filter) = parse_filter("price!=3").unwrap();
        assert!(matches!(
            filter,
            ColumnFilter::Number {
                comparator: Comparator::Ne,
                ..
            }
        ));

        let (_, filter) = parse_filter("name~^Item").unwrap();
        assert!(matches!(filter, ColumnFilter::Regex { ref pattern } if pattern == "^Item"));
    }

    #[test]
    fn text_filter_may_contain_operators() {
        let (field, filter) = parse_filter("note=a>b").unwrap();
        assert_eq!(field, "note");
        assert!(matches!(filter, ColumnFilter::Text { ref value } if value == "a>b"));
    }

    #[test]
    fn bad_filters_are_rejected() {
        assert!(parse_filter("price").is_err());
        assert!(parse_filter("=x").is_err());
        assert!(parse_filter("price>cheap").is_err());
    }

    #[test]
    fn parses_full_command_line() {
        let cli = Cli::try_parse_from([
            "rowgrid",
            "table.json",
            "--sort",
            "price:desc",
            "-f",
            "name=lamp",
            "-f",
            "price<10",
            "--page",
            "2",
            "--format",
            "json-compact",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.table, PathBuf::from("table.json"));
        assert_eq!(cli.sort, Some(SortInfo::desc("price")));
        assert_eq!(cli.filters.len(), 2);
        assert_eq!(cli.page, Some(2));
        assert_eq!(cli.format, OutputFormat::JsonCompact);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.only_selected);
    }
}
