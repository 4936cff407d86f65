use crate::{ColumnDescriptor, Row, Value};

/// Free-text search over the searchable columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchQuery {
    text: String,
    terms: Vec<String>,
}

impl SearchQuery {
    /// `None` for blank text, which clears the search.
    pub(crate) fn parse(text: &str, multi_term: bool) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lowered = trimmed.to_lowercase();
        let terms = if multi_term {
            lowered.split_whitespace().map(str::to_string).collect()
        } else {
            vec![lowered]
        };

        Some(Self {
            text: text.to_string(),
            terms,
        })
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// A row matches when any term is contained in any searchable cell.
    pub(crate) fn matches(&self, row: &Row, columns: &[ColumnDescriptor]) -> bool {
        columns.iter().filter(|c| c.searchable).any(|column| {
            let value = match row.get(&column.name) {
                Some(Value::Null) | None => return false,
                Some(value) => value,
            };
            let haystack = column.match_text(value, row).to_lowercase();
            self.terms.iter().any(|term| haystack.contains(term.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::key("id").not_searchable(),
            ColumnDescriptor::new("name"),
            ColumnDescriptor::new("maker"),
        ]
    }

    fn row(id: i64, name: &str, maker: &str) -> Row {
        let mut row = Row::new();
        row.insert("id".to_string(), Value::Int(id));
        row.insert("name".to_string(), Value::text(name));
        row.insert("maker".to_string(), Value::text(maker));
        row
    }

    #[test]
    fn blank_text_clears() {
        assert!(SearchQuery::parse("", false).is_none());
        assert!(SearchQuery::parse("   ", true).is_none());
    }

    #[test]
    fn matches_any_searchable_column_case_insensitively() {
        let query = SearchQuery::parse("ACME", false).unwrap();
        assert!(query.matches(&row(1, "Anvil", "Acme Corp"), &columns()));
        assert!(!query.matches(&row(2, "Anvil", "Globex"), &columns()));
    }

    #[test]
    fn skips_non_searchable_columns() {
        let query = SearchQuery::parse("7", false).unwrap();
        assert!(!query.matches(&row(7, "Anvil", "Globex"), &columns()));
    }

    #[test]
    fn multi_term_matches_any_term() {
        let single = SearchQuery::parse("anvil globex", false).unwrap();
        let multi = SearchQuery::parse("anvil globex", true).unwrap();
        let anvil = row(1, "Anvil", "Acme");

        assert!(!single.matches(&anvil, &columns()));
        assert!(multi.matches(&anvil, &columns()));
    }
}
