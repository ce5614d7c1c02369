use std::cmp::Ordering;

use crate::table::row::Row;

/// Byte-order comparison used by [`Filter::ColumnValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl CompareOp {
    /// Whether `actual <op> expected` holds under byte ordering.
    pub fn matches(self, actual: &[u8], expected: &[u8]) -> bool {
        let ord = actual.cmp(expected);
        match self {
            CompareOp::Equal => ord == Ordering::Equal,
            CompareOp::NotEqual => ord != Ordering::Equal,
            CompareOp::Less => ord == Ordering::Less,
            CompareOp::LessOrEqual => ord != Ordering::Greater,
            CompareOp::Greater => ord == Ordering::Greater,
            CompareOp::GreaterOrEqual => ord != Ordering::Less,
        }
    }
}

/// How a [`Filter::List`] combines its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Every member must accept the row.
    MustPassAll,
    /// At least one member must accept the row.
    MustPassOne,
}

/// Row predicate evaluated by the store after the range scan.
///
/// Filters refine a scan; they do not narrow the keys visited. A bare
/// `Prefix` over a whole table still walks every row, so pair it with scan
/// bounds where possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Row key starts with these bytes.
    Prefix(Vec<u8>),
    /// A single column compared against a value. Rows lacking the column
    /// pass unless `filter_if_missing` is set.
    ColumnValue {
        column: String,
        op: CompareOp,
        value: Vec<u8>,
        filter_if_missing: bool,
    },
    /// Combination of filters. An empty list accepts every row.
    List {
        operator: Operator,
        filters: Vec<Filter>,
    },
}

impl Filter {
    pub fn prefix(prefix: impl Into<Vec<u8>>) -> Self {
        Filter::Prefix(prefix.into())
    }

    pub fn column_value(
        column: impl Into<String>,
        op: CompareOp,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Filter::ColumnValue {
            column: column.into(),
            op,
            value: value.into(),
            filter_if_missing: false,
        }
    }

    /// Make a `ColumnValue` filter reject rows without the column. No effect
    /// on other variants.
    pub fn filter_if_missing(mut self) -> Self {
        if let Filter::ColumnValue {
            filter_if_missing, ..
        } = &mut self
        {
            *filter_if_missing = true;
        }
        self
    }

    pub fn all(filters: Vec<Filter>) -> Self {
        Filter::List {
            operator: Operator::MustPassAll,
            filters,
        }
    }

    pub fn any(filters: Vec<Filter>) -> Self {
        Filter::List {
            operator: Operator::MustPassOne,
            filters,
        }
    }

    pub fn matches(&self, key: &[u8], row: &Row) -> bool {
        match self {
            Filter::Prefix(prefix) => key.starts_with(prefix),
            Filter::ColumnValue {
                column,
                op,
                value,
                filter_if_missing,
            } => match row.get(column) {
                Some(actual) => op.matches(actual, value),
                None => !filter_if_missing,
            },
            Filter::List { filters, .. } if filters.is_empty() => true,
            Filter::List {
                operator: Operator::MustPassAll,
                filters,
            } => filters.iter().all(|f| f.matches(key, row)),
            Filter::List {
                operator: Operator::MustPassOne,
                filters,
            } => filters.iter().any(|f| f.matches(key, row)),
        }
    }
}
