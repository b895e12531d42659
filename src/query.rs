//! Query builder for filtered SELECT statements
//!
//! Each filter carries its column, operator and value together, so the
//! rendered SQL and its bound parameter list can never drift apart. Values
//! are always bound, never spliced into the statement text.

use rusqlite::types::ToSqlOutput;
use rusqlite::ToSql;

/// Comparison operators for filters
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    /// Equality (=)
    Equal,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Less than or equal (<=)
    LessThanOrEqual,
}

impl Operator {
    const fn as_sql(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThanOrEqual => "<=",
        }
    }
}

/// Value types for filter conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
}

impl ToSql for FilterValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Text(text) => text.to_sql(),
            Self::Integer(value) => value.to_sql(),
        }
    }
}

/// A filter condition for database queries
#[derive(Debug, Clone)]
pub struct Filter {
    /// Column name to filter on
    pub field: &'static str,
    /// Comparison operator
    pub operator: Operator,
    /// Value to compare against
    pub value: FilterValue,
}

/// Builds `base WHERE ... ORDER BY ...` with positional parameters
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base: String,
    filters: Vec<Filter>,
    order_by: Vec<&'static str>,
}

impl QueryBuilder {
    /// Start from a SELECT statement without a WHERE clause
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            filters: Vec::new(),
            order_by: Vec::new(),
        }
    }

    /// Add a filter condition to the query
    pub fn add_filter(&mut self, field: &'static str, operator: Operator, value: FilterValue) -> &mut Self {
        self.filters.push(Filter { field, operator, value });
        self
    }

    /// Append a column to the ORDER BY list
    pub fn order_by(&mut self, column: &'static str) -> &mut Self {
        self.order_by.push(column);
        self
    }

    /// Render the statement and the parameters in placeholder order
    #[must_use]
    pub fn build(&self) -> (String, Vec<&FilterValue>) {
        let mut sql = self.base.trim_end().to_string();
        let mut params = Vec::with_capacity(self.filters.len());

        for (i, filter) in self.filters.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&format!("{} {} ?{}", filter.field, filter.operator.as_sql(), i + 1));
            params.push(&filter.value);
        }

        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters() {
        let query = QueryBuilder::new("SELECT * FROM appointments");
        let (sql, params) = query.build();
        assert_eq!(sql, "SELECT * FROM appointments");
        assert!(params.is_empty());
    }

    #[test]
    fn test_filters_and_params_stay_paired() {
        let mut query = QueryBuilder::new("SELECT * FROM appointments a");
        query
            .add_filter("a.date", Operator::GreaterThanOrEqual, FilterValue::Text("2024-02-28".into()))
            .add_filter("a.date", Operator::LessThanOrEqual, FilterValue::Text("2024-03-01".into()))
            .add_filter("a.doctor_id", Operator::Equal, FilterValue::Integer(1))
            .order_by("a.date");

        let (sql, params) = query.build();
        assert_eq!(
            sql,
            "SELECT * FROM appointments a WHERE a.date >= ?1 AND a.date <= ?2 AND a.doctor_id = ?3 ORDER BY a.date"
        );
        assert_eq!(params.len(), 3);
        assert_eq!(params[2], &FilterValue::Integer(1));
    }

    #[test]
    fn test_value_is_bound_not_spliced() {
        let mut query = QueryBuilder::new("SELECT * FROM patients");
        query.add_filter("full_name", Operator::Equal, FilterValue::Text("x' OR '1'='1".into()));
        let (sql, _) = query.build();
        assert!(!sql.contains("OR '1'"));
    }
}
