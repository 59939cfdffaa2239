//! Filter expressions for building WHERE clauses.
//!
//! [`Filter`] is the predicate expression produced by
//! [`FilterContext`](crate::FilterContext). It renders to parameterized SQL
//! and can also be evaluated against an in-memory instance.

use tracing::trace;

use crate::error::QueryBuildError;
use crate::shape::Properties;
use crate::value::PropertyValue;

/// A filter that can be converted to SQL.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// No filter (always true).
    #[default]
    None,

    /// Equals comparison.
    Equals(String, PropertyValue),
    /// Not equals comparison.
    NotEquals(String, PropertyValue),

    /// Is null check.
    IsNull(String),
    /// Is not null check.
    IsNotNull(String),

    /// Logical AND of multiple filters.
    And(Vec<Filter>),
    /// Logical OR of multiple filters.
    Or(Vec<Filter>),
    /// Logical NOT of a filter.
    Not(Box<Filter>),
}

impl Filter {
    /// Create an empty filter (matches everything).
    pub fn none() -> Self {
        Self::None
    }

    /// Check if this filter is empty.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Create an equality filter.
    pub fn equals(column: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self::Equals(column.into(), value.into())
    }

    /// Create an AND filter.
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        let mut filters: Vec<_> = filters.into_iter().filter(|f| !f.is_none()).collect();
        match filters.len() {
            0 => Self::None,
            1 => filters.remove(0),
            _ => Self::And(filters),
        }
    }

    /// Create an OR filter.
    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        let mut filters: Vec<_> = filters.into_iter().filter(|f| !f.is_none()).collect();
        match filters.len() {
            0 => Self::None,
            1 => filters.remove(0),
            _ => Self::Or(filters),
        }
    }

    /// Create a NOT filter.
    pub fn not(filter: Filter) -> Self {
        if filter.is_none() {
            return Self::None;
        }
        Self::Not(Box::new(filter))
    }

    /// Combine with another filter using AND.
    pub fn and_then(self, other: Filter) -> Self {
        if self.is_none() {
            return other;
        }
        if other.is_none() {
            return self;
        }
        match self {
            Self::And(mut filters) => {
                filters.push(other);
                Self::And(filters)
            }
            _ => Self::And(vec![self, other]),
        }
    }

    /// Combine with another filter using OR.
    pub fn or_else(self, other: Filter) -> Self {
        if self.is_none() {
            return other;
        }
        if other.is_none() {
            return self;
        }
        match self {
            Self::Or(mut filters) => {
                filters.push(other);
                Self::Or(filters)
            }
            _ => Self::Or(vec![self, other]),
        }
    }

    /// Number of comparison leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::And(filters) | Self::Or(filters) => filters.iter().map(Self::leaf_count).sum(),
            Self::Not(filter) => filter.leaf_count(),
            _ => 1,
        }
    }

    /// Generate SQL for this filter with parameter placeholders.
    /// Returns (sql, params) where params are the values to bind.
    ///
    /// Placeholders are numbered from `param_offset + 1`.
    pub fn to_sql(&self, param_offset: usize) -> (String, Vec<PropertyValue>) {
        let mut params = Vec::new();
        let sql = self.to_sql_with_params(param_offset, &mut params);
        trace!(sql = %sql, params = params.len(), "rendered filter");
        (sql, params)
    }

    fn to_sql_with_params(&self, offset: usize, params: &mut Vec<PropertyValue>) -> String {
        let bind = |value: &PropertyValue, params: &mut Vec<PropertyValue>| {
            params.push(value.clone());
            format!("${}", offset + params.len())
        };

        match self {
            Self::None => "TRUE".to_string(),

            Self::Equals(col, val) => {
                if val.is_null() {
                    format!("{} IS NULL", col)
                } else {
                    format!("{} = {}", col, bind(val, params))
                }
            }
            Self::NotEquals(col, val) => {
                if val.is_null() {
                    format!("{} IS NOT NULL", col)
                } else {
                    format!("{} != {}", col, bind(val, params))
                }
            }

            Self::IsNull(col) => format!("{} IS NULL", col),
            Self::IsNotNull(col) => format!("{} IS NOT NULL", col),

            Self::And(filters) => {
                if filters.is_empty() {
                    return "TRUE".to_string();
                }
                let parts: Vec<_> = filters
                    .iter()
                    .map(|f| f.to_sql_with_params(offset, params))
                    .collect();
                format!("({})", parts.join(" AND "))
            }
            Self::Or(filters) => {
                if filters.is_empty() {
                    return "FALSE".to_string();
                }
                let parts: Vec<_> = filters
                    .iter()
                    .map(|f| f.to_sql_with_params(offset, params))
                    .collect();
                format!("({})", parts.join(" OR "))
            }
            Self::Not(filter) => {
                let inner = filter.to_sql_with_params(offset, params);
                format!("NOT ({})", inner)
            }
        }
    }

    /// Evaluate the filter against an instance.
    ///
    /// Columns are resolved through the instance's shape. Comparisons follow
    /// SQL equality: a null column never equals a value.
    pub fn matches(&self, row: &dyn Properties) -> Result<bool, QueryBuildError> {
        let column = |col: &str| -> Result<PropertyValue, QueryBuildError> {
            let shape = row.shape();
            shape
                .by_column(col)
                .and_then(|descriptor| row.get(descriptor.name))
                .ok_or_else(|| QueryBuildError::unknown_field(shape.type_name, col))
        };

        Ok(match self {
            Self::None => true,
            Self::Equals(col, val) => {
                let current = column(col)?;
                if val.is_null() {
                    current.is_null()
                } else {
                    !current.is_null() && current.loosely_equals(val)
                }
            }
            Self::NotEquals(col, val) => {
                let current = column(col)?;
                if val.is_null() {
                    !current.is_null()
                } else {
                    !current.is_null() && !current.loosely_equals(val)
                }
            }
            Self::IsNull(col) => column(col)?.is_null(),
            Self::IsNotNull(col) => !column(col)?.is_null(),
            Self::And(filters) => {
                for filter in filters {
                    if !filter.matches(row)? {
                        return Ok(false);
                    }
                }
                true
            }
            Self::Or(filters) => {
                for filter in filters {
                    if filter.matches(row)? {
                        return Ok(true);
                    }
                }
                false
            }
            Self::Not(filter) => !filter.matches(row)?,
        })
    }
}
