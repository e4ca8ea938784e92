//! Helpers for assembling dynamic statements with numbered placeholders.
//!
//! Every caller-supplied value travels as a bound [`SqlValue`]; fragments only
//! ever carry column names and `$n` placeholders.

use crate::error::JoblyError;
use sqlx::Sqlite;
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;

/// A value waiting to be bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Null,
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// `SET` clause body plus the values for its placeholders, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialUpdate {
    pub set_cols: String,
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Placeholder index for the first parameter after the `SET` values,
    /// typically the `WHERE` key.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build the `SET` clause for a partial update.
///
/// `data` is `(external name, value)` in the order the columns should appear;
/// `aliases` maps external names to storage column names where they differ.
///
/// ```
/// use jobly::db::sql::{sql_for_partial_update, SqlValue};
///
/// let update = sql_for_partial_update(
///     &[("name", "Acme".into()), ("numEmployees", SqlValue::Integer(3))],
///     &[("numEmployees", "num_employees")],
/// )
/// .unwrap();
/// assert_eq!(update.set_cols, r#""name"=$1, "num_employees"=$2"#);
/// ```
pub fn sql_for_partial_update(
    data: &[(&str, SqlValue)],
    aliases: &[(&str, &str)],
) -> Result<PartialUpdate, JoblyError> {
    if data.is_empty() {
        return Err(JoblyError::BadRequest("No data".to_string()));
    }

    let set_cols = data
        .iter()
        .enumerate()
        .map(|(idx, (field, _))| {
            let column = aliases
                .iter()
                .find(|(external, _)| external == field)
                .map_or(*field, |(_, storage)| *storage);
            format!("\"{column}\"=${}", idx + 1)
        })
        .collect::<Vec<_>>()
        .join(", ");

    let values = data.iter().map(|(_, value)| value.clone()).collect();

    Ok(PartialUpdate { set_cols, values })
}

/// Join filter conditions with `AND`. No conditions means no `WHERE` at all.
pub fn where_sql(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

/// Case-insensitive substring pattern for `column REGEXP $n`.
///
/// Case folding is Unicode-aware (`ärzte` matches `Ärzte`) and every regex
/// metacharacter in `needle` is escaped, so it matches literally.
pub fn contains_pattern(needle: &str) -> String {
    format!("(?i){}", regex::escape(needle))
}

/// Bind `values` to `query` in placeholder order.
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for value in values {
        query = match value {
            SqlValue::Text(s) => query.bind(s),
            SqlValue::Integer(i) => query.bind(i),
            SqlValue::Null => query.bind(None::<String>),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_numbers_placeholders_in_input_order() {
        let update = sql_for_partial_update(
            &[
                ("logoUrl", SqlValue::Null),
                ("name", "Acme".into()),
                ("numEmployees", SqlValue::Integer(12)),
            ],
            &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")],
        )
        .unwrap();

        assert_eq!(
            update.set_cols,
            r#""logo_url"=$1, "name"=$2, "num_employees"=$3"#
        );
        assert_eq!(
            update.values,
            vec![
                SqlValue::Null,
                SqlValue::Text("Acme".into()),
                SqlValue::Integer(12)
            ]
        );
        assert_eq!(update.next_placeholder(), 4);
    }

    #[test]
    fn partial_update_never_inlines_values() {
        let hostile = "x'; DROP TABLE companies; --";
        let update = sql_for_partial_update(&[("name", hostile.into())], &[]).unwrap();
        assert_eq!(update.set_cols, r#""name"=$1"#);
        assert!(!update.set_cols.contains("DROP"));
    }

    #[test]
    fn partial_update_rejects_empty_input() {
        let err = sql_for_partial_update(&[], &[]).unwrap_err();
        assert!(matches!(err, JoblyError::BadRequest(ref m) if m == "No data"));
    }

    #[test]
    fn where_sql_omits_clause_when_empty() {
        assert_eq!(where_sql(&[]), "");
        assert_eq!(
            where_sql(&["a >= $1".to_string(), "b <= $2".to_string()]),
            " WHERE a >= $1 AND b <= $2"
        );
    }

    #[test]
    fn contains_pattern_escapes_metacharacters() {
        assert_eq!(contains_pattern("net"), "(?i)net");
        assert_eq!(contains_pattern("a.b*(c)"), r"(?i)a\.b\*\(c\)");
    }

    #[test]
    fn contains_pattern_folds_unicode_case() {
        let re = regex::Regex::new(&contains_pattern("ärzte")).unwrap();
        assert!(re.is_match("Ärzte Élan"));
        let re = regex::Regex::new(&contains_pattern("élan")).unwrap();
        assert!(re.is_match("Ärzte Élan"));
        let re = regex::Regex::new(&contains_pattern("50%_off")).unwrap();
        assert!(!re.is_match("50 off"));
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(7_i64)), SqlValue::Integer(7));
    }
}
