//! Dynamic predicate construction and pagination for replica queries
//!
//! The compiler starts from a tautological `WHERE 1=1` so every optional
//! predicate can be appended unconditionally with `AND`. Filter values never
//! appear in the query text; they travel as bound parameters in the order the
//! predicates were appended. Placeholders are written as `?` and rebound to
//! the Postgres `$N` convention as a final step.

use std::fmt::Write as _;

use crate::domain::UserFilter;

/// A value bound to one compiled predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Bool(bool),
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Compile the filter into a WHERE-augmented query plus its ordered
/// parameter list.
///
/// Predicates are appended in a fixed order: role, first name, last name,
/// email, enabled. Each non-empty field contributes exactly one predicate.
pub fn compile_filter(base: &str, filter: &UserFilter) -> (String, Vec<SqlParam>) {
    let mut sql = format!("{base} WHERE 1=1");
    let mut params = Vec::new();

    if let Some(role) = non_empty(&filter.role) {
        sql.push_str(" AND kr.name = ?");
        params.push(SqlParam::Text(role.to_string()));
    }
    if let Some(first_name) = non_empty(&filter.first_name) {
        sql.push_str(" AND ue.first_name = ?");
        params.push(SqlParam::Text(first_name.to_string()));
    }
    if let Some(last_name) = non_empty(&filter.last_name) {
        sql.push_str(" AND ue.last_name = ?");
        params.push(SqlParam::Text(last_name.to_string()));
    }
    if let Some(email) = non_empty(&filter.email) {
        sql.push_str(" AND ue.email = ?");
        params.push(SqlParam::Text(email.to_string()));
    }
    if let Some(enabled) = filter.enabled {
        sql.push_str(" AND ue.enabled = ?");
        params.push(SqlParam::Bool(enabled));
    }

    (sql, params)
}

/// Append pagination to a compiled query.
///
/// Normalizes the filter's page/size in place first, then appends
/// `OFFSET (page - 1) * size` only when page > 1 and always `LIMIT size`.
pub fn paginate(mut sql: String, filter: &mut UserFilter) -> String {
    filter.normalize();

    if filter.page > 1 {
        let _ = write!(sql, " OFFSET {}", filter.offset());
    }
    let _ = write!(sql, " LIMIT {}", filter.size);
    sql
}

/// Rewrite `?` placeholders to the Postgres positional `$1..$N` convention.
///
/// Question marks inside single-quoted literals are left alone.
pub fn rebind(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut position = 0usize;
    let mut in_literal = false;

    for ch in sql.chars() {
        match ch {
            '\'' => {
                in_literal = !in_literal;
                out.push(ch);
            }
            '?' if !in_literal => {
                position += 1;
                let _ = write!(out, "${position}");
            }
            _ => out.push(ch),
        }
    }

    out
}
