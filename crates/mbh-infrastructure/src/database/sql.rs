//! Renders typed filter conditions into a `QueryBuilder`.
//!
//! Column names come from the filter definitions; user input only ever
//! reaches the query as a bind parameter.

use sqlx::{Postgres, QueryBuilder};
use tracing::error;

use mbh_core::error::DomainError;
use mbh_core::query::{Condition, FilterValue};

/// Append `WHERE c1 AND c2 ...`, or nothing when there are no conditions.
pub fn push_where(qb: &mut QueryBuilder<'_, Postgres>, conditions: &[Condition]) {
    for (i, condition) in conditions.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match condition {
            Condition::Fixed(sql) => {
                qb.push("(").push(*sql).push(")");
            }
            Condition::Eq(column, value) => {
                qb.push(*column).push(" = ");
                push_value(qb, value);
            }
            Condition::AtLeast(column, value) => {
                qb.push(*column).push(" >= ");
                push_value(qb, value);
            }
            Condition::AtMost(column, value) => {
                qb.push(*column).push(" <= ");
                push_value(qb, value);
            }
            Condition::Search(columns, pattern) => {
                qb.push("(");
                for (j, column) in columns.iter().enumerate() {
                    if j > 0 {
                        qb.push(" OR ");
                    }
                    qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
                }
                qb.push(")");
            }
        }
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::Int(v) => qb.push_bind(*v),
        FilterValue::Text(v) => qb.push_bind(v.clone()),
        FilterValue::Date(v) => qb.push_bind(*v),
        FilterValue::Money(v) => qb.push_bind(*v),
    };
}

/// Log a database failure and convert it for the caller.
pub fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}
