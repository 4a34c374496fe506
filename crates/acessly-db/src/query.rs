//! Paginated query execution.
//!
//! A [`QuerySpec`] describes how one entity is listed: the projection (with
//! any joins needed to denormalize the response), the count query, the alias
//! filters qualify their columns with, and the API fields that may be sorted
//! on. [`fetch_page`] runs a count and a single `LIMIT/OFFSET` query, so no
//! more than one page of rows is ever loaded.

use acessly_core::{AppError, Page, PageParams, SortDirection, SortSpec};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use crate::predicate::Filter;

#[derive(Debug, Clone, Copy)]
pub struct QuerySpec {
    /// `SELECT ... FROM <table> <alias> [JOIN ...]` without a WHERE clause.
    pub select: &'static str,
    /// `SELECT COUNT(*) FROM <table> <alias>`.
    pub count: &'static str,
    pub alias: &'static str,
    /// API field name to column expression. Must contain `id`.
    pub sortable: &'static [(&'static str, &'static str)],
}

impl QuerySpec {
    /// Resolves a requested sort into an `ORDER BY` body. Unknown fields are
    /// rejected; non-id sorts get the primary key as a tie-breaker.
    pub fn order_by(&self, sort: Option<&SortSpec>) -> Result<String, AppError> {
        let primary_key = format!("{}.id", self.alias);

        let Some(sort) = sort else {
            return Ok(format!("{} ASC", primary_key));
        };

        let column = self
            .sortable
            .iter()
            .find(|(field, _)| *field == sort.field)
            .map(|(_, column)| *column)
            .ok_or_else(|| AppError::validation(format!("unknown sort field: {}", sort.field)))?;

        if column == primary_key {
            Ok(format!("{} {}", column, sort.direction.as_sql()))
        } else {
            Ok(format!(
                "{} {}, {} {}",
                column,
                sort.direction.as_sql(),
                primary_key,
                SortDirection::Asc.as_sql()
            ))
        }
    }
}

/// Runs `spec` narrowed by `filter` and returns the requested page.
///
/// An out-of-range page yields an empty `items` list with accurate totals.
#[instrument(skip(db, spec, filter), fields(entity = spec.alias, predicates = filter.len()))]
pub async fn fetch_page<T>(
    db: &PgPool,
    spec: &QuerySpec,
    filter: &Filter,
    params: &PageParams,
) -> Result<Page<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let order_by = spec.order_by(params.sort()?.as_ref())?;
    let page = params.page();
    let size = params.size();

    let mut count_qb = QueryBuilder::<Postgres>::new(spec.count);
    filter.push_where(&mut count_qb, spec.alias);
    let total = count_qb
        .build_query_scalar::<i64>()
        .fetch_one(db)
        .await?;

    if total == 0 {
        return Ok(Page::new(Vec::new(), page, size, 0));
    }

    let mut qb = QueryBuilder::<Postgres>::new(spec.select);
    filter.push_where(&mut qb, spec.alias);
    qb.push(" ORDER BY ");
    qb.push(order_by);
    qb.push(" LIMIT ");
    qb.push_bind(size);
    qb.push(" OFFSET ");
    qb.push_bind(params.offset());

    let items = qb.build_query_as::<T>().fetch_all(db).await?;

    Ok(Page::new(items, page, size, total))
}

/// Runs `spec` narrowed by `filter` without a page window, ordered by id.
/// Used for the unpaged per-parent listings.
#[instrument(skip(db, spec, filter), fields(entity = spec.alias, predicates = filter.len()))]
pub async fn fetch_all<T>(
    db: &PgPool,
    spec: &QuerySpec,
    filter: &Filter,
) -> Result<Vec<T>, AppError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut qb = QueryBuilder::<Postgres>::new(spec.select);
    filter.push_where(&mut qb, spec.alias);
    qb.push(" ORDER BY ");
    qb.push(spec.order_by(None)?);

    let items = qb.build_query_as::<T>().fetch_all(db).await?;
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: QuerySpec = QuerySpec {
        select: "SELECT v.* FROM vacancies v",
        count: "SELECT COUNT(*) FROM vacancies v",
        alias: "v",
        sortable: &[("id", "v.id"), ("title", "v.title"), ("salary", "v.salary")],
    };

    #[test]
    fn test_default_order_is_primary_key() {
        assert_eq!(SPEC.order_by(None).unwrap(), "v.id ASC");
    }

    #[test]
    fn test_sort_by_id_has_no_tie_breaker() {
        let sort = SortSpec::desc("id");
        assert_eq!(SPEC.order_by(Some(&sort)).unwrap(), "v.id DESC");
    }

    #[test]
    fn test_sort_by_field_appends_tie_breaker() {
        let sort = SortSpec::desc("title");
        assert_eq!(
            SPEC.order_by(Some(&sort)).unwrap(),
            "v.title DESC, v.id ASC"
        );
    }

    #[test]
    fn test_unknown_sort_field_is_rejected() {
        let sort = SortSpec::asc("password");
        let err = SPEC.order_by(Some(&sort)).unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.message(), "unknown sort field: password");
    }
}
