//! Filter predicates for listing queries.
//!
//! A [`Filter`] is a flat conjunction of [`Predicate`]s. Each predicate is one
//! of three shapes:
//!
//! - [`Predicate::Equals`]: exact match on a column of the listed entity (ids
//!   and enum values)
//! - [`Predicate::Contains`]: case-insensitive substring match on a text column
//! - [`Predicate::RelationEquals`]: exact match on a column of a parent row
//!   reached through one foreign key
//!
//! Absent or blank inputs are dropped when the filter is built, so an empty
//! filter renders no `WHERE` clause and matches every row. All values are
//! bound as parameters; only column and table names (which are `'static`
//! identifiers chosen by the caller) are pushed as SQL text.

use sqlx::{Postgres, QueryBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Int(i64),
    Text(String),
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One foreign-key hop: `<alias>.<local_column>` references `<table>.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub table: &'static str,
    pub local_column: &'static str,
}

impl Relation {
    pub const fn new(table: &'static str, local_column: &'static str) -> Self {
        Self {
            table,
            local_column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Equals {
        column: &'static str,
        value: FilterValue,
    },
    Contains {
        column: &'static str,
        needle: String,
    },
    RelationEquals {
        relation: Relation,
        column: &'static str,
        value: FilterValue,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `column = value` when a value is present. Blank text is ignored.
    pub fn equals<V>(mut self, column: &'static str, value: Option<V>) -> Self
    where
        V: Into<FilterValue>,
    {
        if let Some(value) = value.map(Into::into).filter(is_present) {
            self.predicates.push(Predicate::Equals { column, value });
        }
        self
    }

    /// Adds a case-insensitive substring match when the needle is not blank.
    pub fn contains<S>(mut self, column: &'static str, needle: Option<S>) -> Self
    where
        S: AsRef<str>,
    {
        if let Some(needle) = needle {
            let needle = needle.as_ref().trim();
            if !needle.is_empty() {
                self.predicates.push(Predicate::Contains {
                    column,
                    needle: needle.to_string(),
                });
            }
        }
        self
    }

    /// Adds an exact match on `relation.table.column` for the parent row.
    pub fn relation_equals<V>(
        mut self,
        relation: Relation,
        column: &'static str,
        value: Option<V>,
    ) -> Self
    where
        V: Into<FilterValue>,
    {
        if let Some(value) = value.map(Into::into).filter(is_present) {
            self.predicates.push(Predicate::RelationEquals {
                relation,
                column,
                value,
            });
        }
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Appends ` WHERE p1 AND p2 ...` to the builder, qualifying columns with
    /// `alias`. Pushes nothing for an empty filter.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>, alias: &str) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            push_predicate(qb, alias, predicate);
        }
    }
}

fn is_present(value: &FilterValue) -> bool {
    match value {
        FilterValue::Int(_) => true,
        FilterValue::Text(s) => !s.trim().is_empty(),
    }
}

fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, alias: &str, predicate: &Predicate) {
    match predicate {
        Predicate::Equals { column, value } => {
            qb.push(format!("{}.{} = ", alias, column));
            push_value(qb, value);
        }
        Predicate::Contains { column, needle } => {
            qb.push(format!("{}.{} ILIKE ", alias, column));
            qb.push_bind(like_pattern(needle));
        }
        // Matching the parent's primary key needs no join.
        Predicate::RelationEquals {
            relation,
            column,
            value,
        } if *column == "id" => {
            qb.push(format!("{}.{} = ", alias, relation.local_column));
            push_value(qb, value);
        }
        Predicate::RelationEquals {
            relation,
            column,
            value,
        } => {
            qb.push(format!(
                "EXISTS (SELECT 1 FROM {table} rel WHERE rel.id = {alias}.{fk} AND rel.{column} = ",
                table = relation.table,
                alias = alias,
                fk = relation.local_column,
                column = column,
            ));
            push_value(qb, value);
            qb.push(")");
        }
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::Int(n) => {
            qb.push_bind(*n);
        }
        FilterValue::Text(s) => {
            qb.push_bind(s.clone());
        }
    }
}

/// Wraps the needle in `%` after escaping LIKE metacharacters, so user input
/// is matched literally.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    const VACANCY: Relation = Relation::new("vacancies", "vacancy_id");

    fn render(filter: &Filter) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM candidacies c");
        filter.push_where(&mut qb, "c");
        qb.sql().to_string()
    }

    #[test]
    fn test_empty_filter_renders_no_where() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert_eq!(render(&filter), "SELECT * FROM candidacies c");
    }

    #[test]
    fn test_absent_and_blank_inputs_are_dropped() {
        let filter = Filter::new()
            .equals::<i64>("candidate_id", None)
            .equals("status", Some("  "))
            .contains::<&str>("title", None)
            .contains("city", Some(""))
            .relation_equals::<i64>(VACANCY, "company_id", None);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_predicates_are_joined_with_and() {
        let filter = Filter::new()
            .equals("candidate_id", Some(7_i64))
            .equals("status", Some("APPROVED"));
        assert_eq!(
            render(&filter),
            "SELECT * FROM candidacies c WHERE c.candidate_id = $1 AND c.status = $2"
        );
    }

    #[test]
    fn test_contains_uses_ilike() {
        let filter = Filter::new().contains("title", Some("dev"));
        assert_eq!(
            render(&filter),
            "SELECT * FROM candidacies c WHERE c.title ILIKE $1"
        );
        assert_eq!(
            filter.predicates(),
            &[Predicate::Contains {
                column: "title",
                needle: "dev".to_string()
            }]
        );
    }

    #[test]
    fn test_relation_on_parent_key_compares_foreign_key() {
        let filter = Filter::new().relation_equals(VACANCY, "id", Some(3_i64));
        assert_eq!(
            render(&filter),
            "SELECT * FROM candidacies c WHERE c.vacancy_id = $1"
        );
    }

    #[test]
    fn test_relation_on_parent_column_uses_exists() {
        let filter = Filter::new()
            .equals("status", Some("REJECTED"))
            .relation_equals(VACANCY, "company_id", Some(9_i64));
        assert_eq!(
            render(&filter),
            "SELECT * FROM candidacies c WHERE c.status = $1 AND EXISTS (SELECT 1 FROM vacancies rel WHERE rel.id = c.vacancy_id AND rel.company_id = $2)"
        );
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("dev"), "%dev%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_contains_needle_is_trimmed() {
        let filter = Filter::new().contains("name", Some("  Acme "));
        assert_eq!(
            filter.predicates()[0],
            Predicate::Contains {
                column: "name",
                needle: "Acme".to_string()
            }
        );
    }
}
