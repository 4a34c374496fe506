//! # Acessly DB
//!
//! Connection pool setup plus the two pieces every listing endpoint is built
//! from:
//!
//! - [`predicate`]: a composable AND of filter conditions rendered to SQL with
//!   bound parameters
//! - [`query`]: the paginated executor that runs a filter with a sort and page
//!   window and returns a [`Page`](acessly_core::Page)
//!
//! # Example
//!
//! ```ignore
//! use acessly_db::{Filter, QuerySpec, fetch_page};
//!
//! let filter = Filter::new()
//!     .contains("title", params.title.as_deref())
//!     .equals("company_id", params.company_id);
//! let page = fetch_page::<VacancyRow>(&db, &VACANCY_QUERY, &filter, &params.page).await?;
//! ```

pub mod predicate;
pub mod query;

use acessly_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use predicate::{Filter, FilterValue, Predicate, Relation};
pub use query::{QuerySpec, fetch_all, fetch_page};
pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool sized from the config.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}
