use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Opens the pool and brings the schema up to date.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if database_url.contains(":memory:") {
        // every connection to :memory: is its own database, so keep exactly one alive
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(16)
    };

    let db_pool = pool_options.connect_with(options).await?;

    sqlx::migrate!().run(&db_pool).await?;
    tracing::info!("database ready at {database_url}");

    Ok(db_pool)
}

#[cfg(test)]
pub(crate) async fn memory() -> SqlitePool {
    connect("sqlite::memory:").await.unwrap()
}
