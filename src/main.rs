use cs412::{AppState, config::Config, db, voter_analytics};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cs412=debug,tower_http=info"));
    fmt().with_env_filter(env_filter).with_target(true).init();

    let config = Config::from_env()?;
    let db_pool = db::connect(&config.database_url).await?;

    if let Some(voter_csv) = &config.voter_csv {
        voter_analytics::import::load_if_empty(&db_pool, voter_csv).await?;
    }

    let app = cs412::app(AppState { db_pool }, config.session_idle_minutes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
