mod config;
mod routes;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is normal; anything else is worth a warning once logging is up.
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "failed to read .env"),
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return Err(e.into());
        }
    };

    let floorplan = match services::persistence::load_snapshot(&config.snapshot_path()).await {
        Ok(Some(floorplan)) => {
            tracing::info!(
                spaces = floorplan.spaces.len(),
                hallways = floorplan.hallways.len(),
                "restored floorplan snapshot"
            );
            floorplan
        }
        Ok(None) => state::FloorplanState::default(),
        Err(e) => {
            tracing::error!(error = %e, path = %config.snapshot_path().display(), "snapshot unreadable");
            return Err(e.into());
        }
    };

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let port = config.port;
    let state = state::AppState::new(config, floorplan);

    // Spawn background persistence task.
    let _persistence = services::persistence::spawn_persistence_task(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "hallplan listening");
    axum::serve(listener, app).await?;
    Ok(())
}
