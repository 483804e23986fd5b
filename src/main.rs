//! Tech Trends Service — Binary Entrypoint
//! Boots the Axum HTTP server on Shuttle, wiring config, backends, and routes.

use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    tech_trends::init_tracing();
    tracing::info!("starting tech trends service");

    let router = tech_trends::app().await?;
    tracing::info!("configuration validated, router ready");

    Ok(router.into())
}
