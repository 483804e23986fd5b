//! Runs the trends pipeline once and prints the JSON response to stdout.
//! Set `AI_TEST_MODE=mock` to skip real highlight calls.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tech_trends::init_tracing();

    let service = tech_trends::build_service()?;
    tracing::info!(
        google_configured = service.search_configured(),
        openai_configured = service.enrichment_configured(),
        entries = service.catalog().len(),
        "running trends probe"
    );

    let resp = service.get_trends().await;
    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(())
}
