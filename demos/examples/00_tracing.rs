use caibao::{Caibao, TimeRange};
use caibao_demos::common::{get_connector, stock_from_args};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,caibao=trace,caibao_finmind=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let caibao = Caibao::builder().with_connector(get_connector()?).build()?;
    let stock = stock_from_args();

    let _ = caibao.stock_catalog().await?;
    let report = caibao.financials(&stock, TimeRange::Y1).await?;
    tracing::info!(records = report.records.len(), "financials fetched");

    Ok(())
}
