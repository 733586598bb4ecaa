use caibao::{Caibao, ChartMetric, ChartSelection, TimeRange};
use caibao_demos::common::{get_connector, init_tracing, stock_from_args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let caibao = Caibao::builder().with_connector(get_connector()?).build()?;
    let stock = stock_from_args();

    // 3-year window: 36 composed months
    let report = caibao.financials(&stock, TimeRange::Y3).await?;
    println!(
        "{} {} | fetched {} | {} months",
        report.stock.stock_id,
        report.stock.stock_name,
        report.range,
        report.records.len()
    );
    if report.records.is_empty() {
        println!("(no data)");
        return Ok(());
    }

    // Turning growth on evicts the oldest active series (revenue).
    let selection = ChartSelection::default().toggle(ChartMetric::RevenueGrowth);
    let active: Vec<&str> = selection.active().iter().map(|m| m.label()).collect();
    println!("chart series: {}", active.join(" / "));

    // The rendering layer consumes this JSON verbatim.
    println!("{}", serde_json::to_string_pretty(&report.records)?);
    Ok(())
}
