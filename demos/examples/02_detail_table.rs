use caibao::{Caibao, DetailTable, TimeRange};
use caibao_core::{GrowthTone, format_grouped, format_percentage};
use caibao_demos::common::{get_connector, init_tracing, stock_from_args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let caibao = Caibao::builder().with_connector(get_connector()?).build()?;
    let stock = stock_from_args();
    let report = caibao.financials(&stock, TimeRange::Y1).await?;

    if let Some(info) = &report.stock_info {
        println!(
            "{} {}  {}  {:+.2} ({})  vol {}  as of {}",
            report.stock.stock_id,
            report.stock.stock_name,
            format_grouped(info.current_price, 2),
            info.change,
            format_percentage(info.change_percent, 2),
            format_grouped(info.volume as f64, 0),
            info.date
        );
    }

    let table = DetailTable::from_records(&report.records);
    if table.is_empty() {
        println!("(no data)");
        return Ok(());
    }

    print!("{:<20}", DetailTable::METRIC_HEADER);
    for m in &table.months {
        print!(" | {:>10}", m.to_string());
    }
    println!();
    for row in &table.rows {
        print!("{:<20}", row.label);
        for cell in &row.cells {
            let marker = match cell.tone {
                Some(GrowthTone::Positive) => "+",
                Some(GrowthTone::Negative) => "-",
                None => " ",
            };
            print!(" | {:>9}{marker}", cell.text);
        }
        println!();
    }

    for w in &report.warnings {
        eprintln!("warning: {w}");
    }
    Ok(())
}
