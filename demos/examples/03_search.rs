use caibao::Caibao;
use caibao_demos::common::{get_connector, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let caibao = Caibao::builder().with_connector(get_connector()?).build()?;
    let query = std::env::args().nth(1).unwrap_or_else(|| "聯".to_string());

    println!("Searching for '{query}'...");
    let report = caibao.search(&query, Some(10)).await?;

    println!("\n## Search Results:");
    println!("{:<10} | Name", "Stock ID");
    println!("{:-<11}|{:-<20}", "", "");
    for s in &report.stocks {
        println!("{:<10} | {}", s.stock_id, s.stock_name);
    }
    for w in &report.warnings {
        eprintln!("warning: {w}");
    }
    Ok(())
}
