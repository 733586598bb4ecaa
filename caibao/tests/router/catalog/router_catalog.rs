use std::time::Duration;

use caibao::{Caibao, CaibaoError, Stock};

use crate::helpers::{MockConnector, m_catalog};

fn ids(stocks: &[Stock]) -> Vec<&str> {
    stocks.iter().map(|s| s.stock_id.as_str()).collect()
}

#[tokio::test]
async fn catalog_merges_in_provider_order_and_dedups() {
    let a = m_catalog(
        "a",
        vec![Stock::new("2330", "台積電"), Stock::new("2317", "鴻海"), Stock::new("2330", "TSMC")],
    );
    let b = m_catalog("b", vec![Stock::new("2454", "聯發科"), Stock::new("2317", "Hon Hai")]);
    let caibao = Caibao::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let report = caibao.stock_catalog().await.unwrap();
    assert_eq!(ids(&report.stocks), vec!["2330", "2317", "2454"]);
    assert_eq!(report.stocks[0].stock_name, "台積電");
    assert_eq!(report.stocks[1].stock_name, "鴻海");
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn partial_failure_becomes_warning() {
    let broken = MockConnector::builder()
        .name("broken")
        .with_catalog_fn(|| Err(CaibaoError::Other("500".into())))
        .build();
    let ok = m_catalog("ok", vec![Stock::new("2330", "台積電")]);
    let caibao = Caibao::builder()
        .with_connector(broken)
        .with_connector(ok)
        .build()
        .unwrap();

    let report = caibao.stock_catalog().await.unwrap();
    assert_eq!(ids(&report.stocks), vec!["2330"]);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        &report.warnings[0],
        CaibaoError::Connector { connector, .. } if connector == "broken"
    ));
}

#[tokio::test]
async fn all_failed_is_an_error() {
    let broken = MockConnector::builder()
        .name("broken")
        .with_catalog_fn(|| Err(CaibaoError::connector("broken", "down")))
        .build();
    let caibao = Caibao::builder().with_connector(broken).build().unwrap();

    let err = caibao.stock_catalog().await.expect_err("should error");
    assert!(matches!(err, CaibaoError::AllProvidersFailed(v) if v.len() == 1));
}

#[tokio::test]
async fn request_deadline_applies_to_catalog() {
    let slow = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_millis(300))
        .returns_catalog_ok(vec![Stock::new("2330", "台積電")])
        .build();
    let caibao = Caibao::builder()
        .with_connector(slow)
        .request_timeout(Duration::from_millis(20))
        .build()
        .unwrap();

    let err = caibao.stock_catalog().await.expect_err("should time out");
    assert_eq!(err, CaibaoError::request_timeout("stock-catalog"));
}

#[tokio::test]
async fn search_filters_case_insensitively_and_limits() {
    let c = m_catalog(
        "c",
        vec![
            Stock::new("2330", "台積電"),
            Stock::new("2303", "聯電"),
            Stock::new("2454", "聯發科"),
            Stock::new("3008", "Largan"),
        ],
    );
    let caibao = Caibao::builder().with_connector(c).build().unwrap();

    let hits = caibao.search("聯", None).await.unwrap();
    assert_eq!(ids(&hits.stocks), vec!["2303", "2454"]);

    let hits = caibao.search("  LARG ", None).await.unwrap();
    assert_eq!(ids(&hits.stocks), vec!["3008"]);

    let hits = caibao.search("23", Some(1)).await.unwrap();
    assert_eq!(ids(&hits.stocks), vec!["2330"]);

    let all = caibao.search("", None).await.unwrap();
    assert_eq!(all.stocks.len(), 4);
}

#[tokio::test]
async fn nested_aggregate_failures_are_flattened_into_warnings() {
    let nested = MockConnector::builder()
        .name("nested")
        .with_catalog_fn(|| {
            Err(CaibaoError::AllProvidersFailed(vec![
                CaibaoError::connector("x", "a"),
                CaibaoError::AllProvidersFailed(vec![CaibaoError::connector("y", "b")]),
            ]))
        })
        .build();
    let ok = m_catalog("ok", vec![Stock::new("2330", "台積電")]);
    let caibao = Caibao::builder()
        .with_connector(nested)
        .with_connector(ok)
        .build()
        .unwrap();

    let report = caibao.stock_catalog().await.unwrap();
    assert_eq!(ids(&report.stocks), vec!["2330"]);
    assert_eq!(
        report.warnings,
        vec![CaibaoError::connector("x", "a"), CaibaoError::connector("y", "b")]
    );
}

#[tokio::test]
async fn empty_provider_is_not_a_warning() {
    let empty = MockConnector::builder()
        .name("empty")
        .with_catalog_fn(|| Err(CaibaoError::not_found("stock catalog")))
        .build();
    let ok = m_catalog("ok", vec![Stock::new("2330", "台積電")]);
    let caibao = Caibao::builder()
        .with_connector(empty)
        .with_connector(ok)
        .build()
        .unwrap();

    let report = caibao.stock_catalog().await.unwrap();
    assert_eq!(ids(&report.stocks), vec!["2330"]);
    assert!(report.warnings.is_empty());
}
