use std::sync::Arc;
use std::time::Duration;

use caibao::{Caibao, CaibaoError, Capability, MonthKey, Stock, TimeRange};
use caibao_mock::{DynamicMockConnector, MockBehavior, MockConnector as FixtureConnector};

use crate::helpers::{MockConnector, d, price_series, revenue_series, tsmc};

fn month(y: i32, m: u32) -> MonthKey {
    MonthKey::new(y, m).unwrap()
}

#[tokio::test]
async fn composes_lagged_prices_and_growth() {
    // Reports published Jan 2023 .. Dec 2024, prices Dec 2022 .. Nov 2024
    let revenue = revenue_series(2023, 1, 24, 2_000_000.0, 100_000.0);
    let prices = price_series(2022, 12, 24, 50.0);
    let c = MockConnector::builder()
        .name("c")
        .returns_revenue_ok(revenue)
        .returns_prices_ok(prices)
        .build();
    let caibao = Caibao::builder().with_connector(c).build().unwrap();

    let report = caibao
        .financials_on(&tsmc(), TimeRange::Y1, d(2025, 1, 15))
        .await
        .unwrap();

    assert_eq!(report.records.len(), 12);
    let first = &report.records[0];
    let last = &report.records[11];
    assert_eq!(first.month, month(2023, 12));
    assert_eq!(last.month, month(2024, 11));
    assert!(report.records.iter().all(|r| r.avg_price == 50.0));
    // Dec 2024 report: 2_000_000 + 23 * 100_000 = 4.3M; a year earlier 3.1M
    assert_eq!(last.revenue, 4.3);
    assert_eq!(last.revenue_growth, 38.71);
    assert!(report.warnings.is_empty());

    let info = report.stock_info.expect("prices present");
    assert_eq!(info.current_price, 51.0);
    assert_eq!(info.date, d(2024, 11, 20));
}

#[tokio::test]
async fn requests_window_plus_one_year_ending_yesterday() {
    let (conn, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_revenue_behavior(crate::helpers::TSMC, MockBehavior::Return(vec![]))
        .await;
    controller
        .set_price_behavior(crate::helpers::TSMC, MockBehavior::Return(vec![]))
        .await;
    let caibao = Caibao::builder().with_connector(conn).build().unwrap();

    let today = d(2024, 6, 15);
    caibao
        .financials_on(&tsmc(), TimeRange::Y5, today)
        .await
        .unwrap();

    let expected = TimeRange::Y5.fetch_range(today).unwrap();
    assert_eq!(expected.start(), d(2018, 6, 15));
    assert_eq!(expected.end(), d(2024, 6, 14));
    assert_eq!(
        controller.requested_ranges(Capability::MonthlyRevenue).await,
        vec![expected]
    );
    assert_eq!(
        controller.requested_ranges(Capability::DailyPrices).await,
        vec![expected]
    );
}

#[tokio::test]
async fn empty_feed_yields_empty_records_with_warning() {
    let c = MockConnector::builder()
        .name("c")
        .returns_revenue_ok(vec![])
        .returns_prices_ok(price_series(2024, 1, 3, 10.0))
        .build();
    let caibao = Caibao::builder().with_connector(c).build().unwrap();

    let report = caibao
        .financials_on(&tsmc(), TimeRange::Y3, d(2024, 6, 1))
        .await
        .unwrap();
    assert!(report.records.is_empty());
    assert!(report.stock_info.is_some());
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], CaibaoError::NotFound { .. }));
}

#[tokio::test]
async fn fetch_failure_is_returned_without_a_report() {
    let fixtures = Arc::new(FixtureConnector::new());
    let caibao = Caibao::builder().with_connector(fixtures).build().unwrap();

    let err = caibao
        .financials_on(&Stock::from_id("FAIL"), TimeRange::Y1, d(2024, 6, 1))
        .await
        .expect_err("should fail");
    match err {
        CaibaoError::AllProvidersFailed(errs) => {
            assert!(matches!(&errs[0], CaibaoError::Connector { connector, .. } if connector == "caibao-mock"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn price_failure_alone_fails_the_report() {
    let c = MockConnector::builder()
        .name("c")
        .returns_revenue_ok(revenue_series(2024, 1, 3, 1.0, 0.0))
        .with_price_fn(|_s, _r| Err(CaibaoError::not_found("prices")))
        .build();
    let caibao = Caibao::builder().with_connector(c).build().unwrap();

    let err = caibao
        .financials_on(&tsmc(), TimeRange::Y1, d(2024, 6, 1))
        .await
        .expect_err("should fail");
    assert_eq!(err, CaibaoError::not_found("daily prices for 2330"));
}

#[tokio::test]
async fn request_deadline_bounds_the_combined_fetch() {
    let (conn, controller) = DynamicMockConnector::new_with_controller("dyn");
    controller
        .set_revenue_behavior(crate::helpers::TSMC, MockBehavior::Return(vec![]))
        .await;
    controller
        .set_price_behavior(crate::helpers::TSMC, MockBehavior::Hang)
        .await;
    let caibao = Caibao::builder()
        .with_connector(conn)
        .request_timeout(Duration::from_millis(30))
        .build()
        .unwrap();

    let err = caibao
        .financials_on(&tsmc(), TimeRange::Y1, d(2024, 6, 1))
        .await
        .expect_err("should time out");
    assert_eq!(err, CaibaoError::request_timeout("financials"));
}

#[tokio::test]
async fn fixture_connector_fills_every_window() {
    let fixtures = Arc::new(FixtureConnector::new());
    let caibao = Caibao::builder().with_connector(fixtures).build().unwrap();

    for window in TimeRange::ALL {
        let report = caibao
            .financials_on(&Stock::new("2454", "聯發科"), window, d(2025, 3, 10))
            .await
            .unwrap();
        assert_eq!(report.records.len(), window.months());
        assert!(report.records.windows(2).all(|w| w[0].month < w[1].month));
        assert_eq!(report.records.last().map(|r| r.month), Some(month(2025, 2)));
    }
}
