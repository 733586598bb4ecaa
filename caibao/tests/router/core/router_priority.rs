use std::sync::Arc;

use caibao::{Caibao, CaibaoConnector};
use caibao_core::RevenueRecord;

use crate::helpers::{d, m_revenue, range_2024, tsmc};

fn rows(revenue: f64) -> Vec<RevenueRecord> {
    vec![RevenueRecord::new(d(2024, 3, 10), revenue)]
}

#[tokio::test]
async fn registration_order_is_default_priority() {
    let first = m_revenue("first", rows(1.0));
    let second = m_revenue("second", rows(2.0));
    let caibao = Caibao::builder()
        .with_connector(first.clone())
        .with_connector(second.clone())
        .build()
        .unwrap();

    let got = caibao.monthly_revenue(&tsmc(), range_2024()).await.unwrap();
    assert_eq!(got[0].revenue, 1.0);
    assert_eq!(second.calls(), 0);
}

#[tokio::test]
async fn preferred_connector_goes_first() {
    let first = m_revenue("first", rows(1.0));
    let second = m_revenue("second", rows(2.0));
    let preferred: Arc<dyn CaibaoConnector> = second.clone();
    let caibao = Caibao::builder()
        .with_connector(first.clone())
        .with_connector(second.clone())
        .prefer_connectors(&[preferred])
        .build()
        .unwrap();

    let got = caibao.monthly_revenue(&tsmc(), range_2024()).await.unwrap();
    assert_eq!(got[0].revenue, 2.0);
    assert_eq!(first.calls(), 0);
}
