use std::sync::Arc;

use caibao::{Caibao, CaibaoConnector, CaibaoError, ConnectorKey, FetchStrategy};

use crate::helpers::m_catalog;

#[test]
fn build_without_connectors_is_invalid() {
    let err = Caibao::builder().build().err().expect("should error");
    assert!(matches!(err, CaibaoError::InvalidArg(_)));
}

#[test]
fn unknown_and_repeated_preference_keys_are_dropped() {
    let a = m_catalog("a", vec![]);
    let b = m_catalog("b", vec![]);
    let caibao = Caibao::builder()
        .with_connector(a)
        .with_connector(b)
        .prefer_keys(&[
            ConnectorKey::new("b"),
            ConnectorKey::new("ghost"),
            ConnectorKey::new("b"),
            ConnectorKey::new("a"),
        ])
        .build()
        .unwrap();
    assert_eq!(
        caibao.config().connector_priority,
        vec![ConnectorKey::new("b"), ConnectorKey::new("a")]
    );
}

#[test]
fn defaults_follow_config() {
    let c: Arc<dyn CaibaoConnector> = m_catalog("a", vec![]);
    let caibao = Caibao::builder().with_connector(c).build().unwrap();
    let cfg = caibao.config();
    assert_eq!(cfg.fetch_strategy, FetchStrategy::PriorityWithFallback);
    assert_eq!(cfg.provider_timeout, std::time::Duration::from_secs(10));
    assert_eq!(cfg.request_timeout, None);
    assert_eq!(cfg.market_timezone, caibao::Tz::Asia__Taipei);
}
