use caibao_core::Stock;

/// Per-stock shape of the generated series.
pub struct Profile {
    pub id: &'static str,
    pub name: &'static str,
    /// Revenue of January 2013, TWD.
    pub base_revenue: f64,
    /// Year-over-year revenue drift, e.g. `0.12` for +12 %.
    pub yearly_growth: f64,
    /// Close on the first trading day of 2013.
    pub base_price: f64,
    /// Close drift per trading day.
    pub daily_drift: f64,
}

pub const PROFILES: &[Profile] = &[
    Profile {
        id: "2330",
        name: "台積電",
        base_revenue: 38_000_000_000.0,
        yearly_growth: 0.15,
        base_price: 98.0,
        daily_drift: 0.28,
    },
    Profile {
        id: "2317",
        name: "鴻海",
        base_revenue: 300_000_000_000.0,
        yearly_growth: 0.02,
        base_price: 75.0,
        daily_drift: 0.01,
    },
    Profile {
        id: "2454",
        name: "聯發科",
        base_revenue: 10_000_000_000.0,
        yearly_growth: 0.10,
        base_price: 380.0,
        daily_drift: 0.2,
    },
];

pub fn profile(stock_id: &str) -> Option<&'static Profile> {
    PROFILES.iter().find(|p| p.id == stock_id)
}

/// Catalog as the upstream lists it, including one repeated row.
pub fn catalog() -> Vec<Stock> {
    let mut out: Vec<Stock> = PROFILES.iter().map(|p| Stock::new(p.id, p.name)).collect();
    out.push(Stock::new("2330", "台積電"));
    out
}
