pub mod catalog;
pub mod financials;
pub mod macros;
pub mod series;

pub mod util;
