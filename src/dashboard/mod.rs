//! Dashboard module
//!
//! Provides the monthly aggregates shown on the dashboard: sale statistics,
//! a bar chart of price bands, a pie chart of categories and a combined
//! payload of all three.

mod charts;
mod combined;
mod handlers;
mod statistics;

pub use charts::PriceRangeCount;
pub use combined::CombinedData;
pub use handlers::{get_bar_chart, get_combined_data, get_pie_chart, get_statistics};
pub use statistics::MonthlyStatistics;
