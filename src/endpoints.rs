//! The API endpoints URIs.

/// The route for checking that the server is up.
pub const HEALTH: &str = "/api/health";
/// The route that replaces the product collection with the upstream feed.
pub const INITIALIZE_DATABASE: &str = "/api/products/initialize-database";
/// The route for the paginated and searchable transaction listing.
pub const TRANSACTIONS: &str = "/api/products/transactions";
/// The route for the sale statistics of a month.
pub const STATISTICS: &str = "/api/products/statistics";
/// The route for the price band counts of a month.
pub const BAR_CHART: &str = "/api/products/barChart";
/// The route for the category counts of a month.
pub const PIE_CHART: &str = "/api/products/pieChart";
/// The route for the statistics and both charts of a month.
pub const COMBINED_DATA: &str = "/api/products/combinedData";
