//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of records per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated, one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The page number, starting from 1.
    pub number: u64,
    /// The maximum number of records on a page.
    pub size: u64,
}

impl Page {
    /// Parse the raw `page` and `per_page` query values, falling back to the
    /// defaults in `config` for missing or empty values.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if either value is not an integer or
    /// is less than one.
    pub fn parse(
        page: Option<&str>,
        per_page: Option<&str>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let number = parse_positive("page", page, config.default_page)?;
        let size = parse_positive("perPage", per_page, config.default_page_size)?;

        Ok(Self { number, size })
    }

    /// The window of matching records that this page covers.
    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: (self.number - 1).saturating_mul(self.size),
            limit: self.size,
        }
    }

    /// The number of pages needed to show `total_items` records.
    pub fn count_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.size)
    }
}

/// Skip `offset` records and then take up to `limit` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The number of records to skip.
    pub offset: u64,
    /// The maximum number of records to return.
    pub limit: u64,
}

fn parse_positive(name: &str, value: Option<&str>, default: u64) -> Result<u64, Error> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(value) => value,
    };

    match value.parse::<u64>() {
        Ok(number) if number >= 1 => Ok(number),
        _ => Err(Error::InvalidPagination(format!(
            "{name} must be a positive integer, got \"{value}\""
        ))),
    }
}
