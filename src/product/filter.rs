//! Builds store filters from listing and dashboard request parameters.

use time::Month;

use crate::{Error, product::month::resolve_month};

/// Selects the products a store query applies to.
///
/// The month and search clauses must both match when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Only include products sold in this calendar month of any year.
    pub month: Option<Month>,
    /// Only include products matching this search term.
    pub search: Option<SearchTerm>,
}

impl ProductFilter {
    /// A filter that matches every product sold in `month`.
    pub fn for_month(month: Month) -> Self {
        Self {
            month: Some(month),
            search: None,
        }
    }

    /// Build a filter from the raw `search` and `month` request values.
    ///
    /// Empty values are treated the same as missing values.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `month` is present but not a valid month.
    pub fn build(search: Option<&str>, month: Option<&str>) -> Result<Self, Error> {
        let month = match month.filter(|month| !month.trim().is_empty()) {
            Some(month) => Some(resolve_month(month)?),
            None => None,
        };

        Ok(Self {
            month,
            search: search.and_then(SearchTerm::new),
        })
    }
}

/// Text to search for in the title or description of a product.
///
/// A product matches when its title or description contains the text,
/// ignoring case, or when the text is a number equal to the product's price.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    /// The text to look for.
    pub text: String,
    /// The text as a price, if it is a number.
    pub price: Option<f64>,
}

impl SearchTerm {
    /// Create a search term, or `None` if `text` is empty.
    pub fn new(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }

        let price = text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite());

        Some(Self {
            text: text.to_owned(),
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use crate::{
        Error,
        product::filter::{ProductFilter, SearchTerm},
    };

    #[test]
    fn empty_values_build_an_unrestricted_filter() {
        let got = ProductFilter::build(Some(""), Some("")).unwrap();

        assert_eq!(got, ProductFilter::default());
    }

    #[test]
    fn resolves_month_name() {
        let got = ProductFilter::build(None, Some("march")).unwrap();

        assert_eq!(got, ProductFilter::for_month(Month::March));
    }

    #[test]
    fn invalid_month_fails() {
        let got = ProductFilter::build(None, Some("Smarch"));

        assert_eq!(got, Err(Error::InvalidMonth("Smarch".to_owned())));
    }

    #[test]
    fn numeric_search_also_matches_price() {
        let got = SearchTerm::new("150").unwrap();

        assert_eq!(got.text, "150");
        assert_eq!(got.price, Some(150.0));
    }

    #[test]
    fn text_search_has_no_price() {
        let got = SearchTerm::new("mens cotton").unwrap();

        assert_eq!(got.price, None);
        assert_eq!(SearchTerm::new("NaN").unwrap().price, None);
        assert_eq!(SearchTerm::new("inf").unwrap().price, None);
    }

    #[test]
    fn combines_search_and_month() {
        let got = ProductFilter::build(Some("Jacket"), Some("12")).unwrap();

        assert_eq!(got.month, Some(Month::December));
        assert_eq!(got.search, SearchTerm::new("Jacket"));
    }
}
