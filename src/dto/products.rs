//! Query-string parameters of the product listing endpoints and their
//! translation into a [`ProductQuery`].

use serde::{Deserialize, Serialize};

use crate::domain::query::{ProductQuery, SortOrder};
use crate::domain::types::parse_number_prefix;

/// Parses an optional numeric bound from its numeric prefix, treating
/// anything without one as absent.
fn parse_bound(raw: Option<&str>) -> Option<f64> {
    raw.and_then(parse_number_prefix).filter(|v| v.is_finite())
}

/// Query parameters accepted by `GET /api/products`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl ListParams {
    pub fn sorted(sort: SortOrder) -> Self {
        Self {
            sort: sort.as_param().map(str::to_string),
        }
    }
}

impl From<ListParams> for ProductQuery {
    fn from(params: ListParams) -> Self {
        ProductQuery::new().sort(SortOrder::parse(params.sort.as_deref()))
    }
}

/// Query parameters accepted by `GET /api/products/search/query`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl From<SearchParams> for ProductQuery {
    fn from(params: SearchParams) -> Self {
        let mut query = ProductQuery::new().sort(SortOrder::parse(params.sort.as_deref()));

        if let Some(term) = params.term {
            query = query.term(term);
        }
        if let Some(brand) = params.brand {
            query = query.brand(brand);
        }
        if let Some(min_price) = parse_bound(params.min_price.as_deref()) {
            query = query.min_price(min_price);
        }
        if let Some(max_price) = parse_bound(params.max_price.as_deref()) {
            query = query.max_price(max_price);
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_build_full_query() {
        let params = SearchParams {
            term: Some("drill".to_string()),
            brand: Some("DeWalt".to_string()),
            min_price: Some("10".to_string()),
            max_price: Some(" 20.5 ".to_string()),
            sort: Some("price_desc".to_string()),
        };

        let query = ProductQuery::from(params);

        assert_eq!(query.term.as_deref(), Some("drill"));
        assert_eq!(query.brand.as_deref(), Some("DeWalt"));
        assert_eq!(query.min_price, Some(10.0));
        assert_eq!(query.max_price, Some(20.5));
        assert_eq!(query.sort, SortOrder::PriceDesc);
    }

    #[test]
    fn malformed_bounds_are_dropped() {
        let params = SearchParams {
            min_price: Some("cheap".to_string()),
            max_price: Some("NaN".to_string()),
            term: Some(String::new()),
            ..SearchParams::default()
        };

        let query = ProductQuery::from(params);

        assert!(query.is_unfiltered());
        assert_eq!(query.sort, SortOrder::Id);
    }

    #[test]
    fn bounds_use_numeric_prefix() {
        let params = SearchParams {
            min_price: Some("10abc".to_string()),
            max_price: Some(" 2e1 dollars".to_string()),
            ..SearchParams::default()
        };

        let query = ProductQuery::from(params);

        assert_eq!(query.min_price, Some(10.0));
        assert_eq!(query.max_price, Some(20.0));
    }

    #[test]
    fn search_params_use_camel_case_keys() {
        let params = SearchParams {
            min_price: Some("1".to_string()),
            max_price: Some("2".to_string()),
            ..SearchParams::default()
        };

        let value = serde_json::to_value(&params).expect("serializable");

        assert_eq!(value["minPrice"], "1");
        assert_eq!(value["maxPrice"], "2");
        assert!(value.get("term").is_none());
    }

    #[test]
    fn list_params_only_sort() {
        let query = ProductQuery::from(ListParams::sorted(SortOrder::PriceAsc));
        assert_eq!(query.sort, SortOrder::PriceAsc);
        assert!(query.is_unfiltered());

        assert_eq!(ListParams::sorted(SortOrder::Id).sort, None);
    }
}
