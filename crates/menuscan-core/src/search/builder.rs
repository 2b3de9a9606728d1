//! Builds a [`SearchQuery`] from raw request parameters.

use thiserror::Error;

use super::params::RawSearchParams;
use super::query::{FilterClause, Fuzziness, Pagination, SearchQuery, WeightedField};
use crate::error::ErrorCode;

/// Default upper bound on `limit`.
pub const DEFAULT_MAX_LIMIT: u64 = 100;

const TEXT_KEYS: &[&str] = &["q", "query"];
const CATEGORY_FIELD: &str = "category";
const PRICE_FIELD: &str = "price.amount";

/// Errores de validacion de una busqueda.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchValidationError {
    /// No free-text term was provided.
    #[error("Query parameter is required")]
    MissingQuery,

    /// A parameter is present but malformed or out of bounds.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl SearchValidationError {
    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Client-facing code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingQuery => ErrorCode::MissingQuery,
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
        }
    }
}

/// Translates loosely-typed parameters into a structured dish search.
///
/// Field weights, fuzziness and highlight fields are fixed policy; only
/// the text, filters and pagination come from the request.
///
/// # Example
///
/// ```
/// use menuscan_core::search::{RawSearchParams, SearchQueryBuilder};
///
/// let params = RawSearchParams::new()
///     .with("q", "ramen")
///     .with("max_price", "12.5")
///     .with("offset", "40");
///
/// let query = SearchQueryBuilder::default().build(&params).unwrap();
/// assert_eq!(query.text, "ramen");
/// assert_eq!(query.pagination.page(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SearchQueryBuilder {
    max_limit: u64,
}

impl Default for SearchQueryBuilder {
    fn default() -> Self {
        Self {
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl SearchQueryBuilder {
    /// Creates a builder rejecting pages larger than `max_limit`.
    pub fn new(max_limit: u64) -> Self {
        Self {
            max_limit: max_limit.max(1),
        }
    }

    pub fn max_limit(&self) -> u64 {
        self.max_limit
    }

    /// Validates the parameters and assembles the query.
    pub fn build(&self, params: &RawSearchParams) -> Result<SearchQuery, SearchValidationError> {
        let text = params
            .first_non_blank(TEXT_KEYS)
            .ok_or(SearchValidationError::MissingQuery)?
            .to_string();

        let mut filters = Vec::new();

        let categories = categories(params);
        if !categories.is_empty() {
            filters.push(FilterClause::Terms {
                field: CATEGORY_FIELD.to_string(),
                values: categories,
            });
        }

        let gte = parse_price(params, "min_price")?;
        let lte = parse_price(params, "max_price")?;
        if let (Some(min), Some(max)) = (gte, lte) {
            if min > max {
                return Err(SearchValidationError::invalid(
                    "min_price",
                    "must not exceed max_price",
                ));
            }
        }
        if gte.is_some() || lte.is_some() {
            filters.push(FilterClause::Range {
                field: PRICE_FIELD.to_string(),
                gte,
                lte,
            });
        }

        let pagination = self.pagination(params)?;

        Ok(SearchQuery {
            text,
            fields: vec![
                WeightedField::boosted("name", 3),
                WeightedField::boosted("description", 2),
                WeightedField::plain("ingredients"),
            ],
            fuzziness: Fuzziness::Auto,
            filters,
            pagination,
            highlight: vec!["name".to_string(), "description".to_string()],
        })
    }

    fn pagination(&self, params: &RawSearchParams) -> Result<Pagination, SearchValidationError> {
        let limit = parse_count(params, "limit")?.unwrap_or(Pagination::DEFAULT_LIMIT);
        let offset = parse_count(params, "offset")?.unwrap_or(0);

        if limit == 0 {
            return Err(SearchValidationError::invalid(
                "limit",
                "must be greater than zero",
            ));
        }
        if limit > self.max_limit {
            return Err(SearchValidationError::invalid(
                "limit",
                format!("must not exceed {}", self.max_limit),
            ));
        }

        Ok(Pagination { offset, limit })
    }
}

/// Collects category values. Repeated keys and comma-separated lists are
/// both accepted; blanks and duplicates are dropped.
fn categories(params: &RawSearchParams) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in params.all("category") {
        for value in raw.split(',').map(str::trim).filter(|v| !v.is_empty()) {
            if !out.iter().any(|existing| existing == value) {
                out.push(value.to_string());
            }
        }
    }
    out
}

fn parse_price(params: &RawSearchParams, name: &str) -> Result<Option<f64>, SearchValidationError> {
    let Some(raw) = params.first_non_blank(&[name]) else {
        return Ok(None);
    };

    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        Ok(_) => Err(SearchValidationError::invalid(
            name,
            "must be a non-negative number",
        )),
        Err(_) => Err(SearchValidationError::invalid(name, "must be a number")),
    }
}

fn parse_count(params: &RawSearchParams, name: &str) -> Result<Option<u64>, SearchValidationError> {
    let Some(raw) = params.first_non_blank(&[name]) else {
        return Ok(None);
    };

    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| SearchValidationError::invalid(name, "must be a non-negative integer"))
}
