//! Dish search: raw parameters, query model, builder and results.

mod builder;
mod params;
mod query;
mod result;

pub use builder::{DEFAULT_MAX_LIMIT, SearchQueryBuilder, SearchValidationError};
pub use params::RawSearchParams;
pub use query::{FilterClause, Fuzziness, Pagination, SearchQuery, WeightedField};
pub use result::{SearchHit, SearchResult};
