//! Input validation between the request normalizer and the store.

mod validation;
pub use validation::{RelationIds, RequestValidator, DATE_ERROR, NUL_ERROR, YEAR_ERROR};
