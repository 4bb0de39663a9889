//! Shared HTTP building blocks: response envelopes, error mapping and the
//! validating JSON extractor.

pub mod error;
pub mod extractors;
pub mod response;
pub mod validated_json;

pub use error::{ApiError, ApiResult, ErrorBody, RequestContext, REQUEST_CONTEXT};
pub use extractors::{Path, Query};
pub use response::{ApiResponse, PaginatedResponse, PaginationParams};
pub use validated_json::ValidatedJson;
