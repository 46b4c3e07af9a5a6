//! Shared HTTP plumbing

mod response;
mod validated_json;

pub use response::{domain_error_response, ApiError, ApiResponse, ApiResult, EmptyData};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
