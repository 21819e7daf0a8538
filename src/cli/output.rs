//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Status {
            code: Some(code), ..
        } => format!("Error: {} [{}]", e, code),
        ApiError::Cancelled => "Error: interrupted".to_string(),
        _ => format!("Error: {}", e),
    }
}
