//! Operator-facing text for dispatch results.

use crate::client::DispatchError;

pub const DISPATCH_SUCCESS_MESSAGE: &str = "Drone successfully dispatched to the selected area";
pub const SELECT_AREA_MESSAGE: &str = "Please select an area on the map first";

/// Message shown to the operator after a dispatch attempt. Failures carry the
/// underlying error text.
pub fn operator_message<T>(result: &Result<T, DispatchError>) -> String {
    match result {
        Ok(_) => DISPATCH_SUCCESS_MESSAGE.to_string(),
        Err(DispatchError::InvalidArea(_)) => SELECT_AREA_MESSAGE.to_string(),
        Err(err) => format!("Failed to dispatch drone: {}", err),
    }
}
