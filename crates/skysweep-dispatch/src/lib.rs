//! SkySweep dispatch - drone-dispatch endpoint client
//!
//! Sends normalized sweep areas to the external dispatch service.

pub mod client;
pub mod outcome;

pub use client::{DispatchAck, DispatchClient, DispatchError, DISPATCH_RECTANGLE_PATH};
pub use outcome::{operator_message, DISPATCH_SUCCESS_MESSAGE, SELECT_AREA_MESSAGE};
