/// Device domain types
use serde::{Deserialize, Serialize};

use super::ids::DeviceId;

/// A device brought in for service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Row identifier
    pub id: DeviceId,

    /// Manufacturer serial number (unique)
    pub serial_number: String,

    /// Manufacturer brand
    pub brand: String,

    /// Model name
    pub model: String,

    /// Registration timestamp (Unix epoch seconds)
    pub created_at: i64,
}

/// Request to register a device
///
/// Every field is optional on the wire so that missing values can be
/// reported as a client error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDevice {
    /// Manufacturer serial number
    pub serial_number: Option<String>,
    /// Manufacturer brand
    pub brand: Option<String>,
    /// Model name
    pub model: Option<String>,
}
