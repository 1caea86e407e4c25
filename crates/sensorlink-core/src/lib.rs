//! Sensorlink core library: uplink payload decoding for the climate/CO2
//! sensor node.
//!
//! The device's uplink starts with a 12-byte frame (header, voltage,
//! battery, temperature, humidity, illuminance, pressure, CO2); the firmware
//! sends 16 bytes and the decoder reads only the first 12. [`decode`] turns
//! that frame into a [`Fields`] map of named numeric values. Decoding is
//! stateless and side-effect free; a port's [`DecodingProfile`] configures
//! which fields are emitted and whether unread sensors come out as `null`.
//!
//! Invariants:
//! - Output values are pure functions of fixed byte offsets.
//! - A frame shorter than 12 bytes is rejected, never partially decoded.
//! - Multi-byte fields are big-endian and unsigned. This includes
//!   temperature: the device encodes it as a signed 16-bit value, but no
//!   sign extension is applied here, so sub-zero readings decode as large
//!   positive numbers. Callers relying on negative temperatures must
//!   reinterpret the raw value themselves.
//!
//! # Examples
//! ```
//! use sensorlink_core::decode;
//!
//! let fields = decode(&[0, 100, 85, 1, 144, 0, 0, 0, 0, 0, 1, 144], 1)?;
//! assert_eq!(fields.get("voltage").and_then(|v| v.as_f64()), Some(10.0));
//! assert_eq!(fields.get("battery_pct").and_then(|v| v.as_f64()), Some(85.0));
//! assert_eq!(fields.get("temperature").and_then(|v| v.as_f64()), Some(40.0));
//! assert_eq!(fields.get("co2").and_then(|v| v.as_f64()), Some(400.0));
//! # Ok::<(), sensorlink_core::DecodeError>(())
//! ```

mod payload;

pub use payload::error::DecodeError;
pub use payload::field::{Field, FieldValue, HeaderKind};
pub use payload::layout::FRAME_LEN;
pub use payload::profile::{DEFAULT_FIELDS, DecodingProfile, FieldSet, Fields, UnreadPolicy};
pub use payload::registry::{ProfileConfig, ProfileRegistry, RegistryConfig};

/// Decode one uplink frame received on `port`.
///
/// Every port currently resolves to the default profile.
pub fn decode(bytes: &[u8], port: u8) -> Result<Fields, DecodeError> {
    ProfileRegistry::default().decode(bytes, port)
}

/// Decode a frame whose bytes arrive as plain integers (e.g. a JSON array).
///
/// Every element must fit in a byte; the first one that does not is reported
/// with its index.
///
/// # Examples
/// ```
/// use sensorlink_core::{DecodeError, decode_values};
///
/// let err = decode_values(&[0, 256, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 1).unwrap_err();
/// assert_eq!(err, DecodeError::InvalidByteValue { index: 1, value: 256 });
/// ```
pub fn decode_values(values: &[i64], port: u8) -> Result<Fields, DecodeError> {
    let bytes = bytes_from_values(values)?;
    decode(&bytes, port)
}

/// Narrow integers to bytes, rejecting anything outside `0..=255`.
pub fn bytes_from_values(values: &[i64]) -> Result<Vec<u8>, DecodeError> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            u8::try_from(value).map_err(|_| DecodeError::InvalidByteValue { index, value })
        })
        .collect()
}
