//! Uplink frame decoding.
//!
//! The frame follows the same layered structure as any wire format here:
//! - `layout`: byte offsets, ranges and scale factors (source of truth)
//! - `reader`: bounds-checked byte access and fixed-point conventions
//! - `field`: the catalog of decodable measurements
//! - `profile`: which fields to emit, and the decode loop itself
//! - `registry`: port number to profile lookup
//! - `error`: explicit, actionable errors
//!
//! Decoding is pure and contains no I/O.

pub mod error;
pub mod field;
pub mod layout;
pub mod profile;
pub mod reader;
pub mod registry;
