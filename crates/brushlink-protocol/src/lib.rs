//! Smart Toothbrush BLE Protocol
//!
//! This crate provides codecs for the proprietary GATT protocol spoken by a
//! family of Bluetooth Low-Energy toothbrushes. Device state is exposed
//! through characteristics whose byte layouts depend on a negotiated
//! protocol version, so every decode/encode call takes the version as an
//! explicit argument.
//!
//! # Protocol Overview
//!
//! - **Characteristics**: each logical record lives on its own GATT
//!   characteristic. Vendor characteristics share a base UUID with a 16-bit
//!   short code substituted in; [`CharacteristicRegistry`] resolves either
//!   form to a [`CharacteristicDescriptor`].
//! - **Records**: fixed layouts with closed enum-valued fields, plus
//!   version-conditional layouts like the battery record that grow fields
//!   with the protocol version.
//! - **Sensor frames**: a fixed 20-byte frame whose trailing marker bytes
//!   select one of five motion/telemetry shapes ([`SensorFrame`]).
//! - **Control**: one multiplexed characteristic taking `(command,
//!   parameter)` payloads; the parameter byte is suppressed for some
//!   commands on newer protocol versions ([`Control`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use brushlink_protocol::{ProtocolVersion, Record, REGISTRY, expand_short_id};
//!
//! let uuid = expand_short_id(0xFF05);
//! let record = REGISTRY.decode_characteristic(&uuid, &data, ProtocolVersion::V008)?;
//! ```

mod advertise;
mod constants;
mod control;
mod error;
mod metadata;
mod records;
mod registry;
mod sensor;
mod types;
mod version;

pub use advertise::*;
pub use constants::*;
pub use control::*;
pub use error::*;
pub use metadata::*;
pub use records::*;
pub use registry::*;
pub use sensor::*;
pub use types::*;
pub use version::*;
