//! Serial connection contract for controllable telescope mounts.
//!
//! The crate validates a structured serial configuration (port, baud rate,
//! data bits, stop bits, parity), maps it onto typed port settings, and
//! exposes the connection lifecycle concrete mount drivers build on.
//! Validation is exhaustive and never fails hard: it aggregates one
//! human-readable message per broken field, and a mount constructed from a
//! bad configuration comes up in a degraded, never-connectable state rather
//! than aborting startup.

pub mod config;
pub mod mount;
pub mod transport;

pub use config::{port_settings, validate_config, validate_config_for, Platform, ValidationReport};
pub use mount::{GeoPosition, IoptronMount, Mount, MountConnection};
pub use transport::{PortSettings, SerialTransport, Transport};
