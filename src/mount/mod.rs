pub mod connection;
pub mod ioptron;

pub use connection::MountConnection;
pub use ioptron::IoptronMount;

use serde::{Deserialize, Serialize};

/// Geographic coordinate of a mount. Opaque to the connection layer;
/// concrete drivers decide how it is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub height_m: f64,
}

/// Capability every concrete mount driver supplies on top of the base
/// connection contract.
pub trait Mount {
    fn position(&self) -> GeoPosition;
}

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("Transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),
}

pub type Result<T> = std::result::Result<T, MountError>;
