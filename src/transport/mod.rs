pub mod serial;

pub use serial::SerialTransport;

use serde::{Deserialize, Serialize};

/// Number of data bits per serial frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// Stop-bit count delimiting each serial frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopBits {
    One,
    /// 1.5 bit times.
    OneAndHalf,
    Two,
}

/// Error-detection scheme for a serial frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    Even,
    None,
    Odd,
}

/// Complete parameter set for a serial channel, produced from a validated
/// mount configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortSettings {
    pub port: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub stop_bits: StopBits,
    pub parity: Parity,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Transport has no port settings applied")]
    NotConfigured,

    #[error("Unsupported setting: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialport error: {0}")]
    SerialportError(#[from] serialport::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// Opaque serial channel capability owned by a mount connection.
///
/// A transport starts closed and unparameterized. `configure` stores the
/// settings the next `open` call uses; it never touches the OS device.
pub trait Transport {
    /// Store the parameters used by the next `open` call.
    fn configure(&mut self, settings: PortSettings);

    /// Open the underlying channel. Blocks until the channel is open or the
    /// open attempt fails; no retry, no timeout discipline beyond what the
    /// backing device applies.
    fn open(&mut self) -> Result<()>;

    /// Whether the channel currently reports open.
    fn is_open(&self) -> bool;
}
