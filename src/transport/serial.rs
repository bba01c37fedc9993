use std::time::Duration;

use serialport::SerialPort;

use super::{DataBits, Parity, PortSettings, Result, StopBits, Transport, TransportError};

const OPEN_TIMEOUT: Duration = Duration::from_millis(1000);

/// Transport backed by an OS serial device via the `serialport` crate.
///
/// Created closed and unparameterized; `configure` only records settings,
/// the device is touched for the first time by `open`.
pub struct SerialTransport {
    settings: Option<PortSettings>,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    pub fn new() -> Self {
        Self {
            settings: None,
            port: None,
        }
    }

    /// Settings recorded by the last `configure` call, if any.
    pub fn settings(&self) -> Option<&PortSettings> {
        self.settings.as_ref()
    }
}

impl Default for SerialTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for SerialTransport {
    fn configure(&mut self, settings: PortSettings) {
        self.settings = Some(settings);
    }

    fn open(&mut self) -> Result<()> {
        let settings = self.settings.as_ref().ok_or(TransportError::NotConfigured)?;

        let data_bits = match settings.data_bits {
            DataBits::Five => serialport::DataBits::Five,
            DataBits::Six => serialport::DataBits::Six,
            DataBits::Seven => serialport::DataBits::Seven,
            DataBits::Eight => serialport::DataBits::Eight,
        };
        let stop_bits = match settings.stop_bits {
            StopBits::One => serialport::StopBits::One,
            StopBits::Two => serialport::StopBits::Two,
            // The host serial stack exposes no 1.5 stop-bit setting.
            StopBits::OneAndHalf => {
                return Err(TransportError::Unsupported(
                    "1.5 stop bits is not available on the host serial stack".to_string(),
                ))
            }
        };
        let parity = match settings.parity {
            Parity::Even => serialport::Parity::Even,
            Parity::None => serialport::Parity::None,
            Parity::Odd => serialport::Parity::Odd,
        };

        let port = serialport::new(settings.port.as_str(), settings.baud_rate)
            .data_bits(data_bits)
            .stop_bits(stop_bits)
            .parity(parity)
            .timeout(OPEN_TIMEOUT)
            .open()?;
        self.port = Some(port);

        log::info!("Opened mount serial port {}", settings.port);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_transport_is_closed_and_unconfigured() {
        let transport = SerialTransport::new();
        assert!(!transport.is_open());
        assert!(transport.settings().is_none());
    }

    #[test]
    fn test_open_without_configure_fails() {
        let mut transport = SerialTransport::new();
        let err = transport.open().unwrap_err();
        assert!(matches!(err, TransportError::NotConfigured));
    }

    #[test]
    fn test_configure_records_settings_without_opening() {
        let mut transport = SerialTransport::new();
        transport.configure(PortSettings {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 115200,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: Parity::None,
        });

        assert!(!transport.is_open());
        assert_eq!(transport.settings().unwrap().port, "/dev/ttyUSB0");
    }
}
