use serde_json::Value;

use super::Result;
use crate::config::{self, ValidationReport};
use crate::transport::{SerialTransport, Transport};

/// Base connection every mount driver builds on: one exclusively owned
/// transport, the configuration given at construction, and the polar
/// alignment flag.
///
/// Construction with an invalid configuration still yields a connection —
/// every validation error is logged and the transport is left
/// unparameterized, so the failure surfaces later as an open error rather
/// than aborting startup. Callers that want to fail fast check
/// `validation()` themselves.
pub struct MountConnection<T: Transport = SerialTransport> {
    config: Value,
    transport: T,
    validation: ValidationReport,
    polar_aligned: bool,
}

impl<T: Transport + Default> MountConnection<T> {
    /// Create a connection with a fresh, closed transport. The configuration
    /// is validated once, here; on success its settings are applied to the
    /// transport.
    pub fn new(config: Value) -> Self {
        let mut transport = T::default();
        let validation = config::validate_config(&config);

        if validation.is_valid() {
            match config::port_settings(&config) {
                Ok(settings) => transport.configure(settings),
                Err(err) => log::warn!("Mount serial config could not be applied: {err}"),
            }
        } else {
            for message in validation.errors() {
                log::warn!("{message}");
            }
        }

        Self {
            config,
            transport,
            validation,
            polar_aligned: false,
        }
    }
}

impl<T: Transport> MountConnection<T> {
    /// Adopt an externally prepared transport as-is. No validation and no
    /// parameter mapping happen on this path; the caller asserts the
    /// transport is already configured.
    pub fn with_transport(config: Value, transport: T) -> Self {
        Self {
            config,
            transport,
            validation: ValidationReport::default(),
            polar_aligned: false,
        }
    }

    /// Open the transport channel. Errors propagate untouched; there is no
    /// retry and no reconnect in this layer.
    pub fn connect(&mut self) -> Result<()> {
        self.transport.open()?;
        Ok(())
    }

    /// Whether the transport reports its channel open.
    pub fn connected(&self) -> bool {
        self.transport.is_open()
    }

    pub fn polar_aligned(&self) -> bool {
        self.polar_aligned
    }

    pub fn set_polar_aligned(&mut self, value: bool) {
        self.polar_aligned = value;
    }

    /// The validation outcome recorded at construction. Trivially valid for
    /// connections built over an adopted transport.
    pub fn validation(&self) -> &ValidationReport {
        &self.validation
    }

    /// The configuration given at construction, kept for diagnostics only.
    pub fn config(&self) -> &Value {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable transport access for drivers that speak their vendor protocol
    /// over the open channel.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{PortSettings, TransportError};
    use serde_json::json;

    #[derive(Default)]
    struct MockTransport {
        settings: Option<PortSettings>,
        open: bool,
    }

    impl Transport for MockTransport {
        fn configure(&mut self, settings: PortSettings) {
            self.settings = Some(settings);
        }

        fn open(&mut self) -> crate::transport::Result<()> {
            if self.settings.is_none() {
                return Err(TransportError::NotConfigured);
            }
            self.open = true;
            Ok(())
        }

        fn is_open(&self) -> bool {
            self.open
        }
    }

    fn valid_config() -> Value {
        json!({
            "serial": {
                "port": "/dev/cu.usbserial-TEST",
                "baud_rate": 115200,
                "data_bits": 8,
                "parity": "none",
                "stop_bits": 1
            }
        })
    }

    #[test]
    fn test_new_applies_settings_but_stays_closed() {
        let connection = MountConnection::<MockTransport>::new(valid_config());

        assert!(connection.validation().is_valid());
        assert!(!connection.connected());
        let settings = connection.transport().settings.as_ref().unwrap();
        assert_eq!(settings.port, "/dev/cu.usbserial-TEST");
    }

    #[test]
    fn test_invalid_config_leaves_transport_unconfigured() {
        let port = if cfg!(windows) { "COM1" } else { "/dev/ttyUSB0" };
        let config = json!({ "serial": { "port": port } });
        let mut connection = MountConnection::<MockTransport>::new(config);

        assert!(!connection.validation().is_valid());
        assert_eq!(connection.validation().errors().len(), 4);
        assert!(connection.transport().settings.is_none());

        let err = connection.connect().unwrap_err();
        assert!(matches!(
            err,
            crate::mount::MountError::Transport(TransportError::NotConfigured)
        ));
    }

    #[test]
    fn test_adopted_transport_skips_validation_and_mapping() {
        let transport = MockTransport {
            settings: None,
            open: true,
        };
        let connection = MountConnection::with_transport(json!({}), transport);

        assert!(connection.connected());
        assert!(connection.validation().is_valid());
        assert!(connection.transport().settings.is_none());
    }

    #[test]
    fn test_polar_aligned_independent_of_connection_state() {
        let mut connection = MountConnection::<MockTransport>::new(valid_config());

        assert!(!connection.polar_aligned());
        connection.set_polar_aligned(true);
        assert!(connection.polar_aligned());
        assert!(!connection.connected());
    }
}
