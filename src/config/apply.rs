use serde_json::Value;

use super::validate::{DATA_BITS_MAP, PARITY_TOKENS, STOP_BITS_MAP};
use super::{ConfigError, Result};
use crate::transport::PortSettings;

/// Map a validated configuration onto typed port settings.
///
/// Port and baud rate are copied verbatim; data bits, stop bits and parity
/// go through the fixed lookup tables. Callers must validate first — an
/// unvalidated configuration surfaces here as an error rather than a
/// half-applied parameter set.
pub fn port_settings(config: &Value) -> Result<PortSettings> {
    let serial = config
        .get("serial")
        .and_then(Value::as_object)
        .ok_or_else(|| ConfigError::MissingKey("serial".to_string()))?;

    let port = serial
        .get("port")
        .and_then(Value::as_str)
        .ok_or_else(|| unmappable("port", serial.get("port")))?
        .to_string();

    let baud_rate = serial
        .get("baud_rate")
        .and_then(Value::as_i64)
        .and_then(|rate| u32::try_from(rate).ok())
        .ok_or_else(|| unmappable("baud_rate", serial.get("baud_rate")))?;

    let data_bits = serial
        .get("data_bits")
        .and_then(Value::as_i64)
        .and_then(|bits| {
            DATA_BITS_MAP
                .iter()
                .find(|(b, _)| *b == bits)
                .map(|(_, mapped)| *mapped)
        })
        .ok_or_else(|| unmappable("data_bits", serial.get("data_bits")))?;

    let stop_bits = serial
        .get("stop_bits")
        .and_then(Value::as_f64)
        .and_then(|bits| {
            STOP_BITS_MAP
                .iter()
                .find(|(b, _)| *b == bits)
                .map(|(_, mapped)| *mapped)
        })
        .ok_or_else(|| unmappable("stop_bits", serial.get("stop_bits")))?;

    let parity = serial
        .get("parity")
        .and_then(Value::as_str)
        .and_then(|token| {
            PARITY_TOKENS
                .iter()
                .find(|(t, _)| *t == token)
                .map(|(_, mapped)| *mapped)
        })
        .ok_or_else(|| unmappable("parity", serial.get("parity")))?;

    Ok(PortSettings {
        port,
        baud_rate,
        data_bits,
        stop_bits,
        parity,
    })
}

fn unmappable(field: &str, value: Option<&Value>) -> ConfigError {
    match value {
        Some(value) => ConfigError::Unmappable {
            field: field.to_string(),
            value: value.to_string(),
        },
        None => ConfigError::MissingKey(field.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{DataBits, Parity, StopBits};
    use serde_json::json;

    #[test]
    fn test_port_settings_maps_tokens_and_copies_scalars() {
        let config = json!({
            "serial": {
                "port": "/dev/ttyUSB0",
                "baud_rate": 115200,
                "data_bits": 7,
                "stop_bits": 1.5,
                "parity": "Odd"
            }
        });

        let settings = port_settings(&config).unwrap();

        assert_eq!(settings.port, "/dev/ttyUSB0");
        assert_eq!(settings.baud_rate, 115200);
        assert_eq!(settings.data_bits, DataBits::Seven);
        assert_eq!(settings.stop_bits, StopBits::OneAndHalf);
        assert_eq!(settings.parity, Parity::Odd);
    }

    #[test]
    fn test_port_settings_missing_section() {
        let err = port_settings(&json!({})).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(key) if key == "serial"));
    }

    #[test]
    fn test_port_settings_missing_key() {
        let config = json!({ "serial": { "port": "/dev/ttyUSB0" } });
        let err = port_settings(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(key) if key == "baud_rate"));
    }

    #[test]
    fn test_port_settings_unmappable_value() {
        let config = json!({
            "serial": {
                "port": "/dev/ttyUSB0",
                "baud_rate": 115200,
                "data_bits": 9,
                "stop_bits": 1,
                "parity": "n"
            }
        });

        let err = port_settings(&config).unwrap_err();

        assert!(
            matches!(err, ConfigError::Unmappable { ref field, ref value } if field == "data_bits" && value == "9")
        );
    }
}
