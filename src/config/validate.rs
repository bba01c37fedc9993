use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::transport::{DataBits, Parity, StopBits};

// Prefix matches: trailing characters after the expected form are tolerated.
static UNIX_PORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/dev/[A-Za-z0-9-]+").unwrap());
static WIN_PORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^COM[1-9]").unwrap());

/// Required keys of the `serial` section, in check order. Validation errors
/// are reported in this order, one message per failing key per pass.
pub const REQUIRED_SERIAL_KEYS: [&str; 5] =
    ["port", "baud_rate", "data_bits", "stop_bits", "parity"];

/// Accepted parity tokens in declaration order. The failure message
/// enumerates the first column verbatim.
pub const PARITY_TOKENS: [(&str, Parity); 12] = [
    ("e", Parity::Even),
    ("E", Parity::Even),
    ("even", Parity::Even),
    ("Even", Parity::Even),
    ("n", Parity::None),
    ("N", Parity::None),
    ("none", Parity::None),
    ("None", Parity::None),
    ("o", Parity::Odd),
    ("O", Parity::Odd),
    ("odd", Parity::Odd),
    ("Odd", Parity::Odd),
];

pub(crate) const DATA_BITS_MAP: [(i64, DataBits); 4] = [
    (5, DataBits::Five),
    (6, DataBits::Six),
    (7, DataBits::Seven),
    (8, DataBits::Eight),
];

pub(crate) const STOP_BITS_MAP: [(f64, StopBits); 3] = [
    (1.0, StopBits::One),
    (1.5, StopBits::OneAndHalf),
    (2.0, StopBits::Two),
];

const BAUD_RATE_MIN: i64 = 9600;
const BAUD_RATE_MAX: i64 = 230400;

/// Host platform identifier, as consulted during port-format validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "linux" => Platform::Linux,
            "macos" => Platform::Darwin,
            "windows" => Platform::Windows,
            _ => Platform::Other,
        }
    }
}

/// Outcome of one validation pass. Valid exactly when no error message was
/// emitted; messages keep the order of `REQUIRED_SERIAL_KEYS`.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Validate a mount serial configuration against the host platform.
///
/// Pure apart from the platform read; never fails, always returns a report
/// aggregating every rule violation found in this pass.
pub fn validate_config(config: &Value) -> ValidationReport {
    validate_config_for(config, Platform::current())
}

/// Validate against an explicit platform identifier.
pub fn validate_config_for(config: &Value, platform: Platform) -> ValidationReport {
    let empty = Map::new();
    let serial = config
        .get("serial")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let mut errors = Vec::new();
    for key in REQUIRED_SERIAL_KEYS {
        let Some(value) = serial.get(key) else {
            errors.push(format!("Key: {key} missing from mount serial config"));
            continue;
        };

        match key {
            "port" => check_port(value, platform, &mut errors),
            "baud_rate" => check_baud_rate(value, &mut errors),
            "data_bits" => check_data_bits(value, &mut errors),
            "stop_bits" => check_stop_bits(value, &mut errors),
            "parity" => check_parity(value, &mut errors),
            _ => unreachable!(),
        }
    }

    ValidationReport::from_errors(errors)
}

fn check_port(value: &Value, platform: Platform, errors: &mut Vec<String>) {
    // A non-string port never matches either pattern.
    let text = value.as_str().unwrap_or_default();
    match platform {
        Platform::Linux | Platform::Darwin if !UNIX_PORT_RE.is_match(text) => {
            errors.push(format!(
                "Mount serial port wrong format, expected '/dev/XXX' but was '{}'",
                display_value(value)
            ));
        }
        Platform::Windows if !WIN_PORT_RE.is_match(text) => {
            errors.push(format!(
                "Mount serial port wrong format, expected 'COM<n>' but was '{}'",
                display_value(value)
            ));
        }
        // Unknown platforms carry no port-format expectation.
        _ => {}
    }
}

fn check_baud_rate(value: &Value, errors: &mut Vec<String>) {
    // as_i64 is None for floats and booleans, which enforces the strict
    // integer rule (10000.0 and true are rejected outright).
    let ok = matches!(value.as_i64(), Some(rate) if (BAUD_RATE_MIN..=BAUD_RATE_MAX).contains(&rate));
    if !ok {
        errors.push(format!(
            "Mount serial baud_rate must be an int between {BAUD_RATE_MIN} and {BAUD_RATE_MAX} inclusive"
        ));
    }
}

fn check_data_bits(value: &Value, errors: &mut Vec<String>) {
    let ok = matches!(value.as_i64(), Some(bits) if DATA_BITS_MAP.iter().any(|(b, _)| *b == bits));
    if !ok {
        errors.push("Mount serial data_bits must be an int between 5 and 8 inclusive".to_string());
    }
}

fn check_stop_bits(value: &Value, errors: &mut Vec<String>) {
    // Numeric equality: 1.0 and 2.0 pass like 1 and 2. Booleans and strings
    // have no numeric value and fail.
    let ok = matches!(value.as_f64(), Some(bits) if STOP_BITS_MAP.iter().any(|(b, _)| *b == bits));
    if !ok {
        errors.push(format!(
            "Mount serial stop_bits must be one of [{}] but was '{}'",
            stop_bits_list(),
            display_value(value)
        ));
    }
}

fn check_parity(value: &Value, errors: &mut Vec<String>) {
    let ok = matches!(value.as_str(), Some(token) if PARITY_TOKENS.iter().any(|(t, _)| *t == token));
    if !ok {
        let tokens: Vec<&str> = PARITY_TOKENS.iter().map(|(t, _)| *t).collect();
        errors.push(format!(
            "Mount serial parity must be one of [{}] but was '{}'",
            tokens.join(","),
            display_value(value)
        ));
    }
}

/// Render a config value for an error message: strings bare, everything else
/// as its JSON form.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn stop_bits_list() -> String {
    STOP_BITS_MAP
        .iter()
        .map(|(bits, _)| {
            if bits.fract() == 0.0 {
                format!("{}", *bits as i64)
            } else {
                bits.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
