//! Picon file names and lookup keys for the supported receiver platforms.
//!
//! Enigma2 picons are named after the full service reference, so the name is
//! looked up from a table keyed by `SID:ONID:NAMESPACE`. Neutrino picons are
//! named directly from transport id, network id and service id.
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

use thiserror::Error;

use crate::position::normalize_position;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("position has no degrees: {0:?}")]
    InvalidPosition(String),
    #[error("network id {0:?} has no frequency part")]
    MissingFrequency(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    #[default]
    Enigma2,
    Neutrino,
    /// Receivers without a namespace scheme: `<service id>.png`.
    Plain,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Enigma2 => write!(f, "enigma2"),
            Platform::Neutrino => write!(f, "neutrino"),
            Platform::Plain => write!(f, "plain"),
        }
    }
}

/// Read-only map from Enigma2 picon keys to existing file names.
pub trait LookupTable: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<S: BuildHasher + Send + Sync> LookupTable for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// A table that never matches.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyLookup;

impl LookupTable for EmptyLookup {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Identifiers of one picon, as they come off the listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiconIdentity<'a> {
    pub service_id: &'a str,
    /// `<onid>` or `<onid>::<frequency>` for single channels.
    pub network_id: &'a str,
    /// Orbital position as listed, e.g. `192E`; only Enigma2 package names use it.
    pub position: &'a str,
    pub single_channel: bool,
}

/// Target name for a picon, or `None` when an Enigma2 key has no entry.
pub fn synthesize_name(
    identity: &PiconIdentity<'_>,
    platform: Platform,
    lookup: &dyn LookupTable,
) -> Result<Option<String>, NamingError> {
    let network = network_number(identity.network_id);

    match platform {
        Platform::Enigma2 => {
            let namespace = namespace(
                identity.network_id,
                identity.position,
                identity.single_channel,
            )?;
            let key = enigma2_key(identity.service_id, network, &namespace)?;
            Ok(lookup.lookup(&key))
        }
        Platform::Neutrino => {
            let tr_id = parse_hex("transport id", transport_digits(identity.service_id))?;
            let on_id = parse_decimal("network id", network)?;
            let service_id = parse_decimal("service id", identity.service_id)?;
            Ok(Some(neutrino_file_name(tr_id, on_id, service_id)))
        }
        Platform::Plain => Ok(Some(format!("{}.png", identity.service_id))),
    }
}

/// Namespace part of an Enigma2 key, in upper-case hex.
pub fn namespace(
    network_id: &str,
    position: &str,
    single_channel: bool,
) -> Result<String, NamingError> {
    if single_channel {
        let (on_id, freq) = network_id
            .trim()
            .split_once("::")
            .ok_or_else(|| NamingError::MissingFrequency(network_id.to_string()))?;
        let on_id = parse_decimal("network id", on_id)?;
        let freq = parse_decimal("frequency", freq)?;
        Ok(format!("{on_id:X}{freq:X}"))
    } else {
        let seed = normalize_position(position)?;
        Ok(format!("{seed:X}0000"))
    }
}

pub fn enigma2_key(
    service_id: &str,
    network_id: &str,
    namespace: &str,
) -> Result<String, NamingError> {
    let service_id = parse_decimal("service id", service_id)?;
    let network_id = parse_decimal("network id", network_id)?;
    Ok(format!("{service_id:X}:{network_id:X}:{namespace}"))
}

pub fn neutrino_file_name(tr_id: u32, on_id: u32, service_id: u32) -> String {
    format!("{tr_id:x}{on_id:04x}{service_id:04x}.png")
}

/// Numeric part of a network id, without any `::<frequency>` suffix.
pub fn network_number(network_id: &str) -> &str {
    match network_id.split_once("::") {
        Some((on_id, _)) => on_id,
        None => network_id,
    }
}

// Short ids drop their last two digits, longer ones keep the first two.
fn transport_digits(service_id: &str) -> &str {
    let len = service_id.len();
    let end = if len < 4 { len.saturating_sub(2) } else { 2 };
    service_id.get(..end).unwrap_or("")
}

fn parse_decimal(field: &'static str, value: &str) -> Result<u32, NamingError> {
    value
        .trim()
        .parse()
        .map_err(|_| NamingError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_hex(field: &'static str, value: &str) -> Result<u32, NamingError> {
    u32::from_str_radix(value.trim(), 16).map_err(|_| NamingError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{network_number, transport_digits};

    #[test]
    fn transport_digits_follow_length_rule() {
        assert_eq!(transport_digits("1101"), "11");
        assert_eq!(transport_digits("28011"), "28");
        assert_eq!(transport_digits("123"), "1");
        assert_eq!(transport_digits("12"), "");
        assert_eq!(transport_digits("7"), "");
    }

    #[test]
    fn network_number_strips_frequency() {
        assert_eq!(network_number("1::11778"), "1");
        assert_eq!(network_number("133"), "133");
    }
}
