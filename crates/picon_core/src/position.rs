use crate::naming::NamingError;

/// Full circle on the decipoint scale used by receiver namespaces.
pub const FULL_CIRCLE: u32 = 3600;

/// Orbital position (`19.2E`, `192E`, `30W`) to namespace seed.
///
/// Only the digits count, so `19.2E` and `192E` both give `192`.
/// West positions are complemented: `30W` gives `3570`.
pub fn normalize_position(position: &str) -> Result<u32, NamingError> {
    let position = position.trim();
    let digits: String = position.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(NamingError::InvalidPosition(position.to_string()));
    }
    let degrees: u32 = digits
        .parse()
        .map_err(|_| NamingError::InvalidPosition(position.to_string()))?;

    if position.ends_with('W') {
        Ok(FULL_CIRCLE.saturating_sub(degrees))
    } else {
        Ok(degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_position;
    use crate::NamingError;

    #[test]
    fn east_positions_keep_their_digits() {
        assert_eq!(normalize_position("13E"), Ok(13));
        assert_eq!(normalize_position("0E"), Ok(0));
        assert_eq!(normalize_position("19.2E"), Ok(192));
    }

    #[test]
    fn west_positions_are_complemented() {
        assert_eq!(normalize_position("19W"), Ok(3581));
        assert_eq!(normalize_position("300W"), Ok(3300));
    }

    #[test]
    fn position_without_digits_is_rejected() {
        assert_eq!(
            normalize_position("W"),
            Err(NamingError::InvalidPosition("W".to_string()))
        );
        assert!(normalize_position("").is_err());
    }
}
