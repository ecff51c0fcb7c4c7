//! Human-readable amounts to token base units.

use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::{Address, U256};

use crate::link::types::{LinkError, LinkResult};

/// Decimals of the chain's native asset.
pub const NATIVE_DECIMALS: u8 = 18;

/// The zero address stands for the native asset.
pub fn is_native(token: Address) -> bool {
    token == Address::ZERO
}

/// Convert a decimal string such as `"1.5"` into base units.
///
/// The amount must be exactly representable: fractional digits beyond
/// `decimals` are an error, not truncated. Zero is rejected.
pub fn to_base_units(amount: &str, decimals: u8) -> LinkResult<U256> {
    let invalid = |reason: String| LinkError::InvalidAmount {
        amount: amount.to_string(),
        reason,
    };

    // Trailing fractional zeros carry no value; anything else past
    // `decimals` would be truncated by `parse_units`.
    let trimmed = amount.trim();
    let normalized = match trimmed.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.len() > decimals as usize {
                return Err(invalid(format!("more than {} decimal places", decimals)));
            }
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => trimmed.to_string(),
    };

    let value = match parse_units(&normalized, decimals).map_err(|e| invalid(e.to_string()))? {
        ParseUnits::U256(value) => value,
        ParseUnits::I256(_) => return Err(invalid("amount must not be negative".to_string())),
    };

    if value.is_zero() {
        return Err(invalid("amount must be greater than zero".to_string()));
    }
    Ok(value)
}
