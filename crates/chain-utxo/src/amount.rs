use crate::error::UtxoError;

/// Convert a decimal display amount (e.g. `"0.0015"`) to integer base units.
///
/// Accepts an optional integer part and an optional fractional part of at
/// most `decimals` digits. Signs, exponents, separators and excess precision
/// are rejected rather than rounded.
pub fn to_base_units(value: &str, decimals: u8) -> Result<u64, UtxoError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(UtxoError::InvalidAmount("empty amount".into()));
    }

    let (whole, frac) = match value.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (value, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(UtxoError::InvalidAmount(format!("not a number: {value:?}")));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UtxoError::InvalidAmount(format!("not a non-negative decimal: {value:?}")));
    }
    if frac.len() > decimals as usize {
        return Err(UtxoError::InvalidAmount(format!(
            "{value} has more than {decimals} fractional digits"
        )));
    }

    let overflow = || UtxoError::InvalidAmount(format!("{value} exceeds the representable range"));
    let scale = 10u64.checked_pow(decimals as u32).ok_or_else(overflow)?;

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| overflow())?
    };

    let mut frac_units = 0u64;
    for (i, digit) in frac.bytes().enumerate() {
        let place = 10u64.pow(decimals as u32 - 1 - i as u32);
        frac_units += (digit - b'0') as u64 * place;
    }

    whole_units
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac_units))
        .ok_or_else(overflow)
}

/// Render integer base units as a decimal string without trailing zeros.
pub fn format_base_units(units: u64, decimals: u8) -> String {
    if decimals == 0 {
        return units.to_string();
    }
    let scale = 10u128.pow(decimals as u32);
    let whole = units as u128 / scale;
    let frac = units as u128 % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
