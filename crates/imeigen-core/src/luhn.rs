use crate::IMEI_LENGTH;
use crate::error::{Error, Result};

/// Luhn checksum of a digit string, modulo 10.
///
/// Walks the digits from the rightmost position; every digit at an odd
/// zero-indexed position from the right is doubled, and doubled values
/// above 9 are reduced by 9 before being added to the running total.
/// Works on any length >= 1, so it serves both 14-digit check-digit
/// derivation and 15-digit (or ad-hoc) validation. Non-digit input is a
/// contract violation, never coerced.
pub fn luhn_checksum_mod10(digits: &str) -> Result<u32> {
    if digits.is_empty() {
        return Err(Error::InvalidInput("Luhn input is empty".to_string()));
    }

    let mut total = 0u32;
    for (position_from_right, ch) in digits.chars().rev().enumerate() {
        let digit = ch.to_digit(10).ok_or_else(|| {
            Error::InvalidInput(format!("Luhn input contains non-digit character '{ch}'"))
        })?;
        total += if position_from_right % 2 == 1 {
            let doubled = digit * 2;
            if doubled > 9 { doubled - 9 } else { doubled }
        } else {
            digit
        };
    }

    Ok(total % 10)
}

/// Check digit that turns a 14-digit base into a Luhn-valid IMEI.
///
/// Appends a placeholder zero so the same checksum routine reports what
/// digit would zero out the total; `(10 - m) % 10` handles the wraparound
/// when the checksum is already zero.
pub fn calculate_check_digit(first14: &str) -> Result<char> {
    if first14.len() != IMEI_LENGTH - 1 || !first14.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidInput(format!(
            "check digit input must be exactly {} digits, got '{first14}'",
            IMEI_LENGTH - 1
        )));
    }

    let mut padded = String::with_capacity(IMEI_LENGTH);
    padded.push_str(first14);
    padded.push('0');
    let m = luhn_checksum_mod10(&padded)?;
    let check = (10 - m) % 10;
    Ok((b'0' + check as u8) as char)
}

/// Whether `candidate` is a Luhn-valid 15-digit IMEI.
///
/// Total predicate: wrong length, non-digit characters, or a failing
/// checksum all yield `false`, never an error, so it is usable on
/// arbitrary untrusted strings.
pub fn is_valid_imei(candidate: &str) -> bool {
    candidate.len() == IMEI_LENGTH
        && candidate.chars().all(|c| c.is_ascii_digit())
        && matches!(luhn_checksum_mod10(candidate), Ok(0))
}
