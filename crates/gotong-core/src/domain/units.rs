// SPDX-License-Identifier: Apache-2.0

//! Exact conversion between decimal ether strings and integer wei.

use std::fmt;

pub const ETHER_DECIMALS: u32 = 18;
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    Empty,
    Negative,
    InvalidCharacter(char),
    TooManyDecimals { max: u32 },
    Overflow,
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "amount must not be empty"),
            Self::Negative => write!(f, "amount must not be negative"),
            Self::InvalidCharacter(c) => write!(f, "invalid character `{c}` in amount"),
            Self::TooManyDecimals { max } => {
                write!(f, "amount has more than {max} decimal places")
            }
            Self::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for UnitError {}

/// Parses a decimal ether amount (`"0.5"`, `"1"`, `".25"`) into wei.
pub fn to_wei(input: &str) -> Result<u128, UnitError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(UnitError::Empty);
    }
    if s.starts_with('-') {
        return Err(UnitError::Negative);
    }
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(UnitError::Empty);
    }
    if let Some(bad) = int_part
        .chars()
        .chain(frac_part.chars())
        .find(|c| !c.is_ascii_digit())
    {
        return Err(UnitError::InvalidCharacter(bad));
    }
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.len() > ETHER_DECIMALS as usize {
        return Err(UnitError::TooManyDecimals {
            max: ETHER_DECIMALS,
        });
    }

    let mut whole: u128 = 0;
    for d in int_part.bytes() {
        whole = whole
            .checked_mul(10)
            .and_then(|w| w.checked_add(u128::from(d - b'0')))
            .ok_or(UnitError::Overflow)?;
    }
    let mut frac: u128 = 0;
    for d in frac_part.bytes() {
        frac = frac * 10 + u128::from(d - b'0');
    }
    frac *= 10_u128.pow(ETHER_DECIMALS - frac_part.len() as u32);

    whole
        .checked_mul(WEI_PER_ETHER)
        .and_then(|w| w.checked_add(frac))
        .ok_or(UnitError::Overflow)
}

/// Renders wei as a decimal ether string without trailing zeros.
#[must_use]
pub fn to_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let frac = wei % WEI_PER_ETHER;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:018}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// `collected / target` as a float; `0.0` when the target is zero.
#[must_use]
pub fn ether_ratio(collected_wei: u128, target_wei: u128) -> f64 {
    if target_wei == 0 {
        return 0.0;
    }
    collected_wei as f64 / target_wei as f64
}
