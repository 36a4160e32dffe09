// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AddressError {
    MissingPrefix,
    BadLength(usize),
    NonHex,
}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPrefix => write!(f, "address must start with 0x"),
            Self::BadLength(n) => write!(f, "address must have 40 hex digits, got {n}"),
            Self::NonHex => write!(f, "address contains non-hex digits"),
        }
    }
}

impl std::error::Error for AddressError {}

/// A 20-byte account address, stored lowercase with its `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let s = input.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(AddressError::MissingPrefix)?;
        if digits.len() != 40 {
            return Err(AddressError::BadLength(digits.len()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressError::NonHex);
        }
        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_ADDRESS
    }

    /// The 20 raw bytes, most significant first.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut out = [0_u8; 20];
        // `parse` and `from_bytes` only ever store 40 hex digits.
        let _ = hex::decode_to_slice(&self.0[2..], &mut out);
        out
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }
}

impl Display for WalletAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WalletAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_roundtrips_bytes() {
        let addr = WalletAddress::parse("0xAbCdEf0123456789aBcDeF0123456789AbCdEf01").expect("addr");
        assert_eq!(addr.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
        assert_eq!(WalletAddress::from_bytes(addr.to_bytes()), addr);
    }

    #[test]
    fn bytes_follow_digit_order() {
        let addr = WalletAddress::parse("0x00000000000000000000000000000000000000Ff").expect("addr");
        let bytes = addr.to_bytes();
        assert_eq!(bytes[19], 0xff);
        assert!(bytes[..19].iter().all(|b| *b == 0));
        let mut raw = [0_u8; 20];
        raw[0] = 0xab;
        raw[19] = 0x01;
        assert_eq!(
            WalletAddress::from_bytes(raw).as_str(),
            "0xab00000000000000000000000000000000000001"
        );
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        assert_eq!(WalletAddress::parse("abc"), Err(AddressError::MissingPrefix));
        assert_eq!(WalletAddress::parse("0xA"), Err(AddressError::BadLength(1)));
        assert_eq!(
            WalletAddress::parse("0xzz00000000000000000000000000000000000000"),
            Err(AddressError::NonHex)
        );
        assert!(WalletAddress::parse(ZERO_ADDRESS).expect("zero").is_zero());
    }
}
