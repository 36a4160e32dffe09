// SPDX-License-Identifier: Apache-2.0

//! Wei amounts travel as decimal strings so JSON consumers never lose
//! precision on values above 2^53.

use serde::{Deserialize, Deserializer, Serializer};

pub mod wei_string {
    use super::*;

    pub fn serialize<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse::<u128>()
            .map_err(|_| serde::de::Error::custom("wei amount must be a decimal integer string"))
    }
}

pub mod wei_string_vec {
    use super::*;
    use serde::ser::SerializeSeq;

    pub fn serialize<S>(values: &[u128], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for v in values {
            seq.serialize_element(&v.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u128>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| {
                s.trim().parse::<u128>().map_err(|_| {
                    serde::de::Error::custom("wei amount must be a decimal integer string")
                })
            })
            .collect()
    }
}
