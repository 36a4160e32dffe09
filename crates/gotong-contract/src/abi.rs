// SPDX-License-Identifier: Apache-2.0

//! Solidity ABI head/tail codec for the crowdfunding contract.
//!
//! Only the shapes the contract uses are supported: addresses, unsigned
//! integers that fit in 128 bits, strings, arrays and tuples. Decoding is
//! bounds-checked word by word and never trusts a length it has not seen.

use gotong_model::{RawCampaign, WalletAddress};

use crate::error::ContractError;
use crate::Donations;

const WORD: usize = 32;

pub const SELECTOR_GET_CAMPAIGNS: [u8; 4] = [0xa6, 0xb0, 0x36, 0x33];
pub const SELECTOR_CAMPAIGNS: [u8; 4] = [0x14, 0x19, 0x61, 0xbc];
pub const SELECTOR_GET_DONATORS: [u8; 4] = [0x0f, 0xa9, 0x1f, 0xa9];
pub const SELECTOR_NUMBER_OF_CAMPAIGNS: [u8; 4] = [0x07, 0xca, 0x14, 0x0d];
pub const SELECTOR_CREATE_CAMPAIGN: [u8; 4] = [0x99, 0x43, 0xe3, 0xa1];
pub const SELECTOR_DONATE_TO_CAMPAIGN: [u8; 4] = [0x42, 0xa4, 0xfd, 0xa8];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(WalletAddress),
    Uint(u128),
    String(String),
    Array(Vec<Token>),
    Tuple(Vec<Token>),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        match self {
            Self::Address(_) | Self::Uint(_) => false,
            Self::String(_) | Self::Array(_) => true,
            Self::Tuple(items) => items.iter().any(Self::is_dynamic),
        }
    }

    fn head_len(&self) -> usize {
        match self {
            Self::Tuple(items) if !self.is_dynamic() => items.iter().map(Self::head_len).sum(),
            _ => WORD,
        }
    }

    fn encode_static(&self, out: &mut Vec<u8>) {
        match self {
            Self::Address(addr) => {
                out.extend_from_slice(&[0u8; 12]);
                out.extend_from_slice(&addr.to_bytes());
            }
            Self::Uint(v) => out.extend_from_slice(&uint_word(*v)),
            Self::Tuple(items) => items.iter().for_each(|t| t.encode_static(out)),
            Self::String(_) | Self::Array(_) => {}
        }
    }

    fn encode_tail(&self, out: &mut Vec<u8>) {
        match self {
            Self::String(s) => {
                let bytes = s.as_bytes();
                out.extend_from_slice(&uint_word(bytes.len() as u128));
                out.extend_from_slice(bytes);
                out.resize(out.len() + padding(bytes.len()), 0);
            }
            Self::Array(items) => {
                out.extend_from_slice(&uint_word(items.len() as u128));
                out.extend(encode_sequence(items));
            }
            Self::Tuple(items) => out.extend(encode_sequence(items)),
            Self::Address(_) | Self::Uint(_) => self.encode_static(out),
        }
    }
}

fn padding(len: usize) -> usize {
    (WORD - len % WORD) % WORD
}

fn uint_word(v: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&v.to_be_bytes());
    word
}

/// Encodes a sequence of tokens as a tuple body.
#[must_use]
pub fn encode_sequence(tokens: &[Token]) -> Vec<u8> {
    let head_len: usize = tokens.iter().map(Token::head_len).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&uint_word((head_len + tail.len()) as u128));
            token.encode_tail(&mut tail);
        } else {
            token.encode_static(&mut head);
        }
    }
    head.extend(tail);
    head
}

#[must_use]
pub fn encode_call(selector: [u8; 4], args: &[Token]) -> Vec<u8> {
    let mut out = selector.to_vec();
    out.extend(encode_sequence(args));
    out
}

#[must_use]
pub fn encode_create_campaign(
    owner: &WalletAddress,
    title: &str,
    description: &str,
    target_wei: u128,
    deadline_secs: u64,
    image: &str,
) -> Vec<u8> {
    encode_call(
        SELECTOR_CREATE_CAMPAIGN,
        &[
            Token::Address(owner.clone()),
            Token::String(title.to_string()),
            Token::String(description.to_string()),
            Token::Uint(target_wei),
            Token::Uint(u128::from(deadline_secs)),
            Token::String(image.to_string()),
        ],
    )
}

struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    fn word(&self, at: usize) -> Result<&'a [u8], ContractError> {
        let end = at
            .checked_add(WORD)
            .ok_or_else(|| ContractError::decode("offset overflow"))?;
        self.data
            .get(at..end)
            .ok_or_else(|| ContractError::decode(format!("word at {at} out of bounds")))
    }

    fn uint(&self, at: usize) -> Result<u128, ContractError> {
        let word = self.word(at)?;
        if word[..16].iter().any(|b| *b != 0) {
            return Err(ContractError::decode(format!(
                "uint256 at {at} exceeds 128 bits"
            )));
        }
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&word[16..]);
        Ok(u128::from_be_bytes(buf))
    }

    fn u64(&self, at: usize) -> Result<u64, ContractError> {
        u64::try_from(self.uint(at)?)
            .map_err(|_| ContractError::decode(format!("value at {at} exceeds 64 bits")))
    }

    /// Offsets and lengths must at least point inside the payload.
    fn position(&self, at: usize) -> Result<usize, ContractError> {
        let v = usize::try_from(self.uint(at)?)
            .map_err(|_| ContractError::decode("offset does not fit in memory"))?;
        if v > self.data.len() {
            return Err(ContractError::decode(format!(
                "offset {v} beyond payload of {} bytes",
                self.data.len()
            )));
        }
        Ok(v)
    }

    fn relative(&self, base: usize, at: usize) -> Result<usize, ContractError> {
        base.checked_add(self.position(at)?)
            .ok_or_else(|| ContractError::decode("offset overflow"))
    }

    fn address(&self, at: usize) -> Result<String, ContractError> {
        let word = self.word(at)?;
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&word[12..]);
        Ok(WalletAddress::from_bytes(bytes).as_str().to_string())
    }

    fn string(&self, at: usize) -> Result<String, ContractError> {
        let len = self.position(at)?;
        let start = at + WORD;
        let bytes = start
            .checked_add(len)
            .and_then(|end| self.data.get(start..end))
            .ok_or_else(|| ContractError::decode(format!("string at {at} out of bounds")))?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn array<T>(
        &self,
        at: usize,
        mut element: impl FnMut(usize) -> Result<T, ContractError>,
    ) -> Result<Vec<T>, ContractError> {
        let len = self.position(at)?;
        let mut out = Vec::new();
        for i in 0..len {
            let slot = i
                .checked_mul(WORD)
                .and_then(|o| o.checked_add(at + WORD))
                .ok_or_else(|| ContractError::decode("array overflow"))?;
            out.push(element(slot)?);
        }
        Ok(out)
    }

    fn addresses(&self, at: usize) -> Result<Vec<String>, ContractError> {
        self.array(at, |slot| self.address(slot))
    }

    fn uints(&self, at: usize) -> Result<Vec<u128>, ContractError> {
        self.array(at, |slot| self.uint(slot))
    }

    /// A campaign struct with its dynamic fields addressed relative to `base`.
    fn campaign(&self, base: usize, with_donations: bool) -> Result<RawCampaign, ContractError> {
        let head = |i: usize| base + i * WORD;
        let mut campaign = RawCampaign {
            owner: Some(self.address(head(0))?),
            title: Some(self.string(self.relative(base, head(1))?)?),
            description: Some(self.string(self.relative(base, head(2))?)?),
            target: Some(self.uint(head(3))?),
            deadline: Some(self.u64(head(4))?),
            amount_collected: Some(self.uint(head(5))?),
            image: Some(self.string(self.relative(base, head(6))?)?),
            donators: None,
            donations: None,
        };
        if with_donations {
            campaign.donators = Some(self.addresses(self.relative(base, head(7))?)?);
            campaign.donations = Some(self.uints(self.relative(base, head(8))?)?);
        }
        Ok(campaign)
    }
}

/// Decodes `getCampaigns()`. Empty return data means the call produced no
/// usable payload.
pub fn decode_campaigns(data: &[u8]) -> Result<Option<Vec<RawCampaign>>, ContractError> {
    if data.is_empty() {
        return Ok(None);
    }
    let r = Reader { data };
    let array = r.position(0)?;
    let elements = array + WORD;
    let campaigns = r.array(array, |slot| r.campaign(r.relative(elements, slot)?, true))?;
    Ok(Some(campaigns))
}

/// Decodes the `campaigns(uint256)` getter, which omits the donation arrays.
pub fn decode_campaign(data: &[u8]) -> Result<RawCampaign, ContractError> {
    Reader { data }.campaign(0, false)
}

pub fn decode_donators(data: &[u8]) -> Result<Donations, ContractError> {
    let r = Reader { data };
    Ok(Donations {
        donators: r.addresses(r.position(0)?)?,
        amounts: r.uints(r.position(WORD)?)?,
    })
}

pub fn decode_u64(data: &[u8]) -> Result<u64, ContractError> {
    Reader { data }.u64(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContractErrorKind;

    fn addr(last: u8) -> WalletAddress {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        WalletAddress::from_bytes(bytes)
    }

    fn campaign_tuple(title: &str, donators: &[(u8, u128)]) -> Token {
        Token::Tuple(vec![
            Token::Address(addr(0xaa)),
            Token::String(title.to_string()),
            Token::String("deskripsi".to_string()),
            Token::Uint(2_000_000_000_000_000_000),
            Token::Uint(1_800_000_000),
            Token::Uint(donators.iter().map(|(_, v)| v).sum()),
            Token::String("https://example.com/x.png".to_string()),
            Token::Array(donators.iter().map(|(a, _)| Token::Address(addr(*a))).collect()),
            Token::Array(donators.iter().map(|(_, v)| Token::Uint(*v)).collect()),
        ])
    }

    #[test]
    fn create_campaign_calldata_layout() {
        let data = encode_create_campaign(&addr(1), "a", "bc", 5, 7, "");
        assert_eq!(&data[..4], &SELECTOR_CREATE_CAMPAIGN);
        let body = &data[4..];
        let r = Reader { data: body };
        assert_eq!(r.address(0).expect("owner"), addr(1).as_str());
        assert_eq!(r.position(WORD).expect("title offset"), 6 * WORD);
        assert_eq!(r.position(2 * WORD).expect("desc offset"), 8 * WORD);
        assert_eq!(r.uint(3 * WORD).expect("target"), 5);
        assert_eq!(r.uint(4 * WORD).expect("deadline"), 7);
        assert_eq!(r.position(5 * WORD).expect("image offset"), 10 * WORD);
        assert_eq!(r.string(6 * WORD).expect("title"), "a");
        assert_eq!(r.string(8 * WORD).expect("desc"), "bc");
        assert_eq!(r.string(10 * WORD).expect("image"), "");
        assert_eq!(body.len(), 11 * WORD);
    }

    #[test]
    fn decodes_campaign_list_payload() {
        let payload = encode_sequence(&[Token::Array(vec![
            campaign_tuple("Sumur", &[(1, 10), (2, 20)]),
            campaign_tuple("Sekolah", &[]),
        ])]);
        let list = decode_campaigns(&payload).expect("decode").expect("payload");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title.as_deref(), Some("Sumur"));
        assert_eq!(list[0].amount_collected, Some(30));
        assert_eq!(list[0].donations, Some(vec![10, 20]));
        assert_eq!(
            list[0].donators.as_ref().map(|d| d[1].clone()),
            Some(addr(2).as_str().to_string())
        );
        assert_eq!(list[1].title.as_deref(), Some("Sekolah"));
        assert_eq!(list[1].donators, Some(Vec::new()));
        assert_eq!(list[1].deadline, Some(1_800_000_000));
    }

    #[test]
    fn empty_return_data_is_no_payload() {
        assert_eq!(decode_campaigns(&[]).expect("empty"), None);
    }

    #[test]
    fn single_campaign_getter_has_no_arrays() {
        let payload = encode_sequence(&[
            Token::Address(addr(3)),
            Token::String("t".to_string()),
            Token::String("d".to_string()),
            Token::Uint(9),
            Token::Uint(10),
            Token::Uint(11),
            Token::String("i".to_string()),
        ]);
        let c = decode_campaign(&payload).expect("decode");
        assert_eq!(c.owner.as_deref(), Some(addr(3).as_str()));
        assert_eq!((c.target, c.deadline, c.amount_collected), (Some(9), Some(10), Some(11)));
        assert_eq!(c.image.as_deref(), Some("i"));
        assert_eq!(c.donators, None);
    }

    #[test]
    fn donators_decode_as_parallel_arrays() {
        let payload = encode_sequence(&[
            Token::Array(vec![Token::Address(addr(4)), Token::Address(addr(5))]),
            Token::Array(vec![Token::Uint(1), Token::Uint(2)]),
        ]);
        let d = decode_donators(&payload).expect("decode");
        assert_eq!(d.donators.len(), 2);
        assert_eq!(d.amounts, vec![1, 2]);
    }

    #[test]
    fn oversized_uint_is_a_decode_error() {
        let mut payload = vec![0u8; WORD];
        payload[0] = 1;
        let err = decode_u64(&payload).expect_err("too wide");
        assert_eq!(err.kind, ContractErrorKind::Decode);
    }

    #[test]
    fn truncated_payloads_never_panic() {
        let payload = encode_sequence(&[Token::Array(vec![campaign_tuple("x", &[(1, 1)])])]);
        for cut in 1..payload.len() {
            let _ = decode_campaigns(&payload[..cut]);
        }
        let mut huge_len = uint_word(WORD as u128).to_vec();
        huge_len.extend_from_slice(&[0xff; WORD]);
        assert!(decode_campaigns(&huge_len).is_err());
    }
}
