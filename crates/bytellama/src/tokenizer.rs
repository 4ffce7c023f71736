//! # Octet Tokenizer
//!
//! A non-trainable tokenizer that encodes text as its UTF-8 octets.
//!
//! ## Token layout
//!
//! ```text
//!   0         PAD
//!   1         BOS
//!   2         EOS
//!   3..=258   raw bytes 0x00..=0xFF (byte + OFFSET)
//!   259..=386 reserved supplementary tokens
//! ```
//!
//! The supplementary range is never produced by [`encode`] and is dropped by
//! [`decode`]; it only widens the model's embedding table.

use crate::utf8::decode_ignoring_invalid;

/// Token identifier in the ByteLlama vocabulary
pub type TokenId = u32;

pub const PAD_ID: TokenId = 0;
pub const BOS_ID: TokenId = 1;
pub const EOS_ID: TokenId = 2;
/// byte 0x00 → token 3, ..., 0xFF → token 258
pub const OFFSET: TokenId = 3;
pub const SUPPLEMENTARY_OFFSET: TokenId = OFFSET + 256;
pub const SUPPLEMENTARY_TOKENS: TokenId = 128;
/// Total vocabulary size: control tokens, byte tokens and supplementary slots
pub const VOCAB_SIZE: usize = (SUPPLEMENTARY_OFFSET + SUPPLEMENTARY_TOKENS) as usize;

/// Encode text into token IDs.
///
/// Each UTF-8 byte `b` becomes `b + OFFSET`. BOS is prepended and EOS
/// appended when requested. No length limit is applied; see [`truncate`].
pub fn encode(text: &str, add_bos: bool, add_eos: bool) -> Vec<TokenId> {
    let mut tokens = Vec::with_capacity(text.len() + add_bos as usize + add_eos as usize);
    if add_bos {
        tokens.push(BOS_ID);
    }
    tokens.extend(text.bytes().map(|b| TokenId::from(b) + OFFSET));
    if add_eos {
        tokens.push(EOS_ID);
    }
    tokens
}

/// Decode token IDs into text.
///
/// Accepts any integer type so that untrusted model output (negative values,
/// IDs past the vocabulary) can be passed straight through. Only content IDs
/// in `OFFSET..SUPPLEMENTARY_OFFSET` are kept; the resulting bytes are decoded
/// with invalid UTF-8 sequences dropped.
pub fn decode<T>(ids: &[T]) -> String
where
    T: Copy + TryInto<TokenId>,
{
    let bytes: Vec<u8> = ids
        .iter()
        .filter_map(|&id| id.try_into().ok())
        .filter(|id| (OFFSET..SUPPLEMENTARY_OFFSET).contains(id))
        .map(|id| (id - OFFSET) as u8)
        .collect();
    decode_ignoring_invalid(&bytes)
}

/// Returns true if `id` encodes a raw byte.
#[inline]
pub fn is_content_id(id: TokenId) -> bool {
    (OFFSET..SUPPLEMENTARY_OFFSET).contains(&id)
}

/// Truncate a token sequence to at most `max_len` tokens.
///
/// When `eos_id` is given and tokens were cut, the last kept token is replaced
/// with it so the sequence still terminates.
///
/// A sequence that already fits is returned unchanged even when it does not
/// end in `eos_id`; EOS is only forced onto sequences that were cut. A
/// `max_len` of zero yields an empty sequence.
pub fn truncate(tokens: &[TokenId], max_len: usize, eos_id: Option<TokenId>) -> Vec<TokenId> {
    let mut truncated: Vec<TokenId> = tokens.iter().take(max_len).copied().collect();
    if tokens.len() > max_len {
        if let (Some(eos), Some(last)) = (eos_id, truncated.last_mut()) {
            *last = eos;
        }
    }
    truncated
}

/// Byte-level tokenizer with fixed special tokens.
///
/// # Example
///
/// ```
/// use bytellama::OctetTokenizer;
///
/// let tokenizer = OctetTokenizer::new();
/// let ids = tokenizer.encode("A", true, true);
/// assert_eq!(ids, vec![1, 68, 2]);
/// assert_eq!(tokenizer.decode(&ids), "A");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OctetTokenizer {
    /// Upper bound applied by [`OctetTokenizer::tokenize`]
    pub max_seq_len: Option<usize>,
}

impl OctetTokenizer {
    pub const PAD_ID: TokenId = PAD_ID;
    pub const BOS_ID: TokenId = BOS_ID;
    pub const EOS_ID: TokenId = EOS_ID;

    pub fn new() -> Self {
        Self { max_seq_len: None }
    }

    /// Create a tokenizer whose [`tokenize`](Self::tokenize) output is capped
    pub fn with_max_seq_len(max_seq_len: usize) -> Self {
        Self {
            max_seq_len: Some(max_seq_len),
        }
    }

    pub fn pad_id(&self) -> TokenId {
        PAD_ID
    }

    pub fn bos_id(&self) -> TokenId {
        BOS_ID
    }

    pub fn eos_id(&self) -> TokenId {
        EOS_ID
    }

    pub fn vocab_size(&self) -> usize {
        VOCAB_SIZE
    }

    /// See [`encode`].
    pub fn encode(&self, text: &str, add_bos: bool, add_eos: bool) -> Vec<TokenId> {
        encode(text, add_bos, add_eos)
    }

    /// See [`decode`].
    pub fn decode<T>(&self, ids: &[T]) -> String
    where
        T: Copy + TryInto<TokenId>,
    {
        decode(ids)
    }

    /// Encode a training example with BOS/EOS, truncated to `max_seq_len`.
    pub fn tokenize(&self, text: &str) -> Vec<TokenId> {
        let tokens = encode(text, true, true);
        match self.max_seq_len {
            Some(max_len) => truncate(&tokens, max_len, Some(EOS_ID)),
            None => tokens,
        }
    }
}
