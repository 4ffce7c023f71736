//! Lenient UTF-8 helpers shared by the codec and the chunk sampler.

/// Bytes treated as chunk boundaries: space, tab, newline and carriage return.
pub const WHITESPACE_BYTES: [u8; 4] = [b' ', b'\t', b'\n', b'\r'];

/// Returns true if `byte` is one of [`WHITESPACE_BYTES`].
#[inline]
pub fn is_whitespace_byte(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Decode `bytes` as UTF-8, dropping every invalid sequence.
///
/// Unlike [`String::from_utf8_lossy`] no replacement character is inserted,
/// so a multi-byte character cut at either end of a slice simply vanishes.
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Returns true for characters stripped from chunk edges: Unicode whitespace
/// plus the ASCII information separators `\x1c..=\x1f`.
#[inline]
pub fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Strip leading and trailing [`is_strippable`] characters.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(is_strippable)
}
