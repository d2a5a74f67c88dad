//! Token lists inside a single URL value.
//!
//! Composite parameters join several tokens with schema-configured separator
//! characters. A token may itself contain one of those characters (a set code
//! with a `|`, a condition with a `,`), so tokens are escaped before joining:
//! `%` and every reserved character are percent-encoded, everything else is
//! left alone. Tokens without `%` or separators (the common case, and every
//! link produced before escaping existed) read back unchanged.

use crate::error::CodecError;
use percent_encoding::percent_decode_str;

/// Percent-encode `%` and every character in `reserved`.
pub fn escape(token: &str, reserved: &[char]) -> String {
    let mut out = String::with_capacity(token.len());
    for ch in token.chars() {
        if ch == '%' || reserved.contains(&ch) {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Undo [`escape`].
pub fn unescape(token: &str) -> Result<String, CodecError> {
    percent_decode_str(token)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| CodecError::InvalidToken {
            raw: token.to_string(),
        })
}

/// Escape each token and join them with `separator`.
pub fn join<S: AsRef<str>>(tokens: &[S], separator: char, reserved: &[char]) -> String {
    tokens
        .iter()
        .map(|t| escape(t.as_ref(), reserved))
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

/// Split on `separator`, drop empty pieces, unescape the rest.
pub fn split(raw: &str, separator: char) -> Result<Vec<String>, CodecError> {
    raw.split(separator)
        .filter(|piece| !piece.is_empty())
        .map(unescape)
        .collect()
}
