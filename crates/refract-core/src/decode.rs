//! Percent-decoding of incoming prompts.
//!
//! Prompts usually arrive straight from a URL path, so `a%20cat` and `a+cat`
//! both mean "a cat". Decoding is strict: a stray `%` or bytes that are not
//! UTF-8 are reported so the caller can fall back to the raw text.

use crate::error::{EnhanceError, EnhanceResult};
use percent_encoding::percent_decode_str;

/// Decode a form/URL-encoded prompt.
pub fn decode_prompt(raw: &str) -> EnhanceResult<String> {
    let spaced = raw.replace('+', " ");
    validate_escapes(&spaced)?;
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| EnhanceError::Decode {
            message: format!("decoded bytes are not valid UTF-8: {e}"),
        })
}

/// Decode `raw`, logging and returning it unchanged if it is malformed.
pub fn decode_prompt_lossy(raw: &str) -> String {
    match decode_prompt(raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!(target: "refract::error", "Error decoding prompt: {e}");
            raw.to_string()
        }
    }
}

// `percent_decode_str` passes malformed escapes through silently.
fn validate_escapes(text: &str) -> EnhanceResult<()> {
    let bytes = text.as_bytes();
    for (i, _) in text.match_indices('%') {
        let valid = matches!(
            (bytes.get(i + 1), bytes.get(i + 2)),
            (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
        );
        if !valid {
            return Err(EnhanceError::Decode {
                message: format!("invalid escape at byte {i}"),
            });
        }
    }
    Ok(())
}
