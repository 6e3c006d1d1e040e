//! Presentation-only payload scrambling.
//!
//! Backs the "encrypted" display toggle of the chat surface. The transform is
//! keyless base64 and anyone can reverse it; it provides no confidentiality.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::SharedError;

pub fn scramble(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

pub fn unscramble(scrambled: &str) -> Result<String, SharedError> {
    let bytes = STANDARD.decode(scrambled.trim())?;
    Ok(String::from_utf8(bytes)?)
}
