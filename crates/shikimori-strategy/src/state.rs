//! CSRF `state` values for the authorization redirect

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;

/// Random URL-safe state: 32 random bytes as unpadded base64url.
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Compare a returned state to the issued one without early exit.
pub fn state_matches(issued: &str, returned: &str) -> bool {
    let (a, b) = (issued.as_bytes(), returned.as_bytes());
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
