//! Link token generation.
//!
//! The trailing token in a share link is a bearer credential for the shared
//! list, so it is drawn from OS entropy: an attacker who can guess a valid
//! token reads another user's tasks.

use rand::rngs::OsRng;
use rand::RngCore;

/// A 128-bit random link token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkToken([u8; 16]);

impl LinkToken {
    /// Generates a new token from OS entropy.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Creates a token from bytes.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the token as bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the token as a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for LinkToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// Include hex encoding helper
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: [u8; 16]) -> String {
        let mut result = String::with_capacity(32);
        for byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0xf) as usize] as char);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_distinct() {
        let a = LinkToken::generate();
        let b = LinkToken::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_hex() {
        let token = LinkToken::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x01, 0x23, 0x45, 0x67, 0x89, 0xab,
            0xcd, 0xef,
        ]);
        assert_eq!(token.to_hex(), "0123456789abcdef0123456789abcdef");
    }

    #[test]
    fn test_hex_is_32_chars() {
        assert_eq!(LinkToken::generate().to_hex().len(), 32);
    }
}
