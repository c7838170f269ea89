// src/utils/token.rs

use rand::{Rng, distr::Alphanumeric};

/// Generates a random alphanumeric access token of the given length.
///
/// Tokens are not checked for uniqueness across sessions; each session
/// simply stores the last value generated for it.
pub fn generate(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_requested_length() {
        assert_eq!(generate(6).len(), 6);
        assert_eq!(generate(0).len(), 0);
    }

    #[test]
    fn is_alphanumeric() {
        let token = generate(64);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn successive_tokens_differ() {
        // Probabilistic, but a collision over 62^16 values would point at a
        // broken RNG rather than bad luck.
        assert_ne!(generate(16), generate(16));
    }
}
