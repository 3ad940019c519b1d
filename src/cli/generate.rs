// Passkeep — Password generator

use rand::Rng;

/// Characters eligible for generated passwords: letters, digits, and a set
/// of widely-accepted symbols.
const CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}<>?";

/// Generate a random password of the given length.
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let index = rng.random_range(0..CHARSET.len());
            CHARSET[index] as char
        })
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_length() {
        assert_eq!(generate_password(16).chars().count(), 16);
        assert_eq!(generate_password(1).chars().count(), 1);
        assert_eq!(generate_password(64).chars().count(), 64);
    }

    #[test]
    fn test_only_charset_characters() {
        let password = generate_password(256);
        for c in password.chars() {
            assert!(
                CHARSET.contains(&(c as u8)),
                "unexpected character '{}' in generated password",
                c
            );
        }
    }

    #[test]
    fn test_two_passwords_differ() {
        // 32 characters over an 85-symbol alphabet: a collision would point
        // at a broken RNG seed, not bad luck.
        assert_ne!(generate_password(32), generate_password(32));
    }
}
