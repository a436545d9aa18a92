//! Random slug generation for shortened URLs.

use rand::{Rng, distr::Alphanumeric};

/// Length of generated slugs.
pub const SLUG_LENGTH: usize = 6;

/// Generates a random 6-character alphanumeric slug.
///
/// Uniqueness is not guaranteed here; the service layer checks the candidate
/// against the repository and re-rolls on collision.
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug();
/// assert_eq!(slug.len(), 6);
/// assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_slug() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SLUG_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_slug_has_fixed_length() {
        for _ in 0..100 {
            assert_eq!(generate_slug().len(), SLUG_LENGTH);
        }
    }

    #[test]
    fn test_generate_slug_is_alphanumeric() {
        for _ in 0..100 {
            let slug = generate_slug();
            assert!(
                slug.chars().all(|c| c.is_ascii_alphanumeric()),
                "unexpected character in slug {slug:?}"
            );
        }
    }

    #[test]
    fn test_generate_slug_varies() {
        let mut slugs = HashSet::new();
        for _ in 0..1000 {
            slugs.insert(generate_slug());
        }
        // 62^6 codespace; 1000 draws colliding entirely would mean a broken RNG.
        assert!(slugs.len() > 990);
    }
}
