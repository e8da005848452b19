use crate::errors::AppError;

/// Canonicalizes a user-supplied slug: trims surrounding whitespace,
/// lowercases, and validates the result against `[a-z0-9-]+`.
///
/// Every slug crossing the system boundary (registration claim, company
/// rename, job slug) passes through here before comparison or storage;
/// comparisons are defined only on normalized forms.
pub fn normalize(input: &str) -> Result<String, AppError> {
    let slug = input.trim().to_lowercase();
    if slug.is_empty() || !slug.bytes().all(is_slug_byte) {
        return Err(AppError::InvalidSlugFormat);
    }
    Ok(slug)
}

fn is_slug_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize("  Acme-Corp ").unwrap(), "acme-corp");
        assert_eq!(normalize("ACME42").unwrap(), "acme42");
    }

    #[test]
    fn test_accepts_digits_and_hyphens() {
        assert_eq!(normalize("a-1-b-2").unwrap(), "a-1-b-2");
        assert_eq!(normalize("2024").unwrap(), "2024");
        assert_eq!(normalize("---").unwrap(), "---");
    }

    #[test]
    fn test_rejects_empty_and_whitespace_only() {
        assert!(matches!(normalize(""), Err(AppError::InvalidSlugFormat)));
        assert!(matches!(normalize("   "), Err(AppError::InvalidSlugFormat)));
    }

    #[test]
    fn test_rejects_disallowed_characters() {
        for bad in ["acme corp", "acme_corp", "acme.corp", "acmé", "acme/corp", "acme!"] {
            assert!(
                matches!(normalize(bad), Err(AppError::InvalidSlugFormat)),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_idempotent_on_accepted_inputs() {
        for input in ["  Acme ", "already-normal", "A-1", "ACME42"] {
            let once = normalize(input).unwrap();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice);
        }
    }
}
