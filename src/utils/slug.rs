/// Derives a URL-safe identifier from a human-readable title.
///
/// Lower-cases the input, keeps ASCII alphanumerics only and collapses every
/// run of other characters into a single `-`. Leading/trailing separators are
/// trimmed. Two distinct titles may normalize to the same slug; lookups are
/// by document id, so no uniqueness suffix is applied.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_simple_title() {
        assert_eq!(slugify("Acme"), "acme");
    }

    #[test]
    fn test_collapses_runs_into_single_separator() {
        assert_eq!(slugify("My   Startup!!  2024"), "my-startup-2024");
        assert_eq!(slugify("Acme & Co."), "acme-co");
    }

    #[test]
    fn test_trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  --Hello World--  "), "hello-world");
    }

    #[test]
    fn test_strips_non_ascii() {
        assert_eq!(slugify("Café Über"), "caf-ber");
    }

    #[test]
    fn test_empty_remainder_is_allowed() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_idempotent() {
        for title in ["Acme", "My   Startup!!  2024", "Café Über", "a-b-c"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }
}
