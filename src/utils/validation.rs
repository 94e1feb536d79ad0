use std::collections::BTreeMap;
use url::Url;

/// Field-keyed validation errors, ready to be echoed back to the form.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

fn push_error(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}

fn check_length(errors: &mut FieldErrors, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min {
        push_error(errors, field, format!("Must be at least {} characters", min));
    } else if len > max {
        push_error(errors, field, format!("Must be at most {} characters", max));
    }
}

/// Validates a pitch submission before the creation workflow runs.
///
/// Returns the full per-field error map on failure so the caller can render
/// every violation at once instead of stopping at the first one.
pub fn validate_submission(
    title: &str,
    description: &str,
    category: &str,
    link: &str,
    pitch: &str,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    check_length(&mut errors, "title", title, 3, 100);
    check_length(&mut errors, "description", description, 20, 500);
    check_length(&mut errors, "category", category, 3, 20);

    // The markdown body has a minimum only
    if pitch.chars().count() < 10 {
        push_error(&mut errors, "pitch", "Must be at least 10 characters".to_string());
    }

    match Url::parse(link) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => push_error(
            &mut errors,
            "link",
            "Must be a valid http(s) URL".to_string(),
        ),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
