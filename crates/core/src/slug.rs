//! URL slug generation and validation for pages and brands.

use crate::error::CoreError;

/// Maximum slug length, matching the `VARCHAR(160)` slug columns.
pub const MAX_SLUG_LENGTH: usize = 160;

/// Generate a URL-safe slug from a title.
///
/// Lowercases ASCII, transliterates Turkish and common Latin accented
/// letters (`Ş` -> `s`, `ı` -> `i`), maps every other character to a
/// hyphen, collapses hyphen runs, trims leading/trailing hyphens, and
/// truncates to [`MAX_SLUG_LENGTH`].
pub fn generate_slug(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut prev_hyphen = true;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            prev_hyphen = false;
        } else if let Some(ascii) = transliterate(c) {
            result.push_str(ascii);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    result.truncate(MAX_SLUG_LENGTH);
    result.trim_end_matches('-').to_string()
}

/// ASCII replacement for a Latin letter with diacritics.
fn transliterate(c: char) -> Option<&'static str> {
    let ascii = match c {
        'ş' | 'Ş' | 'ś' | 'Ś' | 'š' | 'Š' => "s",
        'ı' | 'İ' | 'í' | 'Í' | 'ì' | 'Ì' | 'î' | 'Î' | 'ï' | 'Ï' => "i",
        'ğ' | 'Ğ' => "g",
        'ü' | 'Ü' | 'ú' | 'Ú' | 'ù' | 'Ù' | 'û' | 'Û' => "u",
        'ö' | 'Ö' | 'ó' | 'Ó' | 'ò' | 'Ò' | 'ô' | 'Ô' | 'ø' | 'Ø' => "o",
        'ç' | 'Ç' | 'ć' | 'Ć' | 'č' | 'Č' => "c",
        'á' | 'Á' | 'à' | 'À' | 'â' | 'Â' | 'ä' | 'Ä' | 'ã' | 'Ã' | 'å' | 'Å' => "a",
        'é' | 'É' | 'è' | 'È' | 'ê' | 'Ê' | 'ë' | 'Ë' => "e",
        'ñ' | 'Ñ' => "n",
        'ž' | 'Ž' => "z",
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        _ => return None,
    };
    Some(ascii)
}

/// Validate a slug: non-empty, bounded, lowercase alphanumerics and single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LENGTH} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(CoreError::Validation(
            "Slug must not start or end with a hyphen or contain consecutive hyphens".into(),
        ));
    }
    Ok(())
}

/// Use `explicit` when given (after validation), otherwise derive a slug from `source`.
pub fn resolve_slug(explicit: Option<&str>, source: &str) -> Result<String, CoreError> {
    match explicit {
        Some(slug) => {
            validate_slug(slug)?;
            Ok(slug.to_string())
        }
        None => {
            let generated = generate_slug(source);
            if generated.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Cannot derive a slug from '{source}'; provide one explicitly"
                )));
            }
            Ok(generated)
        }
    }
}
