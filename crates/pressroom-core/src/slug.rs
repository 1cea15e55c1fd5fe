//! Slug derivation.
//!
//! [`generate_slug`] is a pure function of the title: deterministic,
//! and idempotent when applied to its own output.

/// Fold common Latin accented characters to their ASCII base letter.
///
/// Covers the alphabets of the site locales (es/en/pt); anything else
/// is treated as a separator.
fn fold_accent(ch: char) -> Option<char> {
    Some(match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        _ => return None,
    })
}

/// Derive a URL-safe slug from a title.
///
/// Lowercases, folds Latin accents, maps every run of other characters
/// to a single hyphen, and trims leading/trailing hyphens.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        let ch = ch.to_lowercase().next().unwrap_or(ch);
        let mapped = if ch.is_ascii_alphanumeric() {
            Some(ch)
        } else {
            fold_accent(ch)
        };

        match mapped {
            Some(c) => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
            }
            None => pending_hyphen = true,
        }
    }

    slug
}
