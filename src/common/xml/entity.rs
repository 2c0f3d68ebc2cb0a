//! Resolution of entity and character references found in text content.

/// Resolve the body of an `&...;` reference (without `&` and `;`).
///
/// Handles the five predefined XML entities and decimal / hexadecimal
/// character references. Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use bonebox::common::xml::entity::resolve_entity;
/// assert_eq!(resolve_entity("amp"), Some('&'));
/// assert_eq!(resolve_entity("#x41"), Some('A'));
/// assert_eq!(resolve_entity("#8217"), Some('\u{2019}'));
/// assert_eq!(resolve_entity("nbsp"), None);
/// ```
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let reference = name.strip_prefix('#')?;
            let code = match reference.strip_prefix('x').or_else(|| reference.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => reference.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_references() {
        assert_eq!(resolve_entity("#"), None);
        assert_eq!(resolve_entity("#xZZ"), None);
        assert_eq!(resolve_entity("#xD800"), None);
        assert_eq!(resolve_entity(""), None);
    }
}
