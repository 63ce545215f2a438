/// Suffix appended to the user's name in exported file names.
pub const DEFAULT_FILE_SUFFIX: &str = "Limitless_Brain_Declaration";

/// Derive `{user_name}_{suffix}.png`.
///
/// Path separators, reserved characters, and control characters become `_`
/// so the name can never escape the export directory.
#[must_use]
pub fn card_file_name(user_name: &str, suffix: &str) -> String {
    let stem = format!("{}_{}", user_name.trim(), suffix.trim());
    let mut sanitized: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    // Leading dots would produce hidden files (or `..`).
    while sanitized.starts_with('.') {
        sanitized.replace_range(0..1, "_");
    }
    sanitized.push_str(".png");
    sanitized
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILE_SUFFIX, card_file_name};

    #[test]
    fn name_plus_suffix() {
        assert_eq!(
            card_file_name("Ada", DEFAULT_FILE_SUFFIX),
            "Ada_Limitless_Brain_Declaration.png"
        );
    }

    #[test]
    fn unicode_names_are_kept() {
        assert_eq!(card_file_name(" 홍길동 ", "card"), "홍길동_card.png");
    }

    #[test]
    fn separators_cannot_escape_directory() {
        let name = card_file_name("../../etc/passwd", "card");
        assert!(!name.contains('/'));
        assert!(!name.starts_with('.'));
        assert_eq!(name, "_._.._etc_passwd_card.png");
    }

    #[test]
    fn control_characters_are_replaced() {
        assert_eq!(card_file_name("a\tb", "c"), "a_b_c.png");
    }
}
