const CONTENT_RAW: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/content.toml"));

/// The built-in questions and brain-type profiles.
pub fn content() -> &'static str {
    CONTENT_RAW
}
