/// Link and image inline type with owned delimiter constants.
pub struct Link;

impl Link {
    pub const IMAGE_MARKER: &'static str = "!";

    /// Destination from either the `<...>` form or the bare form.
    pub fn destination(angled: Option<&str>, bare: Option<&str>) -> String {
        angled.or(bare).unwrap_or("").trim().to_string()
    }

    /// Strips the surrounding quotes or parentheses from a title.
    pub fn title(raw: Option<&str>) -> Option<String> {
        let raw = raw?;
        let inner = raw.get(1..raw.len().saturating_sub(1))?;
        Some(inner.to_string())
    }

    /// Whether the `!` group of a link match is present.
    pub fn is_image(bang: Option<&str>) -> bool {
        bang == Some(Self::IMAGE_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_prefers_angled() {
        assert_eq!(Link::destination(Some("a b"), None), "a b");
        assert_eq!(Link::destination(None, Some("/u")), "/u");
        assert_eq!(Link::destination(None, None), "");
    }

    #[test]
    fn title_drops_delimiters() {
        assert_eq!(Link::title(Some("\"T\"")).as_deref(), Some("T"));
        assert_eq!(Link::title(Some("(T)")).as_deref(), Some("T"));
        assert_eq!(Link::title(None), None);
    }

    #[test]
    fn image_marker() {
        assert!(Link::is_image(Some("!")));
        assert!(!Link::is_image(Some("")));
        assert!(!Link::is_image(None));
    }
}
