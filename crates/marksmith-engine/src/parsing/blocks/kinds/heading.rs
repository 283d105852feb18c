/// A heading with its inline source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub const ATX_MARKER: char = '#';
    pub const MAX_LEVEL: u8 = 6;

    /// Builds an ATX heading from its `#` run and optional content.
    pub fn atx(marks: &str, text: Option<&str>) -> Self {
        let level = marks
            .chars()
            .filter(|c| *c == Self::ATX_MARKER)
            .count()
            .clamp(1, Self::MAX_LEVEL as usize) as u8;
        Self {
            level,
            text: text.unwrap_or("").trim().to_string(),
        }
    }

    /// Builds a setext heading: `=` underlines give level 1, `-` level 2.
    pub fn setext(text: &str, underline: &str) -> Self {
        let level = if underline.trim_start().starts_with('=') {
            1
        } else {
            2
        };
        Self {
            level,
            text: text.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atx_level_counts_marks() {
        let h = Heading::atx("###", Some(" Title "));
        assert_eq!(h.level, 3);
        assert_eq!(h.text, "Title");
    }

    #[test]
    fn empty_atx_heading() {
        assert_eq!(Heading::atx("#", None).text, "");
    }

    #[test]
    fn setext_levels() {
        assert_eq!(Heading::setext("A", "===").level, 1);
        assert_eq!(Heading::setext("A", "---").level, 2);
    }
}
