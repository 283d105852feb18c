use crate::scanner::{Groups, Span};

/// Hard line break inline type.
///
/// Two or more spaces (or a backslash) before a newline break the line,
/// unless only whitespace follows. With hard wrapping every such newline
/// breaks.
pub struct LineBreak;

impl LineBreak {
    pub const MIN_SPACES: usize = 2;

    /// Leftmost line break at or after `from`.
    pub fn find(text: &str, from: usize, hard_wrap: bool) -> Option<Groups> {
        let b = text.as_bytes();
        let mut search = from;
        while let Some(off) = text.get(search..)?.find('\n') {
            let nl = search + off;
            if text[nl + 1..].trim().is_empty() {
                return None;
            }
            let spaces = b[from..nl].iter().rev().take_while(|x| **x == b' ').count();
            let backslash = spaces == 0 && nl > from && b[nl - 1] == b'\\';
            if backslash {
                return Some(Groups::new(Span::new(nl - 1, nl + 1), []));
            }
            if hard_wrap || spaces >= Self::MIN_SPACES {
                return Some(Groups::new(Span::new(nl - spaces, nl + 1), []));
            }
            search = nl + 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn found(text: &str, hard_wrap: bool) -> Option<&str> {
        LineBreak::find(text, 0, hard_wrap).map(|g| g.whole().slice(text))
    }

    #[rstest]
    #[case("a  \nb", Some("  \n"))]
    #[case("a    \nb", Some("    \n"))]
    #[case("a\\\nb", Some("\\\n"))]
    #[case("a \nb", None)]
    #[case("a\nb", None)]
    #[case("a  \n  ", None)]
    fn soft_wrap(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(found(text, false), expected);
    }

    #[test]
    fn hard_wrap_breaks_every_inner_newline() {
        assert_eq!(found("a\nb", true), Some("\n"));
        assert_eq!(found("a \nb", true), Some(" \n"));
        assert_eq!(found("a\n", true), None);
    }

    #[test]
    fn skips_plain_newlines() {
        let text = "a\nb  \nc";
        let g = LineBreak::find(text, 0, false).unwrap();
        assert_eq!(g.whole(), Span::new(3, 6));
    }
}
