//! Byte-offset line helpers shared by the hand-written block matchers.

use super::code_fence::CodeFence;

/// Index of the `\n` ending the line that contains `pos`, or the text length.
pub fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

/// Start of the line after one ending at `end`, if there is one.
pub fn next_line(text: &str, end: usize) -> Option<usize> {
    (end < text.len()).then_some(end + 1)
}

pub fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

/// Leading spaces of `line`, capped at three.
pub fn up_to_three_spaces(line: &str) -> usize {
    line.bytes().take(3).take_while(|b| *b == b' ').count()
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Removes up to `n` leading spaces.
pub fn strip_indent(line: &str, n: usize) -> &str {
    let cut = line.bytes().take(n).take_while(|b| *b == b' ').count();
    &line[cut..]
}

/// Whether a line starts a block that ends a lazy continuation run:
/// an ATX heading, a quote, a fence or a thematic break.
pub fn interrupts(line: &str) -> bool {
    let rest = &line[up_to_three_spaces(line)..];
    rest.starts_with(['#', '>']) || CodeFence::sig(line).is_some() || is_thematic_break(rest)
}

/// Three or more of the same `-`, `*` or `_`, optionally spaced.
pub fn is_thematic_break(line: &str) -> bool {
    let mut chars = line.chars().filter(|c| !c.is_whitespace());
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && chars.clone().all(|c| c == first) && chars.count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_bounds() {
        let text = "ab\ncd";
        assert_eq!(line_end(text, 0), 2);
        assert_eq!(line_end(text, 3), 5);
        assert_eq!(next_line(text, 2), Some(3));
        assert_eq!(next_line(text, 5), None);
    }

    #[test]
    fn indentation() {
        assert_eq!(leading_spaces("     x"), 5);
        assert_eq!(up_to_three_spaces("     x"), 3);
        assert_eq!(strip_indent("  x", 4), "x");
        assert_eq!(strip_indent("      x", 4), "  x");
    }

    #[test]
    fn interrupting_lines() {
        assert!(interrupts("# h"));
        assert!(interrupts("> q"));
        assert!(interrupts("```"));
        assert!(interrupts("* * *"));
        assert!(!interrupts("plain"));
        assert!(!interrupts("--"));
    }
}
