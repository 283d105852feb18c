use super::lines::is_blank;

/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters: they are the text between matched blocks.
/// Blank lines separate consecutive paragraphs.
pub struct Paragraph;

impl Paragraph {
    /// Splits unmatched text into trimmed paragraph sources.
    pub fn split(raw: &str) -> Vec<String> {
        let mut out = vec![];
        let mut current: Vec<&str> = vec![];
        for line in raw.split('\n') {
            if is_blank(line) {
                Self::flush(&mut current, &mut out);
            } else {
                current.push(line);
            }
        }
        Self::flush(&mut current, &mut out);
        out
    }

    fn flush(lines: &mut Vec<&str>, out: &mut Vec<String>) {
        if !lines.is_empty() {
            out.push(lines.join("\n").trim().to_string());
            lines.clear();
        }
    }
}
