use crate::scanner::{Groups, Span};

use super::lines::{line_end, next_line, up_to_three_spaces};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// An opening or closing fence line: which character and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub len: usize,
}

/// Fenced code block type with owned delimiter constants.
///
/// The closing fence must repeat the opening character at least as many
/// times; a run of the other character never closes the block.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    pub const MIN_LEN: usize = 3;

    /// Reads a fence run at the start of `line`, after up to 3 spaces.
    pub fn sig(line: &str) -> Option<FenceSig> {
        let rest = &line[up_to_three_spaces(line)..];
        let first = *rest.as_bytes().first()?;
        let kind = match first {
            Self::BACKTICK => FenceKind::Backticks,
            Self::TILDE => FenceKind::Tildes,
            _ => return None,
        };
        let len = rest.bytes().take_while(|b| *b == first).count();
        (len >= Self::MIN_LEN).then_some(FenceSig { kind, len })
    }

    /// Whether `line` is a closing fence for `open`: same character, at
    /// least as long, nothing but whitespace after it.
    pub fn closes(open: FenceSig, line: &str) -> bool {
        let Some(sig) = Self::sig(line) else {
            return false;
        };
        if sig.kind != open.kind || sig.len < open.len {
            return false;
        }
        let start = up_to_three_spaces(line) + sig.len;
        line[start..].trim().is_empty()
    }

    /// Anchored matcher for a complete fenced block starting at `pos`.
    ///
    /// Groups: 1 = opening fence run, 2 = language tag, 3 = code.
    /// Blocks without a closing fence do not match.
    pub fn find(text: &str, pos: usize) -> Option<Groups> {
        let open_end = line_end(text, pos);
        let open_line = &text[pos..open_end];
        let sig = Self::sig(open_line)?;

        let run_start = pos + up_to_three_spaces(open_line);
        let run = Span::new(run_start, run_start + sig.len);
        let info = &text[run.end..open_end];
        if sig.kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        let lang = info.split_whitespace().next().map(|word| {
            let start = run.end + info.find(word).unwrap_or(0);
            Span::new(start, start + word.len())
        });

        let code_start = next_line(text, open_end)?;
        let mut line_start = code_start;
        while line_start < text.len() {
            let end = line_end(text, line_start);
            if Self::closes(sig, &text[line_start..end]) {
                let mut whole_end = end;
                while text.as_bytes().get(whole_end) == Some(&b'\n') {
                    whole_end += 1;
                }
                return Some(Groups::new(
                    Span::new(pos, whole_end),
                    [Some(run), lang, Some(Span::new(code_start, line_start))],
                ));
            }
            line_start = next_line(text, end)?;
        }
        None
    }
}
