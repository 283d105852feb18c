use serde::Serialize;

/// Column alignment from a table's delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Right => "right",
            Align::Center => "center",
        }
    }

    /// Reads one delimiter cell such as `:--`, `--:` or `:-:`.
    pub fn parse(cell: &str) -> Option<Align> {
        let cell = cell.trim();
        match (cell.starts_with(':'), cell.ends_with(':') && cell.len() > 1) {
            (true, true) => Some(Align::Center),
            (false, true) => Some(Align::Right),
            (true, false) => Some(Align::Left),
            (false, false) => None,
        }
    }
}

/// A pipe table with cells still in inline source form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub aligns: Vec<Option<Align>>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub const PIPE: char = '|';

    pub fn parse(header: &str, delimiter: &str, body: &str) -> Self {
        Self {
            header: Self::split_row(header),
            aligns: Self::split_row(delimiter)
                .iter()
                .map(|c| Align::parse(c))
                .collect(),
            rows: body
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(Self::split_row)
                .collect(),
        }
    }

    /// Alignment of column `col`. Columns past the header have none.
    pub fn align(&self, col: usize) -> Option<Align> {
        if col >= self.header.len() {
            return None;
        }
        self.aligns.get(col).copied().flatten()
    }

    /// Splits a row on unescaped pipes, dropping the optional outer pipes.
    /// `\|` inside a cell becomes a literal pipe.
    pub fn split_row(line: &str) -> Vec<String> {
        let mut row = line.trim();
        row = row.strip_prefix(Self::PIPE).unwrap_or(row);
        if row.ends_with(Self::PIPE) && !row.ends_with("\\|") {
            row = &row[..row.len() - 1];
        }

        let mut cells = vec![];
        let mut cell = String::new();
        let mut chars = row.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&Self::PIPE) => {
                    cell.push(Self::PIPE);
                    chars.next();
                }
                Self::PIPE => cells.push(std::mem::take(&mut cell).trim().to_string()),
                _ => cell.push(c),
            }
        }
        cells.push(cell.trim().to_string());
        cells
    }
}
