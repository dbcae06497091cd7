//! Line splitting and indentation measurement (§4.2).

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number in the original (cleaned) source.
    pub number: usize,
    /// The raw line, including leading whitespace.
    pub raw: String,
}

impl Line {
    /// One space contributes 1, one tab contributes 4; counting stops at the
    /// first non-whitespace character.
    pub fn indent(&self) -> usize {
        let mut indent = 0;
        for c in self.raw.chars() {
            match c {
                ' ' => indent += 1,
                '\t' => indent += 4,
                _ => break,
            }
        }
        indent
    }

    pub fn trimmed(&self) -> &str {
        self.raw.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// A full-line comment would already have been stripped down to an
    /// empty line by the cleaner, so "blank" and "full comment" coincide by
    /// the time the parser sees a `Line`.
    pub fn is_blank_or_comment(&self) -> bool {
        self.is_blank()
    }

    pub fn first_token(&self) -> Option<&str> {
        self.trimmed().split_whitespace().next()
    }
}

/// Split cleaned source into `Line`s, numbered from 1.
pub fn split_lines(source: &str, file: &str) -> Vec<Line> {
    let _ = file;
    source
        .lines()
        .enumerate()
        .map(|(idx, raw)| Line { number: idx + 1, raw: raw.to_owned() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_count_one_tabs_count_four() {
        let line = Line { number: 1, raw: "  \tx".to_owned() };
        assert_eq!(line.indent(), 6);
    }

    #[test]
    fn counting_stops_at_first_non_whitespace() {
        let line = Line { number: 1, raw: "   if x:".to_owned() };
        assert_eq!(line.indent(), 3);
    }

    #[test]
    fn line_numbers_are_one_based() {
        let lines = split_lines("a\nb\nc", "t.scar");
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[2].number, 3);
    }
}
