//! The textual puzzle format.
//!
//! A header line `<rows> <cols>`, then one clue line per row (top to
//! bottom), then one per column (left to right). Clues are
//! whitespace-separated block lengths; a blank line's clue is written `0`.

use super::Puzzle;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("missing the `<rows> <cols>` header line")]
    MissingHeader,
    #[error("malformed header {0:?}: expected `<rows> <cols>`")]
    MalformedHeader(String),
    #[error("expected {expected} clue lines, found {found}")]
    WrongLineCount { expected: usize, found: usize },
    #[error("bad clue number {token:?} on line {line}")]
    BadNumber { token: String, line: usize },
}

/// Parses a puzzle description.
pub fn parse_puzzle(input: &str) -> Result<Puzzle, ParseError> {
    let mut lines = input.lines();
    let header = lines.next().ok_or(ParseError::MissingHeader)?;
    let mut parts = header.split_whitespace();
    let (rows, cols) = match (parts.next(), parts.next(), parts.next()) {
        (Some(rows), Some(cols), None) => {
            let rows: usize = rows
                .parse()
                .map_err(|_| ParseError::MalformedHeader(header.to_string()))?;
            let cols: usize = cols
                .parse()
                .map_err(|_| ParseError::MalformedHeader(header.to_string()))?;
            (rows, cols)
        }
        _ => return Err(ParseError::MalformedHeader(header.to_string())),
    };

    let mut clue_lines: Vec<&str> = lines.collect();
    while clue_lines.last().is_some_and(|line| line.trim().is_empty()) {
        clue_lines.pop();
    }
    let expected = rows + cols;
    if clue_lines.len() != expected {
        return Err(ParseError::WrongLineCount {
            expected,
            found: clue_lines.len(),
        });
    }

    let mut clues = Vec::with_capacity(expected);
    for (offset, line) in clue_lines.iter().enumerate() {
        let mut clue = Vec::new();
        for token in line.split_whitespace() {
            let block = token.parse::<usize>().map_err(|_| ParseError::BadNumber {
                token: token.to_string(),
                line: offset + 2,
            })?;
            clue.push(block);
        }
        clues.push(clue);
    }

    let col_clues = clues.split_off(rows);
    Ok(Puzzle {
        row_clues: clues,
        col_clues,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_the_clue_format() {
        let puzzle = parse_puzzle("2 3\n1 1\n3\n1\n1\n1\n").unwrap();
        assert_eq!(puzzle.row_clues, vec![vec![1, 1], vec![3]]);
        assert_eq!(puzzle.col_clues, vec![vec![1], vec![1], vec![1]]);
    }

    #[test]
    fn rejects_an_empty_input() {
        assert!(matches!(parse_puzzle(""), Err(ParseError::MissingHeader)));
    }

    #[test]
    fn rejects_a_malformed_header() {
        assert!(matches!(
            parse_puzzle("two 3\n"),
            Err(ParseError::MalformedHeader(_))
        ));
        assert!(matches!(
            parse_puzzle("2 3 4\n"),
            Err(ParseError::MalformedHeader(_))
        ));
    }

    #[test]
    fn rejects_a_wrong_clue_line_count() {
        assert!(matches!(
            parse_puzzle("2 2\n1\n1\n1\n"),
            Err(ParseError::WrongLineCount {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn rejects_non_numeric_clues() {
        assert!(matches!(
            parse_puzzle("1 1\n#\n1\n"),
            Err(ParseError::BadNumber { line: 2, .. })
        ));
    }
}
