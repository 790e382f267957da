//! Parsing of typed `row, col` entries.

use derive_more::Display;

/// Why a line of input is not a coordinate pair.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
    /// Nothing but separators or whitespace.
    #[display("Invalid entry: try again.\nRow & column numbers must be either 0, 1, or 2.")]
    Empty,

    /// A single number.
    #[display("You entered only one number: {_0}\nPlease enter two numbers 0, 1, or 2, for example: 1,2")]
    SingleNumber(String),

    /// A single token that is not a number.
    #[display("You entered invalid number: {_0}\nUse numbers 0, 1, or 2, for example: 1,2")]
    InvalidNumber(String),

    /// Two or more tokens that are not exactly two numbers.
    #[display(
        "You have entered row #{row}\n          and column #{col}\nInvalid entry: try again.\nRow & column numbers must be either 0, 1, or 2."
    )]
    Malformed {
        /// First token.
        row: String,
        /// Second token.
        col: String,
    },
}

impl std::error::Error for InputError {}

/// Parses `row, col` separated by commas and/or whitespace.
///
/// Only the shape is checked here. Range and occupancy belong to the
/// game core.
pub fn parse_coordinates(raw: &str) -> Result<(usize, usize), InputError> {
    let tokens: Vec<&str> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect();

    match tokens.as_slice() {
        [] => Err(InputError::Empty),
        [only] if is_number(only) => Err(InputError::SingleNumber((*only).to_string())),
        [only] => Err(InputError::InvalidNumber((*only).to_string())),
        [row, col] if is_number(row) && is_number(col) => {
            match (row.parse::<usize>(), col.parse::<usize>()) {
                (Ok(row), Ok(col)) => Ok((row, col)),
                _ => Err(malformed(row, col)),
            }
        }
        [row, col, ..] => Err(malformed(row, col)),
    }
}

fn is_number(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit())
}

fn malformed(row: &str, col: &str) -> InputError {
    InputError::Malformed {
        row: row.to_string(),
        col: col.to_string(),
    }
}
