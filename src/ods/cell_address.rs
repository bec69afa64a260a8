use crate::common::errors::AppError;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Converts a spreadsheet column code (`A`, `Z`, `AA`, ...) into its 1-based number.
///
/// Letter codes are base-26 numerals whose digits run from 1 to 26; there is no
/// zero digit, so `Z` is 26 and `AA` is 27.
pub fn column_letters_to_number(letters: &str) -> Result<usize, AppError> {
    if letters.is_empty() {
        return Err(AppError::InvalidColumn("column is empty".to_string()));
    }
    letters.chars().try_fold(0usize, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return Err(AppError::InvalidColumn(letters.to_string()));
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        acc.checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| AppError::InvalidColumn(letters.to_string()))
    })
}

/// Inverse of [`column_letters_to_number`]. `0` has no letter code and yields an empty string.
pub fn column_number_to_letters(number: usize) -> String {
    let mut col = number;
    let mut letters = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        letters.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A 1-based column designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Column(usize);

impl Column {
    pub fn from_number(number: usize) -> Result<Self, AppError> {
        if number == 0 {
            return Err(AppError::InvalidColumn("column index starts at 1".to_string()));
        }
        Ok(Self(number))
    }

    pub fn from_letters(letters: &str) -> Result<Self, AppError> {
        column_letters_to_number(letters.trim()).map(Self)
    }

    /// Accepts either a letter code (`"B"`) or a decimal index (`"2"`).
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            let number = trimmed
                .parse::<usize>()
                .map_err(|_| AppError::InvalidColumn(input.to_string()))?;
            return Self::from_number(number);
        }
        Self::from_letters(trimmed)
    }

    pub fn number(self) -> usize {
        self.0
    }

    /// Zero-based offset into a row's cell vector.
    pub fn offset(self) -> usize {
        self.0 - 1
    }

    pub fn letters(self) -> String {
        column_number_to_letters(self.0)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.letters())
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Column::parse(&text).map_err(D::Error::custom),
            Value::Number(number) => number
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| D::Error::custom("column index must be a positive integer"))
                .and_then(|n| Column::from_number(n).map_err(D::Error::custom)),
            _ => Err(D::Error::custom("column must be a letter code or an index")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

impl CellAddress {
    // Parses A1 notation (for example: B3, AA10) into zero-based indexes.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        if input.trim().is_empty() {
            return Err(AppError::InvalidCellAddress("address is empty".to_string()));
        }

        let split = input
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| AppError::InvalidCellAddress(input.to_string()))?;
        let (letters, digits) = input.split_at(split);
        if letters.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::InvalidCellAddress(input.to_string()));
        }

        let col = column_letters_to_number(letters)
            .map_err(|_| AppError::InvalidCellAddress(input.to_string()))?;
        let row_num: usize = digits
            .parse()
            .map_err(|_| AppError::InvalidCellAddress(input.to_string()))?;

        if row_num == 0 {
            return Err(AppError::InvalidCellAddress(input.to_string()));
        }

        Ok(Self {
            row: row_num - 1,
            col: col - 1,
        })
    }

    pub fn to_a1(self) -> String {
        format!("{}{}", column_number_to_letters(self.col + 1), self.row + 1)
    }
}
