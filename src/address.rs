use crate::errors::{Result, SheetLinkError};

/// Converts a 1-based column index to its letter label (A=1 ... Z=26, AA=27).
/// Base-26 with no zero digit.
pub fn column_letters(index: u32) -> Result<String> {
    if index == 0 {
        return Err(SheetLinkError::InvalidInput(
            "column index must be >= 1".to_string(),
        ));
    }

    let mut letters = String::new();
    let mut n = index;
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.insert(0, (b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    Ok(letters)
}

/// Inverse of [`column_letters`]. Case-insensitive; rejects empty or
/// non-alphabetic input.
pub fn column_index(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(SheetLinkError::InvalidInput(
            "column letters must not be empty".to_string(),
        ));
    }

    let mut col = 0u32;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(SheetLinkError::InvalidInput(format!(
                "invalid column letters '{letters}'"
            )));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    Ok(col)
}

/// Formats a 1-based (row, col) pair as an A1-style address, e.g. (7, 2) -> "B7".
pub fn cell_a1(row: u32, col: u32) -> Result<String> {
    if row == 0 {
        return Err(SheetLinkError::InvalidInput(
            "row index must be >= 1".to_string(),
        ));
    }
    Ok(format!("{}{row}", column_letters(col)?))
}
