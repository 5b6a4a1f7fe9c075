use std::fmt;
use std::str::FromStr;

/// Human-readable grid coordinate: row letter plus 1-based column number, so
/// `(0, 0)` prints as `A1` and `(1, 3)` as `B4`.
///
/// Single-letter rows only: the encoding is total and invertible for
/// `row < 26`. Rows beyond `Z` are out of scope for the service's grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellLabel {
    row: u32,
    col: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell label {0:?} (expected letter + column number, e.g. A1)")]
pub struct InvalidLabel(pub String);

impl CellLabel {
    /// Caller guarantees `row < 26`; columns are unbounded.
    pub fn new(row: u32, col: u32) -> Self {
        debug_assert!(row < 26, "single-letter row encoding");
        Self { row, col }
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn col(&self) -> u32 {
        self.col
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'A' + (self.row % 26) as u8) as char;
        write!(f, "{letter}{}", self.col + 1)
    }
}

impl FromStr for CellLabel {
    type Err = InvalidLabel;

    /// Sole rejection point for malformed labels: one ASCII letter
    /// (case-insensitive) followed by a column number >= 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidLabel(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(err)?;
        if !letter.is_ascii_alphabetic() {
            return Err(err());
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let number: u32 = digits.parse().map_err(|_| err())?;
        if number == 0 {
            return Err(err());
        }
        let row = letter.to_ascii_uppercase() as u32 - 'A' as u32;
        Ok(Self {
            row,
            col: number - 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_formats_from_origin() {
        assert_eq!(CellLabel::new(0, 0).to_string(), "A1");
        assert_eq!(CellLabel::new(1, 3).to_string(), "B4");
        assert_eq!(CellLabel::new(25, 99).to_string(), "Z100");
    }

    #[test]
    fn round_trip_covers_all_single_letter_rows() {
        for row in 0..26 {
            for col in [0, 1, 7, 9, 25, 120] {
                let label = CellLabel::new(row, col);
                let parsed: CellLabel = label.to_string().parse().unwrap();
                assert_eq!(parsed, label);
            }
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        let lower: CellLabel = "g8".parse().unwrap();
        let upper: CellLabel = "G8".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, CellLabel::new(6, 7));
    }

    #[test]
    fn malformed_labels_are_rejected() {
        for bad in ["", "1", "11", "A", "A0", "AA1", "A-1", "A1x", "!3", "B 2"] {
            assert!(bad.parse::<CellLabel>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejection_reports_the_offending_text() {
        let err = "A0".parse::<CellLabel>().unwrap_err();
        assert_eq!(err, InvalidLabel("A0".to_string()));
        assert!(err.to_string().contains("A0"));
    }
}
