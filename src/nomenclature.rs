use crate::error::{HladlError, Result};
use std::fmt;

/// Allele-name resolution, in "digits" (two digits per nomenclature field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resolution {
    Two,
    Four,
    Six,
    Eight,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::Two,
        Resolution::Four,
        Resolution::Six,
        Resolution::Eight,
    ];

    pub fn digits(&self) -> u32 {
        match self {
            Resolution::Two => 2,
            Resolution::Four => 4,
            Resolution::Six => 6,
            Resolution::Eight => 8,
        }
    }
}

impl TryFrom<u32> for Resolution {
    type Error = HladlError;

    fn try_from(digits: u32) -> Result<Self> {
        match digits {
            2 => Ok(Resolution::Two),
            4 => Ok(Resolution::Four),
            6 => Ok(Resolution::Six),
            8 => Ok(Resolution::Eight),
            _ => Err(HladlError::invalid_input(format!(
                "The only acceptable values for 'digits' are 2, 4, 6, and 8 (got {})",
                digits
            ))),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits())
    }
}

pub fn check_digits(requested_digits: u32) -> Result<Resolution> {
    Resolution::try_from(requested_digits)
}

/// Cuts an allele name such as `HLA-A*01:01:01` down to `digits` resolution:
/// `1.5 * digits` characters are kept after the `*` (field digits plus colons).
pub fn trim_gene(digits: u32, full_gene: &str) -> Result<&str> {
    let asterisk = memchr::memchr(b'*', full_gene.as_bytes()).ok_or_else(|| {
        HladlError::invalid_input(
            "Full allele identifier (minus 'HLA-') required, inclusive of asterisk.",
        )
    })?;

    let keep = (digits as usize * 3) / 2;
    let end = full_gene[asterisk..]
        .char_indices()
        .nth(keep)
        .map(|(i, _)| asterisk + i)
        .unwrap_or(full_gene.len());

    Ok(&full_gene[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digits() {
        for digits in [2, 4, 6, 8] {
            assert_eq!(check_digits(digits).unwrap().digits(), digits);
        }
        for digits in [0, 1, 3, 5, 7, 10, 100] {
            assert!(matches!(
                check_digits(digits),
                Err(HladlError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_trim_gene() {
        let allele = "HLA-A*01:01:01";
        assert_eq!(trim_gene(2, allele).unwrap(), "HLA-A*01");
        assert_eq!(trim_gene(4, allele).unwrap(), "HLA-A*01:01");
        assert_eq!(trim_gene(6, allele).unwrap(), "HLA-A*01:01:01");
        assert_eq!(trim_gene(8, allele).unwrap(), "HLA-A*01:01:01");
        assert_eq!(trim_gene(8, "A*02:01:01:05").unwrap(), "A*02:01:01:05");
        assert_eq!(trim_gene(4, "B*07:02:01").unwrap(), "B*07:02");
    }

    #[test]
    fn test_trim_gene_missing_asterisk() {
        assert!(matches!(
            trim_gene(4, "HLA-A01:01"),
            Err(HladlError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_resolution_display() {
        assert_eq!(Resolution::Six.to_string(), "6");
        assert_eq!(Resolution::ALL.len(), 4);
    }
}
