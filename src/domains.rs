//! Reference peptide domains of the classical MHC class I genes, taken from
//! the Uniprot entries P04439 (A), P01889 (B) and P10321 (C).

use crate::error::{HladlError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Full-length protein.
    Full,
    /// Extracellular domain only.
    Ecd,
}

pub const MODES: [Mode; 2] = [Mode::Full, Mode::Ecd];

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Full => "full",
            Mode::Ecd => "ecd",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = HladlError;

    fn from_str(s: &str) -> Result<Self> {
        MODES
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                HladlError::invalid_input(format!("Unknown mode '{}': expected 'full' or 'ecd'", s))
            })
    }
}

pub const FEATURED_MHCI: [&str; 4] = ["A", "B", "C", "E"];

pub fn is_featured_mhci(gene: &str) -> bool {
    FEATURED_MHCI.contains(&gene)
}

/// 1-based, inclusive residue range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainLocation {
    pub start: usize,
    pub end: usize,
}

impl DomainLocation {
    pub const fn new(start: usize, end: usize) -> Self {
        DomainLocation { start, end }
    }

    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Zero-based half-open range, for slicing a protein sequence.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start.saturating_sub(1)..self.end
    }
}

impl fmt::Display for DomainLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Signal,
    Transmembrane,
}

struct DomainEntry {
    gene: &'static str,
    sequence: &'static str,
    location: DomainLocation,
}

static SIGNAL: [DomainEntry; 3] = [
    DomainEntry {
        gene: "A",
        sequence: "MAVMAPRTLLLLLSGALALTQTWA",
        location: DomainLocation::new(1, 24),
    },
    DomainEntry {
        gene: "B",
        sequence: "MLVMAPRTVLLLLSAALALTETWA",
        location: DomainLocation::new(1, 24),
    },
    DomainEntry {
        gene: "C",
        sequence: "MRVMAPRALLLLLSGGLALTETWA",
        location: DomainLocation::new(1, 24),
    },
];

static TRANSMEMBRANE: [DomainEntry; 3] = [
    DomainEntry {
        gene: "A",
        sequence: "VGIIAGLVLLGAVITGAVVAAVMW",
        location: DomainLocation::new(309, 332),
    },
    DomainEntry {
        gene: "B",
        sequence: "GIVAGLAVLAVVVIGAVVAAVMCR",
        location: DomainLocation::new(310, 333),
    },
    DomainEntry {
        gene: "C",
        sequence: "MGIVAGLAVLVVLAVLGAVVTAMMC",
        location: DomainLocation::new(309, 333),
    },
];

impl Domain {
    pub const ALL: [Domain; 2] = [Domain::Signal, Domain::Transmembrane];

    pub fn name(&self) -> &'static str {
        match self {
            Domain::Signal => "signal",
            Domain::Transmembrane => "transmemb",
        }
    }

    fn entries(&self) -> &'static [DomainEntry] {
        match self {
            Domain::Signal => &SIGNAL,
            Domain::Transmembrane => &TRANSMEMBRANE,
        }
    }

    fn entry(&self, gene: &str) -> Option<&'static DomainEntry> {
        self.entries().iter().find(|e| e.gene == gene)
    }

    pub fn sequence(&self, gene: &str) -> Option<&'static str> {
        self.entry(gene).map(|e| e.sequence)
    }

    pub fn location(&self, gene: &str) -> Option<DomainLocation> {
        self.entry(gene).map(|e| e.location)
    }
}
