use crate::error::{HladlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One FASTA or FASTQ entry. `qual` is `None` for FASTA-style records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: String,
    pub seq: String,
    pub qual: Option<String>,
}

impl SequenceRecord {
    #[inline]
    pub fn new(id: impl Into<String>, seq: impl Into<String>, qual: Option<String>) -> Self {
        SequenceRecord {
            id: id.into(),
            seq: seq.into(),
            qual,
        }
    }

    #[inline]
    pub fn fasta(id: impl Into<String>, seq: impl Into<String>) -> Self {
        Self::new(id, seq, None)
    }

    #[inline]
    pub fn fastq(id: impl Into<String>, seq: impl Into<String>, qual: impl Into<String>) -> Self {
        Self::new(id, seq, Some(qual.into()))
    }

    /// Full header text, marker removed.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header text up to the first space or tab.
    pub fn name(&self) -> &str {
        match self.header_split() {
            Some(pos) => &self.id[..pos],
            None => &self.id,
        }
    }

    /// Header text after the first space or tab, if any.
    pub fn desc(&self) -> Option<&str> {
        self.header_split().map(|pos| &self.id[pos + 1..])
    }

    #[inline]
    fn header_split(&self) -> Option<usize> {
        memchr::memchr2(b' ', b'\t', self.id.as_bytes())
    }

    #[inline]
    pub fn seq(&self) -> &str {
        &self.seq
    }

    #[inline]
    pub fn qual(&self) -> Option<&str> {
        self.qual.as_deref()
    }

    #[inline]
    pub fn is_fastq(&self) -> bool {
        self.qual.is_some()
    }

    /// Sequence length in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.chars().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Checks that a quality string, when present, covers the sequence exactly.
    pub fn validate(&self) -> Result<()> {
        let qual_len = match &self.qual {
            Some(qual) => qual.chars().count(),
            None => return Ok(()),
        };
        let seq_len = self.len();
        if qual_len != seq_len {
            return Err(HladlError::LengthMismatch { seq_len, qual_len });
        }
        Ok(())
    }
}

impl fmt::Display for SequenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qual {
            Some(qual) => write!(f, "@{}\n{}\n+\n{}", self.id, self.seq, qual),
            None => write!(f, ">{}\n{}", self.id, self.seq),
        }
    }
}
