use crate::{error::Result, record::SequenceRecord};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const FASTA_LINE_WIDTH: usize = 60;

/// Formats a single FASTA entry, wrapping the sequence at 60 columns.
pub fn fastafy(gene: &str, seq: &str) -> String {
    let mut entry = String::with_capacity(gene.len() + seq.len() + seq.len() / FASTA_LINE_WIDTH + 3);
    entry.push('>');
    entry.push_str(gene);
    entry.push('\n');

    for (i, c) in seq.chars().enumerate() {
        if i > 0 && i % FASTA_LINE_WIDTH == 0 {
            entry.push('\n');
        }
        entry.push(c);
    }
    entry.push('\n');

    entry
}

pub enum FastaWriter<W: Write> {
    Plain(BufWriter<W>, usize),
    Gzip(GzEncoder<BufWriter<W>>, usize),
}

impl FastaWriter<File> {
    pub fn to_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;

        if path.extension().and_then(|s| s.to_str()) == Some("gz") {
            Ok(FastaWriter::new_gzip(file, Compression::default()))
        } else {
            Ok(FastaWriter::new(file))
        }
    }
}

impl<W: Write> FastaWriter<W> {
    pub fn new(writer: W) -> Self {
        FastaWriter::Plain(BufWriter::new(writer), FASTA_LINE_WIDTH)
    }

    pub fn new_gzip(writer: W, compression: Compression) -> Self {
        FastaWriter::Gzip(GzEncoder::new(BufWriter::new(writer), compression), FASTA_LINE_WIDTH)
    }

    pub fn line_width(mut self, width: usize) -> Self {
        match &mut self {
            FastaWriter::Plain(_, w) | FastaWriter::Gzip(_, w) => *w = width.max(1),
        }
        self
    }

    pub fn write_entry(&mut self, id: &str, seq: &str) -> Result<()> {
        let (writer, width): (&mut dyn Write, usize) = match self {
            FastaWriter::Plain(w, width) => (w, *width),
            FastaWriter::Gzip(w, width) => (w, *width),
        };

        writer.write_all(b">")?;
        writer.write_all(id.as_bytes())?;
        writer.write_all(b"\n")?;

        if seq.is_empty() {
            writer.write_all(b"\n")?;
        }
        // Cut every `width` characters, never inside a code point.
        let mut start = 0;
        for (count, (i, _)) in seq.char_indices().enumerate() {
            if count > 0 && count % width == 0 {
                writer.write_all(seq[start..i].as_bytes())?;
                writer.write_all(b"\n")?;
                start = i;
            }
        }
        if start < seq.len() {
            writer.write_all(seq[start..].as_bytes())?;
            writer.write_all(b"\n")?;
        }

        Ok(())
    }

    pub fn write_record(&mut self, record: &SequenceRecord) -> Result<()> {
        self.write_entry(record.id(), record.seq())
    }

    pub fn flush(&mut self) -> Result<()> {
        match self {
            FastaWriter::Plain(w, _) => w.flush()?,
            FastaWriter::Gzip(w, _) => w.flush()?,
        }
        Ok(())
    }

    /// Flushes and, for gzip output, writes the stream trailer. Dropping the
    /// writer does the same but discards any error.
    pub fn finish(self) -> Result<()> {
        match self {
            FastaWriter::Plain(mut w, _) => w.flush()?,
            FastaWriter::Gzip(w, _) => w.finish()?.flush()?,
        }
        Ok(())
    }
}
