use crate::{error::Result, record::SequenceRecord};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Streaming reader for FASTA and FASTQ records, which may be interleaved
/// in the same input. The format is decided per record.
///
/// The reader pulls one line past the end of a FASTA record to find where
/// it stops; that line is kept as the header of the next record.
pub struct FastxReader<R: BufRead> {
    reader: R,
    line: String,
    last: Option<String>,
    finished: bool,
}

impl<R: BufRead> FastxReader<R> {
    pub fn new(reader: R) -> Self {
        FastxReader {
            reader,
            line: String::new(),
            last: None,
            finished: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Next line with its terminator (`\n` or `\r\n`) removed.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }

        let mut end = self.line.len();
        if self.line.as_bytes()[end - 1] == b'\n' {
            end -= 1;
            if end > 0 && self.line.as_bytes()[end - 1] == b'\r' {
                end -= 1;
            }
        }

        Ok(Some(self.line[..end].to_owned()))
    }

    fn seek_header(&mut self) -> Result<Option<String>> {
        while let Some(line) = self.read_line()? {
            if matches!(line.as_bytes().first(), Some(b'>' | b'@')) {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    pub fn next_record(&mut self) -> Result<Option<SequenceRecord>> {
        if self.finished {
            return Ok(None);
        }

        let result = self.parse_record();
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
        }
        result
    }

    fn parse_record(&mut self) -> Result<Option<SequenceRecord>> {
        let header = match self.last.take() {
            Some(header) => header,
            None => match self.seek_header()? {
                Some(header) => header,
                None => return Ok(None),
            },
        };
        // Markers are ASCII, so slicing past the first byte is safe.
        let id = header[1..].to_owned();

        let mut seq = String::new();
        let mut seq_len = 0;
        let mut stop = None;
        while let Some(line) = self.read_line()? {
            if matches!(line.as_bytes().first(), Some(b'@' | b'+' | b'>')) {
                stop = Some(line);
                break;
            }
            seq_len += line.chars().count();
            seq.push_str(&line);
        }

        match stop {
            Some(line) if line.starts_with('+') => {}
            Some(line) => {
                self.last = Some(line);
                return Ok(Some(SequenceRecord::fasta(id, seq)));
            }
            None => {
                self.finished = true;
                return Ok(Some(SequenceRecord::fasta(id, seq)));
            }
        }

        // Lengths are in characters, not bytes.
        let mut qual = String::with_capacity(seq.len());
        let mut qual_len = 0;
        while let Some(line) = self.read_line()? {
            qual_len += line.chars().count();
            qual.push_str(&line);
            if qual_len >= seq_len {
                return Ok(Some(SequenceRecord::fastq(id, seq, qual)));
            }
        }

        // Quality block cut short: keep the sequence, drop the rest of the input.
        self.finished = true;
        Ok(Some(SequenceRecord::fasta(id, seq)))
    }
}

impl FastxReader<Box<dyn BufRead + Send>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        FastxReaderBuilder::default().from_path(path)
    }
}

impl<R: BufRead> Iterator for FastxReader<R> {
    type Item = Result<SequenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Reads FASTA/FASTQ records from `reader`.
pub fn read<R: BufRead>(reader: R) -> FastxReader<R> {
    FastxReader::new(reader)
}

pub struct FastxReaderBuilder {
    buffer_size: usize,
}

impl Default for FastxReaderBuilder {
    fn default() -> Self {
        FastxReaderBuilder {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl FastxReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> FastxReader<BufReader<R>> {
        FastxReader::new(BufReader::with_capacity(self.buffer_size, reader))
    }

    /// Opens `path`, decompressing it when the extension is `gz`.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<FastxReader<Box<dyn BufRead + Send>>> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let reader: Box<dyn BufRead + Send> =
            if path.extension().and_then(|s| s.to_str()) == Some("gz") {
                let decoder = MultiGzDecoder::new(BufReader::new(file));
                Box::new(BufReader::with_capacity(self.buffer_size, decoder))
            } else {
                Box::new(BufReader::with_capacity(self.buffer_size, file))
            };

        Ok(FastxReader::new(reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> Vec<SequenceRecord> {
        read(data.as_bytes()).collect::<Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn test_multiline_fasta() {
        let records = parse(">r1\nAAA\nBBB\n>r2\nCCC\n");
        assert_eq!(
            records,
            vec![
                SequenceRecord::fasta("r1", "AAABBB"),
                SequenceRecord::fasta("r2", "CCC"),
            ]
        );
    }

    #[test]
    fn test_mixed_formats() {
        let records = parse(">a\nSEQ\n@b\nSEQ2\n+\nQQQQ\n");
        assert_eq!(
            records,
            vec![
                SequenceRecord::fasta("a", "SEQ"),
                SequenceRecord::fastq("b", "SEQ2", "QQQQ"),
            ]
        );
    }

    #[test]
    fn test_truncated_quality_stops_parsing() {
        let records = parse("@x\nAAAA\n+\nQQ\n");
        assert_eq!(records, vec![SequenceRecord::fasta("x", "AAAA")]);

        let records = parse("@x\nAAAA\n+\nQQ\n>y\nCCCC\n");
        assert_eq!(records, vec![SequenceRecord::fastq("x", "AAAA", "QQ>y")]);

        let records = parse("@x\nAAAAAAAA\n+\nQQ\n>y\nCC\n");
        assert_eq!(records, vec![SequenceRecord::fasta("x", "AAAAAAAA")]);
    }

    #[test]
    fn test_quality_may_start_with_at() {
        let records = parse("@r1\nACGT\n+\n@III\n@r2\nTT\n+\nII\n");
        assert_eq!(
            records,
            vec![
                SequenceRecord::fastq("r1", "ACGT", "@III"),
                SequenceRecord::fastq("r2", "TT", "II"),
            ]
        );
    }

    #[test]
    fn test_multiline_quality() {
        let records = parse("@r1\nACGT\nACGT\n+r1\nIIII\nJJJJ\n");
        assert_eq!(records, vec![SequenceRecord::fastq("r1", "ACGTACGT", "IIIIJJJJ")]);
    }

    #[test]
    fn test_multibyte_sequence_counts_characters() {
        let records = parse("@x\nÄÄ\n+\nQQ\n@y\nAC\n+\nII\n");
        assert_eq!(
            records,
            vec![
                SequenceRecord::fastq("x", "ÄÄ", "QQ"),
                SequenceRecord::fastq("y", "AC", "II"),
            ]
        );
        assert!(records[0].validate().is_ok());
        assert_eq!(records[0].len(), 2);

        let records = parse("@x\nAC\n+\nÄ\nÖ\n>y\nG\n");
        assert_eq!(
            records,
            vec![
                SequenceRecord::fastq("x", "AC", "ÄÖ"),
                SequenceRecord::fasta("y", "G"),
            ]
        );
    }

    #[test]
    fn test_leading_garbage_skipped() {
        let records = parse("junk\n\nmore junk\n>a desc\nAC\n");
        assert_eq!(records, vec![SequenceRecord::fasta("a desc", "AC")]);
    }

    #[test]
    fn test_no_header() {
        assert!(parse("ACGT\nACGT\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_missing_final_newline() {
        let records = parse(">a\nAC\nGT");
        assert_eq!(records, vec![SequenceRecord::fasta("a", "ACGT")]);

        let records = parse("@a\nACGT\n+\nIIII");
        assert_eq!(records, vec![SequenceRecord::fastq("a", "ACGT", "IIII")]);
    }

    #[test]
    fn test_windows_line_endings() {
        let records = parse(">a\r\nAC\r\nGT\r\n@b\r\nTT\r\n+\r\nII\r\n");
        assert_eq!(
            records,
            vec![
                SequenceRecord::fasta("a", "ACGT"),
                SequenceRecord::fastq("b", "TT", "II"),
            ]
        );
    }

    #[test]
    fn test_header_only_records() {
        let records = parse(">a\n>b\n");
        assert_eq!(
            records,
            vec![SequenceRecord::fasta("a", ""), SequenceRecord::fasta("b", "")]
        );
    }

    #[test]
    fn test_empty_sequence_reads_one_quality_line() {
        let records = parse("@a\n+\n\n>b\nAC\n");
        assert_eq!(
            records,
            vec![SequenceRecord::fastq("a", "", ""), SequenceRecord::fasta("b", "AC")]
        );
    }

    #[test]
    fn test_stream_left_after_last_consumed_line() {
        let data = b">a\nAC\n>b\nGT\n";
        let mut cursor = &data[..];
        {
            let mut reader = FastxReader::new(&mut cursor);
            assert_eq!(reader.next_record().unwrap(), Some(SequenceRecord::fasta("a", "AC")));
        }
        // ">b" was consumed as lookahead by the dropped reader.
        assert_eq!(cursor, b"GT\n");
    }

    #[test]
    fn test_finished_reader_stays_finished() {
        let mut reader = read("@x\nAAAA\n+\nQQ\n".as_bytes());
        assert!(reader.next_record().unwrap().is_some());
        assert!(reader.next_record().unwrap().is_none());
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let data: &[u8] = b">a\n\xff\xfe\n";
        let mut reader = read(data);
        assert!(matches!(
            reader.next_record(),
            Err(crate::error::HladlError::Io(_))
        ));
        assert!(reader.next().is_none());
    }
}
