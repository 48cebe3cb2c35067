pub mod error;
pub mod record;
pub mod parser;
pub mod writer;
pub mod nomenclature;
pub mod persist;
pub mod data;
pub mod domains;

pub use error::{HladlError, Result};
pub use record::SequenceRecord;
pub use parser::{read, FastxReader, FastxReaderBuilder};
pub use writer::{fastafy, FastaWriter};
pub use nomenclature::{check_digits, trim_gene, Resolution};
pub use persist::{read_json, save_json};
pub use data::{DataFetcher, DataStore, SeqType};
pub use domains::{Domain, DomainLocation, Mode};
