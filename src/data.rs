use crate::error::{HladlError, Result};
use crate::nomenclature::{check_digits, Resolution};
use crate::persist::{read_json, save_json};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DATA_SUFFIX: &str = ".json.gz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqType {
    Protein,
    Nucleotide,
}

impl SeqType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeqType::Protein => "prot",
            SeqType::Nucleotide => "nuc",
        }
    }
}

impl fmt::Display for SeqType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeqType {
    type Err = HladlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prot" => Ok(SeqType::Protein),
            "nuc" => Ok(SeqType::Nucleotide),
            _ => Err(HladlError::invalid_input(format!(
                "Unknown sequence type '{}': expected 'prot' or 'nuc'",
                s
            ))),
        }
    }
}

/// Downloads a data set into the cache directory. Retry policy, if any,
/// belongs to the implementation.
pub trait DataFetcher {
    fn fetch(&self, seqtype: SeqType, resolution: Resolution, data_dir: &Path) -> Result<()>;
}

impl<F> DataFetcher for F
where
    F: Fn(SeqType, Resolution, &Path) -> Result<()>,
{
    fn fetch(&self, seqtype: SeqType, resolution: Resolution, data_dir: &Path) -> Result<()> {
        self(seqtype, resolution, data_dir)
    }
}

/// Local cache of allele data sets, stored as `*_{digits}_{seqtype}*.json.gz`.
pub struct DataStore {
    data_dir: PathBuf,
    verbose: bool,
}

impl DataStore {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        DataStore {
            data_dir: data_dir.into(),
            verbose: true,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Cached file names for the given resolution and type, oldest first.
    pub fn find(&self, resolution: Resolution, seqtype: SeqType) -> Result<Vec<String>> {
        let type_match = format!("_{}_{}", resolution, seqtype);
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.data_dir)? {
            let name = match entry?.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if name.ends_with(DATA_SUFFIX) && name.contains(&type_match) && !name.contains("tags") {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Loads the most recent cached data set, fetching it first if none is
    /// present. Returns the parsed data and the file name used.
    pub fn get_data<T, F>(&self, digits: u32, seqtype: SeqType, fetcher: &F) -> Result<(T, String)>
    where
        T: DeserializeOwned,
        F: DataFetcher + ?Sized,
    {
        let resolution = check_digits(digits)?;

        let mut names = self.find(resolution, seqtype)?;
        if names.is_empty() {
            if self.verbose {
                eprintln!("Necessary data not detected: downloading.");
            }
            fetcher.fetch(seqtype, resolution, &self.data_dir)?;
            names = self.find(resolution, seqtype)?;
        }

        let recent = names.pop().ok_or_else(|| HladlError::DataNotFound {
            dir: self.data_dir.clone(),
            pattern: format!("_{}_{}", resolution, seqtype),
        })?;

        let data = read_json(self.data_dir.join(&recent))?;
        Ok((data, recent))
    }

    pub fn save<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.data_dir.join(name);
        save_json(&path, value)?;
        if self.verbose {
            eprintln!("\tSaved to {}", path.display());
        }
        Ok(path)
    }
}
