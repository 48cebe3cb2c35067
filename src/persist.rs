use crate::error::{HladlError, Result};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes `value` as gzip-compressed JSON.
pub fn save_json<T, P>(path: P, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let write_err = |source: Box<dyn std::error::Error + Send + Sync>| HladlError::WriteJson {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| write_err(e.into()))?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    serde_json::to_writer(&mut encoder, value).map_err(|e| write_err(e.into()))?;
    encoder
        .finish()
        .and_then(|mut w| w.flush())
        .map_err(|e| write_err(e.into()))?;

    Ok(())
}

/// Reads back a file written by [`save_json`]. Any failure, including a
/// missing file, is reported as [`HladlError::ReadJson`] carrying the path.
pub fn read_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let read_err = |source: Box<dyn std::error::Error + Send + Sync>| HladlError::ReadJson {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| read_err(e.into()))?;
    let decoder = BufReader::new(MultiGzDecoder::new(BufReader::new(file)));
    serde_json::from_reader(decoder).map_err(|e| read_err(e.into()))
}
