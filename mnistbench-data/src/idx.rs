//! IDX File Reader
//!
//! The MNIST distribution format: a big-endian `u32` magic number, big-endian
//! `u32` dimensions, then raw `u8` payload. Files ending in `.gz` are
//! decompressed on the fly.

use flate2::read::GzDecoder;
use mnistbench_core::DatasetError;
use ndarray::Array2;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Magic number of an IDX3 unsigned-byte image file
pub const IMAGES_MAGIC: u32 = 2051;
/// Magic number of an IDX1 unsigned-byte label file
pub const LABELS_MAGIC: u32 = 2049;

fn open(path: &Path) -> Result<Box<dyn Read>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

fn read_u32(reader: &mut dyn Read, path: &Path) -> Result<u32, DatasetError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(u32::from_be_bytes(buf))
}

fn read_header(reader: &mut dyn Read, path: &Path, expected: u32) -> Result<(), DatasetError> {
    let found = read_u32(reader, path)?;
    if found != expected {
        return Err(DatasetError::InvalidMagic {
            path: path.to_path_buf(),
            expected,
            found,
        });
    }
    Ok(())
}

fn invalid_data(path: &Path, message: String) -> DatasetError {
    DatasetError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, message),
    }
}

/// Read exactly `len` payload bytes. The buffer grows with the data actually
/// present, so a header claiming more than the file holds fails cleanly.
fn read_payload(reader: &mut dyn Read, path: &Path, len: usize) -> Result<Vec<u8>, DatasetError> {
    let mut payload = Vec::new();
    reader
        .take(len as u64)
        .read_to_end(&mut payload)
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    if payload.len() != len {
        return Err(DatasetError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("header declares {len} bytes, file holds {}", payload.len()),
            ),
        });
    }
    Ok(payload)
}

/// Read an IDX3 image file into an `images × (rows * cols)` byte matrix.
pub fn read_images(path: impl AsRef<Path>) -> Result<Array2<u8>, DatasetError> {
    let path = path.as_ref();
    let mut reader = open(path)?;

    read_header(reader.as_mut(), path, IMAGES_MAGIC)?;
    let count = read_u32(reader.as_mut(), path)? as usize;
    let rows = read_u32(reader.as_mut(), path)? as usize;
    let cols = read_u32(reader.as_mut(), path)? as usize;

    let pixels_per_image = rows
        .checked_mul(cols)
        .ok_or_else(|| invalid_data(path, format!("image size {rows}x{cols} overflows")))?;
    let len = count.checked_mul(pixels_per_image).ok_or_else(|| {
        invalid_data(path, format!("{count} images of {rows}x{cols} overflow"))
    })?;
    let pixels = read_payload(reader.as_mut(), path, len)?;
    tracing::debug!(path = %path.display(), count, rows, cols, "read images");

    Array2::from_shape_vec((count, pixels_per_image), pixels)
        .map_err(|e| invalid_data(path, e.to_string()))
}

/// Read an IDX1 label file.
pub fn read_labels(path: impl AsRef<Path>) -> Result<Vec<u8>, DatasetError> {
    let path = path.as_ref();
    let mut reader = open(path)?;

    read_header(reader.as_mut(), path, LABELS_MAGIC)?;
    let count = read_u32(reader.as_mut(), path)? as usize;

    let labels = read_payload(reader.as_mut(), path, count)?;
    tracing::debug!(path = %path.display(), count, "read labels");
    Ok(labels)
}
