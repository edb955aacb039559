use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Height of a sample in pixels.
pub const SAMPLE_HEIGHT: usize = 28;
/// Width of a sample in pixels.
pub const SAMPLE_WIDTH: usize = 28;
/// Number of bytes in a sample (one byte per pixel, row-major).
pub const SAMPLE_LEN: usize = SAMPLE_HEIGHT * SAMPLE_WIDTH;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("invalid sample length: expected {SAMPLE_LEN} bytes, got {0}")]
    InvalidLength(usize),
    #[error("could not read sample file '{path}': {source}")]
    Read { path: String, source: std::io::Error },
    #[error("could not write sample file '{path}': {source}")]
    Write { path: String, source: std::io::Error },
}

/// A normalized 28×28 grayscale digit, stored row-major.
///
/// This is the interchange format between every part of the pipeline: the
/// resampler produces it, stores and raw files supply it, and the classifier
/// consumes it. The length is fixed by the type, so a `Sample` is always
/// exactly `SAMPLE_LEN` bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Sample {
    pixels: [u8; SAMPLE_LEN],
}

impl Sample {
    pub fn from_pixels(pixels: [u8; SAMPLE_LEN]) -> Sample {
        Sample { pixels }
    }

    /// Validates `bytes` and copies them into a new sample.
    pub fn from_bytes(bytes: &[u8]) -> Result<Sample, SampleError> {
        let pixels: [u8; SAMPLE_LEN] = bytes
            .try_into()
            .map_err(|_| SampleError::InvalidLength(bytes.len()))?;
        Ok(Sample { pixels })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * SAMPLE_WIDTH + x]
    }

    /// Reads a raw sample file: exactly `SAMPLE_LEN` bytes, no header.
    pub fn import(path: impl AsRef<Path>) -> Result<Sample, SampleError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| SampleError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let sample = Sample::from_bytes(&bytes)?;
        debug!(path = %path.display(), "imported raw sample");
        Ok(sample)
    }

    /// Writes the sample as a raw `SAMPLE_LEN`-byte file.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), SampleError> {
        let path = path.as_ref();
        fs::write(path, self.pixels).map_err(|source| SampleError::Write {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "exported raw sample");
        Ok(())
    }
}

impl TryFrom<&[u8]> for Sample {
    type Error = SampleError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Sample::from_bytes(bytes)
    }
}

impl TryFrom<Vec<u8>> for Sample {
    type Error = SampleError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Sample::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ink = self.pixels.iter().filter(|&&p| p > 127).count();
        f.debug_struct("Sample").field("len", &SAMPLE_LEN).field("ink", &ink).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ferrite-sketch-{}-{}", std::process::id(), name))
    }

    #[test]
    fn rejects_short_and_long_buffers() {
        assert!(matches!(Sample::from_bytes(&[0u8; 783]), Err(SampleError::InvalidLength(783))));
        assert!(matches!(Sample::from_bytes(&[0u8; 785]), Err(SampleError::InvalidLength(785))));
        assert!(Sample::from_bytes(&[]).is_err());
    }

    #[test]
    fn accessor_is_row_major() {
        let mut pixels = [0u8; SAMPLE_LEN];
        pixels[2 * SAMPLE_WIDTH + 5] = 200;
        let sample = Sample::from_pixels(pixels);
        assert_eq!(sample.get(5, 2), 200);
        assert_eq!(sample.get(2, 5), 0);
    }

    #[test]
    fn export_then_import_is_byte_identical() {
        let pixels: Vec<u8> = (0..SAMPLE_LEN).map(|i| (i * 31 % 256) as u8).collect();
        let sample = Sample::try_from(pixels.clone()).unwrap();

        let path = temp_path("roundtrip.raw");
        sample.export(&path).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), SAMPLE_LEN as u64);

        let back = Sample::import(&path).unwrap();
        assert_eq!(back.as_bytes(), pixels.as_slice());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn import_rejects_wrong_size_file() {
        let path = temp_path("short.raw");
        std::fs::write(&path, [7u8; 100]).unwrap();
        assert!(matches!(Sample::import(&path), Err(SampleError::InvalidLength(100))));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn import_reports_missing_file() {
        let path = temp_path("does-not-exist.raw");
        assert!(matches!(Sample::import(&path), Err(SampleError::Read { .. })));
    }
}
