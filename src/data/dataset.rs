//! Binary EMG recordings: `complete{n}.bin` samples and `labels{n}.bin` labels.
//!
//! Sample files are headerless sequences of records, one little-endian `f64`
//! per channel. Label files hold one `u8` per record.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ndarray::{Array2, Axis};
use tracing::debug;

const F64_BYTES: usize = std::mem::size_of::<f64>();

/// Samples and the labels that go with them, row for row.
#[derive(Clone, Debug, PartialEq)]
pub struct Recording {
    samples: Array2<f64>,
    labels: Vec<u8>,
}

impl Recording {
    /// Pair samples with labels; fails if their lengths differ.
    pub fn new(samples: Array2<f64>, labels: Vec<u8>) -> Result<Self> {
        if samples.nrows() != labels.len() {
            bail!(
                "recording has {} samples but {} labels",
                samples.nrows(),
                labels.len()
            );
        }
        Ok(Self { samples, labels })
    }

    /// `(len, channels)` sample matrix.
    pub fn samples(&self) -> &Array2<f64> {
        &self.samples
    }

    /// One gesture label per sample.
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn channels(&self) -> usize {
        self.samples.ncols()
    }

    /// New recording made of the rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Self {
        if indices.is_empty() {
            return Self {
                samples: Array2::zeros((0, self.channels())),
                labels: Vec::new(),
            };
        }
        Self {
            samples: self.samples.select(Axis(0), indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

/// Decode little-endian `f64` records of `channels` values each.
pub fn parse_samples(bytes: &[u8], channels: usize) -> Result<Array2<f64>> {
    if channels == 0 {
        bail!("sample records need at least one channel");
    }
    let record = channels * F64_BYTES;
    if bytes.len() % record != 0 {
        bail!(
            "{} bytes is not a whole number of {}-byte records",
            bytes.len(),
            record
        );
    }

    let values: Vec<f64> = bytes
        .chunks_exact(F64_BYTES)
        .map(|chunk| {
            let mut raw = [0u8; F64_BYTES];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect();
    Array2::from_shape_vec((bytes.len() / record, channels), values)
        .context("sample buffer does not match its record shape")
}

/// Encode samples in the on-disk layout.
pub fn samples_to_bytes(samples: &Array2<f64>) -> Vec<u8> {
    samples.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Read a sample file.
pub fn read_samples(path: &Path, channels: usize) -> Result<Array2<f64>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read samples from {}", path.display()))?;
    parse_samples(&bytes, channels).with_context(|| format!("malformed sample file {}", path.display()))
}

/// Read a label file.
pub fn read_labels(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read labels from {}", path.display()))
}

/// Sample and label paths for 1-based `subject` under `dir`.
pub fn subject_paths(dir: &Path, subject: usize) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("complete{subject}.bin")),
        dir.join(format!("labels{subject}.bin")),
    )
}

/// Load one subject's recording.
pub fn load_subject(dir: &Path, subject: usize, channels: usize) -> Result<Recording> {
    let (samples_path, labels_path) = subject_paths(dir, subject);
    let samples = read_samples(&samples_path, channels)?;
    let labels = read_labels(&labels_path)?;
    debug!(subject, records = labels.len(), "loaded recording");
    Recording::new(samples, labels).with_context(|| format!("subject {subject}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::tempdir;

    fn write_subject(dir: &Path, subject: usize, samples: &Array2<f64>, labels: &[u8]) {
        let (s, l) = subject_paths(dir, subject);
        std::fs::write(s, samples_to_bytes(samples)).expect("failed to write samples");
        std::fs::write(l, labels).expect("failed to write labels");
    }

    #[test]
    fn test_parse_samples_layout() {
        let mut bytes = Vec::new();
        for v in [1.0f64, 2.0, 3.0, 4.0, 5.5, 6.5, 7.5, 8.5] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let samples = parse_samples(&bytes, 4).unwrap();
        assert_eq!(samples, array![[1.0, 2.0, 3.0, 4.0], [5.5, 6.5, 7.5, 8.5]]);
    }

    #[test]
    fn test_parse_samples_rejects_partial_record() {
        let bytes = vec![0u8; 40];
        let err = parse_samples(&bytes, 4).expect_err("40 bytes is not a 32-byte multiple");
        assert!(err.to_string().contains("32-byte"));
        assert!(parse_samples(&[], 4).unwrap().is_empty());
        assert!(parse_samples(&[0u8; 8], 0).is_err());
    }

    #[test]
    fn test_load_subject_round_trip() {
        let dir = tempdir().expect("failed to create tempdir");
        let samples = array![[0.5, 1.0], [19.0, 20.5], [3.25, 7.75]];
        write_subject(dir.path(), 2, &samples, &[1, 1, 2]);

        let rec = load_subject(dir.path(), 2, 2).unwrap();
        assert_eq!(rec.samples(), &samples);
        assert_eq!(rec.labels(), &[1, 1, 2]);
        assert_eq!(rec.channels(), 2);
    }

    #[test]
    fn test_load_subject_length_mismatch() {
        let dir = tempdir().expect("failed to create tempdir");
        write_subject(dir.path(), 1, &array![[1.0], [2.0]], &[1]);
        let err = load_subject(dir.path(), 1, 1).expect_err("lengths differ");
        assert!(format!("{:#}", err).contains("2 samples but 1 labels"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempdir().expect("failed to create tempdir");
        let err = load_subject(dir.path(), 3, 4).expect_err("no files written");
        assert!(err.to_string().contains("complete3.bin"));
    }

    #[test]
    fn test_select_rows() {
        let rec = Recording::new(array![[1.0], [2.0], [3.0]], vec![7, 8, 9]).unwrap();
        let picked = rec.select(&[2, 0]);
        assert_eq!(picked.samples(), &array![[3.0], [1.0]]);
        assert_eq!(picked.labels(), &[9, 7]);
        assert!(rec.select(&[]).is_empty());
    }
}
