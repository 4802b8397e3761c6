//! Batch driver: convert a list of files into one output directory.
//!
//! Each input is converted independently; a failure is logged and counted
//! but never stops the remaining files. Only the output-directory creation
//! is fatal to a batch.

use std::fs;
use std::path::{Path, PathBuf};

use crate::convert;
use crate::types::errors::ConvertError;

/// Base name used when the caller passes an empty or blank one.
const DEFAULT_BASE_NAME: &str = "Output";

/// Aggregated outcome of a batch run.
#[derive(Default, Clone, PartialEq, Debug)]
pub struct BatchSummary {
    /// Output paths written, in input order.
    pub saved: Vec<PathBuf>,
    /// Number of inputs whose conversion failed.
    pub failed: usize,
}

impl BatchSummary {
    /// Number of inputs processed.
    pub fn total(&self) -> usize {
        self.saved.len() + self.failed
    }
}

/// Output file name for the forward direction:
/// `{base name} CAN Matrix - {input stem}.csv`.
pub fn matrix_output_name(base_name: &str, input_stem: &str) -> String {
    format!(
        "{} CAN Matrix - {}.csv",
        effective_base(base_name),
        input_stem
    )
}

/// Output file name for the reverse direction:
/// `{base name} - {input stem}.dbc`.
pub fn dbc_output_name(base_name: &str, input_stem: &str) -> String {
    format!("{} - {}.dbc", effective_base(base_name), input_stem)
}

fn effective_base(base_name: &str) -> &str {
    let trimmed: &str = base_name.trim();
    if trimmed.is_empty() {
        DEFAULT_BASE_NAME
    } else {
        trimmed
    }
}

/// Convert every `.dbc` input into a CAN matrix `.csv` in `out_dir`.
///
/// # Parameters
/// - `inputs`: `.dbc` paths, processed sequentially in the given order.
/// - `out_dir`: output directory, created when absent.
/// - `base_name`: prefix for [`matrix_output_name`]; blank falls back to
///   `Output`.
///
/// # Errors
/// Only [`ConvertError::OutputDir`] is returned; per-file failures are
/// logged through the `log` facade and reported in the summary.
pub fn run_dbc_to_matrix(
    inputs: &[&str],
    out_dir: &str,
    base_name: &str,
) -> Result<BatchSummary, ConvertError> {
    run_batch(
        inputs,
        out_dir,
        base_name,
        matrix_output_name,
        convert::dbc_to_matrix,
    )
}

/// Convert every CAN matrix `.csv` input into a `.dbc` in `out_dir`.
/// Same contract as [`run_dbc_to_matrix`], with [`dbc_output_name`].
pub fn run_matrix_to_dbc(
    inputs: &[&str],
    out_dir: &str,
    base_name: &str,
) -> Result<BatchSummary, ConvertError> {
    run_batch(
        inputs,
        out_dir,
        base_name,
        dbc_output_name,
        convert::matrix_to_dbc,
    )
}

fn run_batch(
    inputs: &[&str],
    out_dir: &str,
    base_name: &str,
    output_name: fn(&str, &str) -> String,
    convert_one: fn(&str, &str) -> Result<PathBuf, ConvertError>,
) -> Result<BatchSummary, ConvertError> {
    fs::create_dir_all(out_dir).map_err(|source| ConvertError::OutputDir {
        path: out_dir.to_string(),
        source,
    })?;

    let mut summary: BatchSummary = BatchSummary::default();
    for &input in inputs {
        let stem: String = Path::new(input)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let out_path: String = Path::new(out_dir)
            .join(output_name(base_name, &stem))
            .display()
            .to_string();

        match convert_one(input, &out_path) {
            Ok(saved) => {
                log::info!("saved '{}'", saved.display());
                summary.saved.push(saved);
            }
            Err(err) => {
                log::error!("{} -> {}", input, err);
                summary.failed += 1;
            }
        }
    }

    log::info!(
        "Batch complete. Saved: {} Failed: {}",
        summary.saved.len(),
        summary.failed
    );
    Ok(summary)
}
