//! Data Processor Module
//! Builds the HAR tables from parsed files (pivot of inertial signals,
//! feature renaming, label join).
//!
//! Polars frames carry no row index, so the index levels are stored as the
//! leading columns of each table:
//!
//! ```text
//!  x     : sample | subject_id | timestep | body_acc_x ... total_acc_z
//!  x_tr  : sample | <feature names from features.txt>
//!  y     : sample | label | name
//! ```

use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

/// Sensor channel categories, in file naming order.
pub const SIGNALS: [&str; 3] = ["body_acc", "body_gyro", "total_acc"];
/// Axes recorded for every signal.
pub const AXES: [&str; 3] = ["x", "y", "z"];

pub const SAMPLE_COL: &str = "sample";
pub const SUBJECT_COL: &str = "subject_id";
pub const TIMESTEP_COL: &str = "timestep";
pub const LABEL_COL: &str = "label";
pub const NAME_COL: &str = "name";

/// Columns acting as the row index of a table.
pub const INDEX_COLUMNS: [&str; 3] = [SAMPLE_COL, SUBJECT_COL, TIMESTEP_COL];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No signal files given")]
    MissingSignals,
    #[error("{table}: expected {expected} rows (one per subject line), found {found}")]
    RowCountMismatch {
        table: String,
        expected: usize,
        found: usize,
    },
    #[error("{signal}: expected {expected} timesteps, found {found}")]
    TimestepMismatch {
        signal: String,
        expected: usize,
        found: usize,
    },
    #[error("Feature matrix has {found} columns but {expected} names were given")]
    FeatureCountMismatch { expected: usize, found: usize },
    #[error("Label {0} has no matching activity")]
    UnknownActivity(i64),
    #[error("Activity code {0} is listed more than once")]
    DuplicateActivity(i64),
}

/// The nine `<signal>_<axis>` names, signal-major.
pub fn signal_names() -> Vec<String> {
    SIGNALS
        .iter()
        .flat_map(|signal| AXES.iter().map(move |axis| format!("{signal}_{axis}")))
        .collect()
}

/// Activity code to name lookup, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityNames {
    entries: Vec<(i64, String)>,
}

impl ActivityNames {
    pub fn new(entries: Vec<(i64, String)>) -> Result<Self, ProcessorError> {
        let mut seen = HashSet::new();
        for (code, _) in &entries {
            if !seen.insert(*code) {
                return Err(ProcessorError::DuplicateActivity(*code));
            }
        }
        Ok(Self { entries })
    }

    pub fn name(&self, code: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.entries.iter().map(|(code, name)| (*code, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds HAR tables from parsed file contents.
pub struct HarProcessor;

impl HarProcessor {
    /// Pivot per-axis signal matrices into one row per (sample, subject, timestep).
    ///
    /// `signals` holds `(name, samples x timesteps)` pairs; each becomes one
    /// output column, in the given order. Rows are sample-major.
    pub fn make_features(
        subjects: &[i64],
        signals: &[(String, Vec<Vec<f64>>)],
    ) -> Result<DataFrame, ProcessorError> {
        let (_, first) = signals.first().ok_or(ProcessorError::MissingSignals)?;
        let n_samples = subjects.len();
        let n_timesteps = first.first().map(|row| row.len()).unwrap_or(0);

        for (name, matrix) in signals {
            if matrix.len() != n_samples {
                return Err(ProcessorError::RowCountMismatch {
                    table: name.clone(),
                    expected: n_samples,
                    found: matrix.len(),
                });
            }
            if let Some(row) = matrix.iter().find(|row| row.len() != n_timesteps) {
                return Err(ProcessorError::TimestepMismatch {
                    signal: name.clone(),
                    expected: n_timesteps,
                    found: row.len(),
                });
            }
        }

        let n_rows = n_samples * n_timesteps;
        let mut samples: Vec<u32> = Vec::with_capacity(n_rows);
        let mut subject_ids: Vec<i64> = Vec::with_capacity(n_rows);
        let mut timesteps: Vec<u32> = Vec::with_capacity(n_rows);

        for (sample, subject) in subjects.iter().enumerate() {
            for timestep in 0..n_timesteps {
                samples.push(sample as u32);
                subject_ids.push(*subject);
                timesteps.push(timestep as u32);
            }
        }

        let mut columns = vec![
            Column::new(SAMPLE_COL.into(), samples),
            Column::new(SUBJECT_COL.into(), subject_ids),
            Column::new(TIMESTEP_COL.into(), timesteps),
        ];

        // Row-major flattening matches the sample-major, timestep-minor row order
        for (name, matrix) in signals {
            let values: Vec<f64> = matrix.iter().flatten().copied().collect();
            columns.push(Column::new(name.as_str().into(), values));
        }

        let df = DataFrame::new(columns)?;
        log::debug!(
            "Pivoted {} signals: {} samples x {} timesteps",
            signals.len(),
            n_samples,
            n_timesteps
        );
        Ok(df)
    }

    /// Name the columns of the precomputed feature matrix.
    ///
    /// Names apply by position. Repeated names get a `_<n>` suffix so every
    /// column stays addressable. The matrix must hold one row per sample.
    pub fn make_features_tr(
        matrix: &[Vec<f64>],
        names: &[String],
        n_samples: usize,
    ) -> Result<DataFrame, ProcessorError> {
        if matrix.len() != n_samples {
            return Err(ProcessorError::RowCountMismatch {
                table: "features".to_string(),
                expected: n_samples,
                found: matrix.len(),
            });
        }
        if let Some(row) = matrix.iter().find(|row| row.len() != names.len()) {
            return Err(ProcessorError::FeatureCountMismatch {
                expected: names.len(),
                found: row.len(),
            });
        }

        let samples: Vec<u32> = (0..matrix.len() as u32).collect();
        let mut columns = vec![Column::new(SAMPLE_COL.into(), samples)];

        for (j, name) in unique_names(names).into_iter().enumerate() {
            let values: Vec<f64> = matrix.iter().map(|row| row[j]).collect();
            columns.push(Column::new(name.into(), values));
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Attach the activity name to every label, one label per sample.
    pub fn make_targets(
        labels: &[i64],
        activities: &ActivityNames,
        n_samples: usize,
    ) -> Result<DataFrame, ProcessorError> {
        if labels.len() != n_samples {
            return Err(ProcessorError::RowCountMismatch {
                table: "labels".to_string(),
                expected: n_samples,
                found: labels.len(),
            });
        }

        let names = labels
            .iter()
            .map(|label| {
                activities
                    .name(*label)
                    .map(str::to_string)
                    .ok_or(ProcessorError::UnknownActivity(*label))
            })
            .collect::<Result<Vec<String>, _>>()?;

        let samples: Vec<u32> = (0..labels.len() as u32).collect();
        let df = DataFrame::new(vec![
            Column::new(SAMPLE_COL.into(), samples),
            Column::new(LABEL_COL.into(), labels.to_vec()),
            Column::new(NAME_COL.into(), names),
        ])?;

        Ok(df)
    }

    /// Non-index column names of a table.
    pub fn value_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| !INDEX_COLUMNS.contains(&name.as_str()))
            .collect()
    }

    /// Rows belonging to one subject.
    pub fn filter_by_subject(
        df: &DataFrame,
        subject_id: i64,
    ) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(SUBJECT_COL).eq(lit(subject_id)))
            .collect()?;
        Ok(filtered)
    }
}

/// Make names unique, keeping the first occurrence of each as is.
fn unique_names(names: &[String]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        let mut candidate = name.clone();
        let mut n = 1;
        while used.contains(&candidate) {
            candidate = format!("{name}_{n}");
            n += 1;
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }

    out
}
