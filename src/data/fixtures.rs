//! Synthetic dataset archives for tests.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

use super::processor::signal_names;

pub const INNER: &str = "UCI HAR Dataset.zip";
pub const ROOT: &str = "UCI HAR Dataset";

/// Build an in-memory zip with the given entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Text file with one whitespace-separated row per inner vec.
pub fn matrix_text(rows: &[Vec<f64>]) -> String {
    rows.iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:e}")).collect();
            format!("  {}\n", cells.join("  "))
        })
        .collect()
}

/// Contents of one subset of a synthetic dataset.
pub struct SubsetFixture {
    pub subjects: Vec<i64>,
    pub labels: Vec<i64>,
    /// One `samples x timesteps` matrix per signal, in `signal_names()` order.
    pub signals: Vec<Vec<Vec<f64>>>,
    /// `samples x features` matrix.
    pub features: Vec<Vec<f64>>,
}

impl SubsetFixture {
    /// Signal `k` at (sample, timestep) is `k * 100 + sample * 10 + timestep`.
    pub fn generated(
        subjects: Vec<i64>,
        labels: Vec<i64>,
        timesteps: usize,
        n_features: usize,
    ) -> Self {
        let samples = subjects.len();
        let signals = (0..9)
            .map(|k| {
                (0..samples)
                    .map(|s| {
                        (0..timesteps)
                            .map(|t| (k * 100 + s * 10 + t) as f64)
                            .collect::<Vec<f64>>()
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        let features = (0..samples)
            .map(|s| {
                (0..n_features)
                    .map(|f| s as f64 + f as f64 / 10.0)
                    .collect::<Vec<f64>>()
            })
            .collect();

        Self {
            subjects,
            labels,
            signals,
            features,
        }
    }
}

pub const ACTIVITY_LABELS: &str = "1 WALKING\n2 WALKING_UPSTAIRS\n3 WALKING_DOWNSTAIRS\n4 SITTING\n5 STANDING\n6 LAYING\n";

/// Entries of the inner archive for the given subsets.
pub fn dataset_entries(
    feature_names: &str,
    subsets: &[(&str, &SubsetFixture)],
) -> Vec<(String, Vec<u8>)> {
    let mut entries = vec![
        (
            format!("{ROOT}/activity_labels.txt"),
            ACTIVITY_LABELS.as_bytes().to_vec(),
        ),
        (format!("{ROOT}/features.txt"), feature_names.as_bytes().to_vec()),
    ];

    for (subset, fixture) in subsets {
        entries.push((
            format!("{ROOT}/{subset}/subject_{subset}.txt"),
            int_lines(&fixture.subjects),
        ));
        entries.push((format!("{ROOT}/{subset}/y_{subset}.txt"), int_lines(&fixture.labels)));
        entries.push((
            format!("{ROOT}/{subset}/X_{subset}.txt"),
            matrix_text(&fixture.features).into_bytes(),
        ));
        for (name, matrix) in signal_names().iter().zip(&fixture.signals) {
            entries.push((
                format!("{ROOT}/{subset}/Inertial Signals/{name}_{subset}.txt"),
                matrix_text(matrix).into_bytes(),
            ));
        }
    }

    entries
}

fn int_lines(values: &[i64]) -> Vec<u8> {
    values
        .iter()
        .map(|v| format!("{v}\n"))
        .collect::<String>()
        .into_bytes()
}

/// Outer archive bytes wrapping the nested dataset archive.
pub fn dataset_archive(entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    let borrowed: Vec<(&str, &[u8])> = entries
        .iter()
        .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
        .collect();
    let inner = zip_bytes(&borrowed);
    zip_bytes(&[(INNER, inner.as_slice())])
}

/// `features.txt` content with `n` distinct names.
pub fn feature_names(n: usize) -> String {
    (0..n)
        .map(|i| format!("{} tFeature-{}()\n", i + 1, i))
        .collect()
}
