//! HAR Data Loader Module
//! Downloads the UCI HAR archive and builds the train/test tables.

use polars::prelude::*;
use std::fmt;
use thiserror::Error;

use super::archive::{ArchiveError, DatasetArchive};
use super::parser::{self, ParseError};
use super::processor::{signal_names, ActivityNames, HarProcessor, ProcessorError};
use crate::config::LoaderConfig;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("Failed to parse {path}: {source}")]
    Parse { path: String, source: ParseError },
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Dataset partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subset {
    Train,
    Test,
}

impl Subset {
    pub const ALL: [Subset; 2] = [Subset::Train, Subset::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subset::Train => "train",
            Subset::Test => "test",
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three tables built for one subset.
#[derive(Debug, Clone)]
pub struct SubsetTables {
    /// Raw inertial signals, one row per (sample, subject, timestep).
    pub x: DataFrame,
    /// Precomputed features, one row per sample.
    pub x_tr: DataFrame,
    /// Activity labels with their names.
    pub y: DataFrame,
}

/// Shape of one loaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableShape {
    pub subset: Subset,
    pub table: &'static str,
    pub rows: usize,
    pub columns: usize,
}

/// Loads the UCI HAR dataset into memory.
pub struct HarDataLoader {
    config: LoaderConfig,
    activities: Option<ActivityNames>,
    train: Option<SubsetTables>,
    test: Option<SubsetTables>,
}

impl Default for HarDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HarDataLoader {
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            activities: None,
            train: None,
            test: None,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Download the dataset and build all six tables.
    pub fn load(&mut self) -> Result<(), LoaderError> {
        let bytes = DatasetArchive::fetch(&self.config.url)?;
        self.load_from_bytes(bytes)
    }

    /// Build all six tables from an already downloaded archive.
    ///
    /// Tables are replaced only when every subset was built successfully.
    pub fn load_from_bytes(&mut self, bytes: Vec<u8>) -> Result<(), LoaderError> {
        let mut archive = DatasetArchive::open_nested(bytes, &self.config.inner_archive)?;

        let path = self.config.entry_path("activity_labels.txt");
        let activities = ActivityNames::new(self.read_names(&mut archive, &path)?)?;
        for (code, name) in activities.iter() {
            log::debug!("Activity {code}: {name}");
        }

        let train = self.build_subset(&mut archive, Subset::Train, &activities)?;
        let test = self.build_subset(&mut archive, Subset::Test, &activities)?;

        self.activities = Some(activities);
        self.train = Some(train);
        self.test = Some(test);

        for shape in self.summary() {
            log::info!(
                "{} {}: {} rows x {} columns",
                shape.subset,
                shape.table,
                shape.rows,
                shape.columns
            );
        }
        Ok(())
    }

    fn build_subset(
        &self,
        archive: &mut DatasetArchive,
        subset: Subset,
        activities: &ActivityNames,
    ) -> Result<SubsetTables, LoaderError> {
        log::info!("Building {subset} tables");

        // One subject line per sample; every table is checked against it
        let s = subset.as_str();
        let path = self.config.entry_path(&format!("{s}/subject_{s}.txt"));
        let subjects = self.read_ints(archive, &path)?;

        Ok(SubsetTables {
            x: self.make_features(archive, subset, &subjects)?,
            x_tr: self.make_features_tr(archive, subset, subjects.len())?,
            y: self.make_targets(archive, subset, activities, subjects.len())?,
        })
    }

    fn make_features(
        &self,
        archive: &mut DatasetArchive,
        subset: Subset,
        subjects: &[i64],
    ) -> Result<DataFrame, LoaderError> {
        let s = subset.as_str();
        let mut signals = Vec::with_capacity(9);
        for name in signal_names() {
            let path = self
                .config
                .entry_path(&format!("{s}/Inertial Signals/{name}_{s}.txt"));
            let matrix = self.read_matrix(archive, &path)?;
            signals.push((name, matrix));
        }

        Ok(HarProcessor::make_features(subjects, &signals)?)
    }

    fn make_features_tr(
        &self,
        archive: &mut DatasetArchive,
        subset: Subset,
        n_samples: usize,
    ) -> Result<DataFrame, LoaderError> {
        let s = subset.as_str();
        let path = self.config.entry_path("features.txt");
        let names: Vec<String> = self
            .read_names(archive, &path)?
            .into_iter()
            .map(|(_, name)| name)
            .collect();

        let path = self.config.entry_path(&format!("{s}/X_{s}.txt"));
        let matrix = self.read_matrix(archive, &path)?;

        Ok(HarProcessor::make_features_tr(&matrix, &names, n_samples)?)
    }

    fn make_targets(
        &self,
        archive: &mut DatasetArchive,
        subset: Subset,
        activities: &ActivityNames,
        n_samples: usize,
    ) -> Result<DataFrame, LoaderError> {
        let s = subset.as_str();
        let path = self.config.entry_path(&format!("{s}/y_{s}.txt"));
        let labels = self.read_ints(archive, &path)?;

        Ok(HarProcessor::make_targets(&labels, activities, n_samples)?)
    }

    fn read_matrix(
        &self,
        archive: &mut DatasetArchive,
        path: &str,
    ) -> Result<Vec<Vec<f64>>, LoaderError> {
        let text = archive.read_text(path)?;
        parser::parse_matrix(&text).map_err(|source| parse_error(path, source))
    }

    fn read_ints(&self, archive: &mut DatasetArchive, path: &str) -> Result<Vec<i64>, LoaderError> {
        let text = archive.read_text(path)?;
        parser::parse_int_column(&text).map_err(|source| parse_error(path, source))
    }

    fn read_names(
        &self,
        archive: &mut DatasetArchive,
        path: &str,
    ) -> Result<Vec<(i64, String)>, LoaderError> {
        let text = archive.read_text(path)?;
        parser::parse_name_table(&text).map_err(|source| parse_error(path, source))
    }

    /// Whether `load` has completed successfully.
    pub fn is_loaded(&self) -> bool {
        self.train.is_some() && self.test.is_some()
    }

    /// All tables of a subset.
    pub fn tables(&self, subset: Subset) -> Option<&SubsetTables> {
        match subset {
            Subset::Train => self.train.as_ref(),
            Subset::Test => self.test.as_ref(),
        }
    }

    /// Raw signal table of a subset.
    pub fn features(&self, subset: Subset) -> Option<&DataFrame> {
        self.tables(subset).map(|t| &t.x)
    }

    /// Precomputed feature table of a subset.
    pub fn features_tr(&self, subset: Subset) -> Option<&DataFrame> {
        self.tables(subset).map(|t| &t.x_tr)
    }

    /// Label table of a subset.
    pub fn targets(&self, subset: Subset) -> Option<&DataFrame> {
        self.tables(subset).map(|t| &t.y)
    }

    pub fn activity_names(&self) -> Option<&ActivityNames> {
        self.activities.as_ref()
    }

    /// Shapes of every loaded table, train first.
    pub fn summary(&self) -> Vec<TableShape> {
        let mut shapes = Vec::new();
        for subset in Subset::ALL {
            let Some(tables) = self.tables(subset) else {
                continue;
            };
            for (table, df) in [("x", &tables.x), ("x_tr", &tables.x_tr), ("y", &tables.y)] {
                let (rows, columns) = df.shape();
                shapes.push(TableShape {
                    subset,
                    table,
                    rows,
                    columns,
                });
            }
        }
        shapes
    }
}

fn parse_error(path: &str, source: ParseError) -> LoaderError {
    LoaderError::Parse {
        path: path.to_string(),
        source,
    }
}
