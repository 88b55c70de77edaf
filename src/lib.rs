//! HAR Loader - UCI Human Activity Recognition dataset as Polars tables
//!
//! Downloads the dataset archive, opens the zip nested inside it and builds,
//! for both the train and test subsets:
//! - `x`: raw inertial signals, one row per (sample, subject, timestep)
//! - `x_tr`: the 561 precomputed features, one row per sample
//! - `y`: activity labels joined with their names

pub mod config;
pub mod data;

pub use config::LoaderConfig;
pub use data::{HarDataLoader, LoaderError, Subset};
