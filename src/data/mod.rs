//! Data module - archive access, parsing and table construction

mod archive;
#[cfg(test)]
mod fixtures;
mod loader;
mod parser;
mod processor;

pub use archive::{ArchiveError, DatasetArchive};
pub use loader::{HarDataLoader, LoaderError, Subset, SubsetTables, TableShape};
pub use parser::{parse_int_column, parse_matrix, parse_name_table, ParseError};
pub use processor::{
    signal_names, ActivityNames, HarProcessor, ProcessorError, AXES, INDEX_COLUMNS, LABEL_COL,
    NAME_COL, SAMPLE_COL, SIGNALS, SUBJECT_COL, TIMESTEP_COL,
};
