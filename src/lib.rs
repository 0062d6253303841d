//! Video game sales dashboard.
//!
//! Loads a sales table once, filters it by genre and year range, and builds
//! five declarative chart specs from the result. The native window
//! (`vgsales-dashboard`) and the local web server (`vgsales-server`, feature
//! `server`) are thin front ends over [`charts::Dashboard::build`].

pub mod charts;
pub mod data;

pub use charts::{ChartBody, ChartKind, ChartSpec, Dashboard};
pub use data::filter::{FilterCriteria, FilteredView, filter, filter_with};
pub use data::loader::{DEFAULT_DATASET_PATH, load_file};
pub use data::model::{Dataset, Record, Region};

// Local HTTP front end - only when server feature is enabled
#[cfg(feature = "server")]
pub mod server;
