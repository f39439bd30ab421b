//! Turn a tree of CUDA/C++ sources into cleaned copies plus a JSON dataset
//! of fill-in-the-middle training records.
//!
//! ## Main Components
//!
//! - `cleaner`: regex stripping of comments, license headers, pragmas and IDE guards
//! - `fim`: dataset record construction and the randomized FIM split
//! - `walker`: source file discovery
//! - `pipeline`: per-file processing and the full run
//! - `dataset`: aggregate JSON output
//! - `config`: YAML + environment configuration

pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod fim;
pub mod pipeline;
pub mod types;
pub mod utils;
pub mod walker;

pub use cleaner::clean;
pub use config::AppConfig;
pub use fim::build_record;
pub use types::{DatasetRecord, FimSplit};
