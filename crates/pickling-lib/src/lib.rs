// pickling-lib: JSON pickling adapter shared by the library API and the CLI

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod json;
pub mod logger;
pub mod registry;

pub use archive::{ArchiveOptions, Indent};
pub use errors::{PicklingError, Result};
pub use json::{
    deserialize, deserialize_into, serialize, serialize_pretty, serialize_with, Pickle, LABEL,
};
pub use registry::{Reduction, Registry};
