pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::render::OutputFormat;
pub use config::{storage::LocalStorage, AppConfig};
pub use core::{
    projector::project,
    query::activations_query,
    transport::SparqlClient,
    view::{ActivationsView, CancelHandle, CancelToken},
};
pub use domain::model::{ActivationRecord, LoadState, RawBinding, RawResultSet};
pub use utils::error::{ActivationError, Result};
