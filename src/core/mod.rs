pub mod projector;
pub mod query;
pub mod transport;
pub mod view;

pub use crate::domain::model::{ActivationRecord, LoadState, RawBinding, RawResultSet};
pub use crate::domain::ports::{ConfigProvider, QueryTransport, Storage};
pub use crate::utils::error::Result;
