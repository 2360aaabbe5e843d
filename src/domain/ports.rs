use crate::domain::model::RawResultSet;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}

/// Sends a query to a SPARQL service and returns its tabular JSON result.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn fetch_results(&self, query: &str) -> Result<RawResultSet>;
}
