use async_trait::async_trait;
use models::SaleRecord;
use std::path::{Path, PathBuf};

use crate::error::{ApiError, Result};

/// Repository trait for accessing sale records
/// This abstraction allows swapping the CSV file for another record source
#[async_trait]
pub trait SalesRepository: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<SaleRecord>>;
}

/// File-based implementation that reads the CSV sales export
pub struct FileSalesRepository {
    data_path: PathBuf,
}

impl FileSalesRepository {
    pub fn new<P: AsRef<Path>>(data_path: P) -> Self {
        Self {
            data_path: data_path.as_ref().to_path_buf(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

#[async_trait]
impl SalesRepository for FileSalesRepository {
    /// Reads the file fresh on every call; reports are never cached.
    async fn fetch_records(&self) -> Result<Vec<SaleRecord>> {
        let content = tokio::fs::read(&self.data_path)
            .await
            .map_err(ApiError::SourceUnavailable)?;
        let records = data_import::parse_sales_csv(content.as_slice())?;
        tracing::debug!(
            path = %self.data_path.display(),
            records = records.len(),
            "loaded sales records"
        );
        Ok(records)
    }
}
