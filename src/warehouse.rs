//! Local warehouse directory used as the data root of the integration tests.

use crate::error::Result;
use crate::layout::FixtureLayout;
use std::path::PathBuf;
use tracing::{debug, info};

pub fn warehouse_dir(layout: &FixtureLayout) -> PathBuf {
    layout.warehouse_dir()
}

/// Create the warehouse directory if it is missing. Safe to call repeatedly.
pub async fn ensure_warehouse(layout: &FixtureLayout) -> Result<PathBuf> {
    let dir = warehouse_dir(layout);
    debug!("Ensuring warehouse directory: {}", dir.display());

    let existed = tokio::fs::metadata(&dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    tokio::fs::create_dir_all(&dir).await?;

    if !existed {
        info!("Created warehouse directory: {}", dir.display());
    }
    Ok(dir)
}
