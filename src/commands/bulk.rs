//! Bulk download command implementation

use std::path::PathBuf;

use crate::{BulkDataset, BulkFileFormat, Result, SwcClient};

/// Path: ~/.cache/swc-client/{dataset}.{ext}
pub fn default_output_path(dataset: BulkDataset, format: BulkFileFormat) -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("swc-client").join(dataset.file_name(format))
}

/// Download `dataset` and return where it was written.
pub async fn download(
    client: &SwcClient,
    dataset: BulkDataset,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let format = client.config().bulk_file_format();
    let path = output.unwrap_or_else(|| default_output_path(dataset, format));
    client.get_bulk_file(dataset, &path).await?;
    Ok(path)
}

/// Handle the bulk command
pub async fn handle_bulk(
    client: &SwcClient,
    dataset: BulkDataset,
    output: Option<PathBuf>,
) -> Result<()> {
    let path = download(client, dataset, output).await?;
    println!("✓ {} written to {}", dataset.file_stem(), path.display());
    Ok(())
}
