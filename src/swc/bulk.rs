//! Bulk dataset downloads
//!
//! A bulk file is a full snapshot of one dataset, published at a fixed location
//! outside the API itself. The configured [`BulkFileFormat`] decides which file is
//! requested and how its bytes are sanity-checked. The bytes are written to disk
//! unchanged.

use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tempfile::TempPath;
use tracing::info;

use crate::core::decode::check_status;
use crate::core::http::TransportRequest;
use crate::error::{Result, SwcError};
use crate::swc::client::SwcClient;


const PARQUET_MAGIC: &[u8] = b"PAR1";
/// Header magic, 4-byte footer length, footer magic.
const PARQUET_MIN_LEN: usize = 12;
/// How much of a CSV body is checked for UTF-8.
const CSV_SNIFF_BYTES: usize = 4096;

/// On-disk format of a bulk file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum BulkFileFormat {
    /// Row-oriented text
    #[default]
    Csv,
    /// Columnar binary
    Parquet,
}

impl BulkFileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            BulkFileFormat::Csv => "csv",
            BulkFileFormat::Parquet => "parquet",
        }
    }

    /// Location of `dataset` in this format under `base_url`.
    pub fn url_for(&self, base_url: &str, dataset: BulkDataset) -> String {
        format!(
            "{}/{}.{}",
            base_url.trim_end_matches('/'),
            dataset.file_stem(),
            self.extension()
        )
    }

    /// Reject a body that cannot be a file of this format.
    ///
    /// This only guards against obviously wrong payloads (an HTML error page, the
    /// other format); it does not parse the file.
    pub fn validate(&self, body: &[u8], content_type: Option<&str>) -> Result<()> {
        let reject = |reason: &str| {
            Err(SwcError::BulkContent {
                format: *self,
                reason: reason.to_string(),
            })
        };

        if content_type.is_some_and(|ct| ct.trim_start().starts_with("text/html")) {
            return reject("server returned an HTML page");
        }

        match self {
            BulkFileFormat::Parquet => {
                if body.len() < PARQUET_MIN_LEN {
                    return reject("body is too short to be a parquet file");
                }
                if !body.starts_with(PARQUET_MAGIC) || !body.ends_with(PARQUET_MAGIC) {
                    return reject("missing PAR1 magic bytes");
                }
                Ok(())
            }
            BulkFileFormat::Csv => {
                if body.is_empty() {
                    return reject("body is empty");
                }
                if body.starts_with(PARQUET_MAGIC) {
                    return reject("body is a parquet file");
                }
                let sniff = &body[..body.len().min(CSV_SNIFF_BYTES)];
                match std::str::from_utf8(sniff) {
                    Ok(_) => Ok(()),
                    // Cut mid-character at the sniff boundary
                    Err(e) if e.error_len().is_none() => Ok(()),
                    Err(_) => reject("body is not UTF-8 text"),
                }
            }
        }
    }
}

impl fmt::Display for BulkFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for BulkFileFormat {
    type Err = SwcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(BulkFileFormat::Csv),
            "parquet" => Ok(BulkFileFormat::Parquet),
            _ => Err(SwcError::config(format!(
                "bulk_file_format must be csv or parquet, got {s:?}"
            ))),
        }
    }
}

/// Datasets published as bulk files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum BulkDataset {
    Player,
    League,
    Performance,
    Team,
    TeamPlayer,
}

impl BulkDataset {
    pub fn file_stem(&self) -> &'static str {
        match self {
            BulkDataset::Player => "player_data",
            BulkDataset::League => "league_data",
            BulkDataset::Performance => "performance_data",
            BulkDataset::Team => "team_data",
            BulkDataset::TeamPlayer => "team_player_data",
        }
    }

    /// `player_data.csv`, `league_data.parquet`, ...
    pub fn file_name(&self, format: BulkFileFormat) -> String {
        format!("{}.{}", self.file_stem(), format.extension())
    }
}

/// Unique sibling file the download is staged in before it is renamed into place.
///
/// The file is removed when the returned handle is dropped without being persisted.
fn staging_file(path: &Path) -> Result<TempPath> {
    let name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} does not name a file", path.display()),
        )
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut prefix = OsString::from(".");
    prefix.push(name);
    prefix.push(".");
    let staged = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".part")
        .tempfile_in(dir)?;
    Ok(staged.into_temp_path())
}

/// Write `bytes` to `path`, creating parent directories.
///
/// The data lands in a uniquely named `.part` sibling first and is renamed over
/// `path`, so `path` never holds a partial file and concurrent writers to the
/// same path never share a staging file.
async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let staging = staging_file(path)?;
    tokio::fs::write(&staging, bytes).await?;
    staging.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl SwcClient {
    /// Download `dataset` in the configured format and write it to `file_path`.
    ///
    /// Completion is signalled by the file existing; nothing is returned.
    pub async fn get_bulk_file(&self, dataset: BulkDataset, file_path: impl AsRef<Path>) -> Result<()> {
        let file_path = file_path.as_ref();
        let format = self.config.bulk_file_format();
        let url = format.url_for(self.config.bulk_file_base_url(), dataset);
        let label = dataset.file_name(format);

        let request = TransportRequest::get(url, self.config.timeout());
        let body = self
            .execute(&label, request, |response| {
                check_status(response.status, &response.body)?;
                format.validate(&response.body, response.content_type())?;
                Ok(response.body)
            })
            .await?;

        write_file(file_path, &body).await?;
        info!(
            "Wrote {} ({} bytes) to {}",
            label,
            body.len(),
            file_path.display()
        );
        Ok(())
    }

    pub async fn get_bulk_player_file(&self, file_path: impl AsRef<Path>) -> Result<()> {
        self.get_bulk_file(BulkDataset::Player, file_path).await
    }

    pub async fn get_bulk_league_file(&self, file_path: impl AsRef<Path>) -> Result<()> {
        self.get_bulk_file(BulkDataset::League, file_path).await
    }

    pub async fn get_bulk_performance_file(&self, file_path: impl AsRef<Path>) -> Result<()> {
        self.get_bulk_file(BulkDataset::Performance, file_path).await
    }

    pub async fn get_bulk_team_file(&self, file_path: impl AsRef<Path>) -> Result<()> {
        self.get_bulk_file(BulkDataset::Team, file_path).await
    }

    pub async fn get_bulk_team_player_file(&self, file_path: impl AsRef<Path>) -> Result<()> {
        self.get_bulk_file(BulkDataset::TeamPlayer, file_path).await
    }
}
