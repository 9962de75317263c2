// Ingestion - turns files on disk into the text the engine analyzes.
//
// The engine only ever sees a fully decoded string. Anything that cannot be
// decoded into readable text is handed over as empty content.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[cfg(feature = "ingest")]
use crate::error::{Error, Result};
#[cfg(feature = "ingest")]
use std::path::Path;
#[cfg(feature = "ingest")]
use tracing::{error, info};

/// Share of control characters above which a buffer is treated as binary.
const BINARY_CONTROL_RATIO: f64 = 0.1;

/// A log file ready for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogInput {
    pub file_name: String,
    pub file_size: u64,
    pub content: String,
}

impl LogInput {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            file_name: file_name.into(),
            file_size: content.len() as u64,
            content,
        }
    }
}

/// Read and decode a log file, rejecting files over `max_size` bytes.
#[cfg(feature = "ingest")]
pub async fn read_log_file(path: impl AsRef<Path>, max_size: u64) -> Result<LogInput> {
    let path = path.as_ref();
    info!("Reading log file: {}", path.display());

    let ingestion_error = |source| Error::Ingestion {
        path: path.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        error!("Failed to stat {}: {}", path.display(), e);
        ingestion_error(e)
    })?;
    if metadata.len() > max_size {
        warn!(
            "Refusing {}: {} bytes exceeds limit of {}",
            path.display(),
            metadata.len(),
            max_size
        );
        return Err(Error::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: max_size,
        });
    }

    let data = tokio::fs::read(path).await.map_err(|e| {
        error!("Failed to read file {}: {}", path.display(), e);
        ingestion_error(e)
    })?;
    debug!("Read {} bytes from file {}", data.len(), path.display());

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(LogInput {
        file_name,
        file_size: data.len() as u64,
        content: decode_log_bytes(&data),
    })
}

/// Decode raw bytes into text.
///
/// A byte-order mark selects UTF-8 or UTF-16. Without one, valid UTF-8 is used
/// as-is and anything else is read as Windows-1252 (a superset of ISO-8859-1).
/// Binary data yields an empty string.
pub fn decode_log_bytes(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    if let Some((encoding, bom_length)) = Encoding::for_bom(data) {
        debug!("Detected {} byte-order mark", encoding.name());
        let (text, had_errors) = encoding.decode_without_bom_handling(&data[bom_length..]);
        if had_errors {
            warn!("Replaced malformed {} sequences while decoding", encoding.name());
        }
        return text.into_owned();
    }

    if is_binary(data) {
        warn!("Input looks binary ({} bytes), treating it as empty", data.len());
        return String::new();
    }

    let (text, had_errors) = UTF_8.decode_without_bom_handling(data);
    if !had_errors {
        return text.into_owned();
    }

    debug!("Input is not valid UTF-8, falling back to {}", WINDOWS_1252.name());
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(data);
    text.into_owned()
}

fn is_binary(data: &[u8]) -> bool {
    let sample = &data[..data.len().min(2048)];
    let control_chars = sample
        .iter()
        .filter(|&&byte| byte < 0x20 && !matches!(byte, b'\t' | b'\n' | b'\r'))
        .count();

    control_chars as f64 / sample.len() as f64 > BINARY_CONTROL_RATIO
}
