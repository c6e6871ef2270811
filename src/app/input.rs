//! Domain list input.

use std::path::Path;

use log::info;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::STDIN_PATH;
use crate::error_handling::FileError;

/// Reads domains from `path`, one per line. `-` reads stdin.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
/// Domains are not validated here.
///
/// # Errors
///
/// Returns [`FileError::NotFound`] if the file does not exist and
/// [`FileError::Read`] if it cannot be read.
pub async fn read_domains(path: &Path) -> Result<Vec<String>, FileError> {
    if path.as_os_str() == STDIN_PATH {
        info!("Reading domains from stdin");
        let reader = BufReader::new(tokio::io::stdin());
        return collect_domains(reader).await.map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        });
    }

    let file = tokio::fs::File::open(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FileError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FileError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let domains = collect_domains(BufReader::new(file))
        .await
        .map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Read {} domain(s) from {}", domains.len(), path.display());
    Ok(domains)
}

async fn collect_domains<R>(reader: R) -> std::io::Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut domains = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        domains.push(trimmed.to_string());
    }
    Ok(domains)
}
