use anyhow::{Context, Result, anyhow, bail};
use log::debug;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Local file header signature every zip archive starts with.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Whether `bytes` look like a zip archive.
pub fn is_zip(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC)
}

/// Extract the executable named `binary_name` from a zip archive held in memory.
///
/// The nightly artifacts wrap a single file, either named exactly like the
/// binary or with a platform suffix (`bbctl-linux-amd64`). A sole file entry
/// is taken regardless of its name.
pub fn extract_binary(bytes: &[u8], binary_name: &str) -> Result<Vec<u8>> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).with_context(|| "Failed to parse ZIP archive")?;

    let mut files = Vec::new();
    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to read ZIP entry {}", i))?;
        if entry.is_dir() {
            continue;
        }
        let Some(name) = entry
            .enclosed_name()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        else {
            debug!("Skipping entry with invalid path");
            continue;
        };
        files.push((i, name));
    }

    let index = match files.as_slice() {
        [] => bail!("Archive appears to be empty."),
        [(index, _)] => *index,
        _ => files
            .iter()
            .find(|(_, name)| name == binary_name)
            .or_else(|| {
                files
                    .iter()
                    .find(|(_, name)| name.starts_with(&format!("{}-", binary_name)))
            })
            .map(|(index, _)| *index)
            .ok_or_else(|| {
                let names: Vec<_> = files.iter().map(|(_, name)| name.as_str()).collect();
                anyhow!(
                    "No {} executable in archive (entries: {})",
                    binary_name,
                    names.join(", ")
                )
            })?,
    };

    let mut entry = archive.by_index(index)?;
    debug!(
        "Extracting {:?} ({} bytes)",
        entry.enclosed_name().as_deref().unwrap_or(Path::new("?")),
        entry.size()
    );
    let mut contents = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut contents)
        .context("Failed to extract executable from archive")?;
    Ok(contents)
}
