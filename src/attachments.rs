//! Attachment extraction.
//!
//! LastPass CSV imports cannot carry binaries, so every file and image
//! attachment is dumped under `attachments/` for a manual import pass.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::model::Card;

pub const ATTACHMENTS_DIR: &str = "attachments";

/// Dump every attachment on a card, keyed by the emitted record's name.
/// Cards that emit several sites get their attachments dumped once per site,
/// under each site's name.
pub fn dump_card(card: &Card, record_name: &str) -> Result<()> {
    for (i, file) in card.files.iter().enumerate() {
        let name = file_name(record_name, i, &file.name);
        dump(&name, &file.data)?;
        warn!(id = %card.id, record = record_name, file = %name, "file attachment saved");
    }
    for (i, image) in card.images.iter().enumerate() {
        let name = image_name(record_name, i);
        dump(&name, &image.data)?;
        warn!(id = %card.id, record = record_name, file = %name, "image attachment saved");
    }
    Ok(())
}

pub fn file_name(record_name: &str, index: usize, original: &str) -> String {
    escape_filename(&format!("{}_{}_{}", record_name, index, original))
}

/// SafeInCloud re-encodes all images as JPEG, losing the original filename,
/// so the record name and index are all there is to go on.
pub fn image_name(record_name: &str, index: usize) -> String {
    escape_filename(&format!("{}_{}.jpg", record_name, index))
}

fn dump(filename: &str, data: &[u8]) -> Result<()> {
    let dir = ensure_dir()?;
    let path = dir.join(filename);
    fs::write(&path, data).with_context(|| format!("failed to write {}", path.display()))
}

fn ensure_dir() -> Result<PathBuf> {
    let dir = Path::new(ATTACHMENTS_DIR);
    if !dir.exists() {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder
            .create(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    Ok(dir.to_path_buf())
}

/// Percent-escape a filename, keeping literal spaces readable.
fn escape_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for b in name.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b' ' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
