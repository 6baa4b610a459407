use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ClientError;
use crate::upload::{Orientation, Payload};

/// Naming scheme for saved endcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Oriented(Orientation),
    /// Single rotatable document covering both orientations.
    Rotatable,
}

/// `ad.png` + landscape -> `ad_landscape.html`; a rotatable document
/// saves as `ad_endcard.html`.
pub fn download_file_name(source_filename: &str, kind: DownloadKind) -> String {
    let base = source_filename
        .rsplit_once('.')
        .map(|(base, _)| base)
        .unwrap_or(source_filename);
    let suffix = match kind {
        DownloadKind::Oriented(orientation) => orientation.as_str(),
        DownloadKind::Rotatable => "endcard",
    };
    format!("{}_{}.html", base, suffix)
}

/// Writes the payload under its download name inside `dest_dir`.
pub fn save_payload(
    payload: &Payload,
    kind: DownloadKind,
    dest_dir: &Path,
) -> Result<PathBuf, ClientError> {
    if payload.filename.is_empty() || payload.html.is_empty() {
        return Err(ClientError::MissingPayload);
    }

    let path = dest_dir.join(download_file_name(&payload.filename, kind));
    fs::write(&path, &payload.html)?;
    println!("Saved endcard to {}", path.display());
    Ok(path)
}

/// Writes the payload to an explicit destination the user picked.
pub fn save_payload_as(payload: &Payload, dest: &Path) -> Result<(), ClientError> {
    if payload.filename.is_empty() || payload.html.is_empty() {
        return Err(ClientError::MissingPayload);
    }

    fs::write(dest, &payload.html)?;
    println!("Saved endcard to {}", dest.display());
    Ok(())
}
