use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ClientError;
use crate::utils::media::{format_size, MediaType, MAX_UPLOAD_BYTES};

/// Display mode for an endcard. Portrait is the initial state and the
/// state every successful conversion falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    pub fn mode_label(self) -> &'static str {
        match self {
            Orientation::Portrait => "Portrait Mode",
            Orientation::Landscape => "Landscape Mode",
        }
    }

    /// Multipart field name for this orientation's upload slot.
    pub fn field_name(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait_file",
            Orientation::Landscape => "landscape_file",
        }
    }
}

/// One converted endcard: the HTML document plus the source filename the
/// server reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub html: String,
    pub filename: String,
}

/// The server-side conversion record the client is editing. Replaced
/// wholesale on every successful upload response.
#[derive(Debug, Clone, Default)]
pub struct EndcardRecord {
    /// Assigned by the server on first upload; sent back afterwards so the
    /// server updates instead of creating a new record.
    pub endcard_id: Option<String>,
    pub portrait: Option<Payload>,
    pub landscape: Option<Payload>,
    /// Single-HTML variant: one document serves both orientations.
    pub rotatable: bool,
}

impl EndcardRecord {
    pub fn payload_for(&self, orientation: Orientation) -> Option<&Payload> {
        match orientation {
            Orientation::Portrait => self.portrait.as_ref(),
            Orientation::Landscape => self.landscape.as_ref(),
        }
    }

    pub fn has_payload(&self) -> bool {
        self.portrait.is_some() || self.landscape.is_some()
    }

    pub fn has_both(&self) -> bool {
        !self.rotatable && self.portrait.is_some() && self.landscape.is_some()
    }
}

/// Rejects anything the server would bounce, before a request is made.
pub fn validate_media(filename: &str, size: u64) -> Result<MediaType, ClientError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ClientError::Validation(format!(
            "File size ({}) exceeds the 2.2MB limit",
            format_size(size)
        )));
    }

    MediaType::from_filename(filename).ok_or_else(|| {
        ClientError::Validation(
            "Invalid file type. Please upload a JPEG, PNG, or MP4 file".to_string(),
        )
    })
}

/// A file picked for upload. Validated when picked and again before
/// submission so nothing oversized or mistyped reaches the wire.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
    pub media_type: MediaType,
}

impl MediaFile {
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::Validation("Invalid filename".to_string()))?
            .to_string();

        let size = fs::metadata(path)?.len();
        let media_type = validate_media(&filename, size)?;

        Ok(Self {
            path: path.to_path_buf(),
            filename,
            size,
            media_type,
        })
    }
}

/// Which upload slots the user filled.
#[derive(Debug, Clone)]
pub enum FileSelection {
    /// One file the server converts into both orientations.
    Combined(MediaFile),
    /// Separate creatives per orientation; either slot may be empty.
    Split {
        portrait: Option<MediaFile>,
        landscape: Option<MediaFile>,
    },
}

impl FileSelection {
    pub fn files(&self) -> Vec<&MediaFile> {
        match self {
            FileSelection::Combined(file) => vec![file],
            FileSelection::Split {
                portrait,
                landscape,
            } => portrait.iter().chain(landscape.iter()).collect(),
        }
    }

    /// Filename used when the server response carries no file info.
    pub fn fallback_filename(&self) -> String {
        self.files()
            .first()
            .map(|f| f.filename.clone())
            .unwrap_or_else(|| "endcard".to_string())
    }
}
