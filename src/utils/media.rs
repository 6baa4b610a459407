/// Largest upload the conversion service accepts.
pub const MAX_UPLOAD_BYTES: u64 = (2.2 * 1024.0 * 1024.0) as u64; // 2.2MB

/// Media types the conversion service can turn into an endcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
    Mp4,
}

impl MediaType {
    /// Declared type is derived from the file extension, matching the
    /// server's allowlist of {jpg, jpeg, png, mp4}.
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "png" => Some(MediaType::Png),
            "mp4" => Some(MediaType::Mp4),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Mp4 => "video/mp4",
        }
    }

    pub fn is_video(self) -> bool {
        matches!(self, MediaType::Mp4)
    }
}

pub fn format_size(size: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
