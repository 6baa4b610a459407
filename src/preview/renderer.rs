use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use super::bridge::inject_bridge;
use crate::error::ClientError;
use crate::upload::{Orientation, Payload};

// Process-wide so two renderers can never hand out the same path.
static RENDER_SEQ: AtomicU64 = AtomicU64::new(1);

/// Materializes preview documents in a per-process temp directory and
/// opens them in the system browser. Every render writes a fresh document
/// and deletes the superseded one, so no bridge state survives a
/// re-render and stale files don't pile up.
pub struct PreviewRenderer {
    preview_dir: PathBuf,
    last_rendered: Option<PathBuf>,
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self {
            preview_dir: std::env::temp_dir()
                .join(format!("endcard_preview_{}", std::process::id())),
            last_rendered: None,
        }
    }

    /// Builds the preview document for the payload and writes it to disk,
    /// returning its path.
    pub fn write_document(
        &mut self,
        payload: &Payload,
        orientation: Orientation,
        inject_sdk_stub: bool,
    ) -> Result<PathBuf, ClientError> {
        let document = if inject_sdk_stub {
            inject_bridge(&payload.html)
        } else {
            payload.html.clone()
        };

        fs::create_dir_all(&self.preview_dir)?;
        let seq = RENDER_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = self.preview_dir.join(format!(
            "preview_{}_{}.html",
            orientation.as_str(),
            seq
        ));
        fs::write(&path, document)?;

        self.discard_last();
        self.last_rendered = Some(path.clone());
        Ok(path)
    }

    /// Writes the preview document and opens it in the browser.
    pub fn render(
        &mut self,
        payload: &Payload,
        orientation: Orientation,
        inject_sdk_stub: bool,
    ) -> Result<(), ClientError> {
        let path = self.write_document(payload, orientation, inject_sdk_stub)?;
        println!("Opening preview {}", path.display());
        open::that(&path).map_err(|e| ClientError::Io(e.to_string()))?;
        Ok(())
    }

    /// Deletes the previously rendered document, if any.
    pub fn discard_last(&mut self) {
        if let Some(path) = self.last_rendered.take() {
            let _ = fs::remove_file(path);
        }
    }
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PreviewRenderer {
    fn drop(&mut self) {
        self.discard_last();
        let _ = fs::remove_dir(&self.preview_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::bridge::AD_SDK_BRIDGE_JS;

    fn payload() -> Payload {
        Payload {
            html: "<html><head></head><body>ad</body></html>".to_string(),
            filename: "ad.png".to_string(),
        }
    }

    #[test]
    fn written_document_carries_the_bridge_once() {
        let mut renderer = PreviewRenderer::new();
        let path = renderer
            .write_document(&payload(), Orientation::Portrait, true)
            .unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches(AD_SDK_BRIDGE_JS).count(), 1);
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .contains("portrait"));
    }

    #[test]
    fn raw_mode_writes_the_payload_untouched() {
        let mut renderer = PreviewRenderer::new();
        let path = renderer
            .write_document(&payload(), Orientation::Landscape, false)
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), payload().html);
    }

    #[test]
    fn rerender_discards_the_previous_document() {
        let mut renderer = PreviewRenderer::new();
        let first = renderer
            .write_document(&payload(), Orientation::Portrait, true)
            .unwrap();
        let second = renderer
            .write_document(&payload(), Orientation::Landscape, true)
            .unwrap();
        assert_ne!(first, second);
        assert!(!first.exists());
        assert!(second.exists());
    }

    #[test]
    fn discard_last_removes_the_file() {
        let mut renderer = PreviewRenderer::new();
        let path = renderer
            .write_document(&payload(), Orientation::Portrait, true)
            .unwrap();
        renderer.discard_last();
        assert!(!path.exists());
    }
}
