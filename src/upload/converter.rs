use reqwest::multipart;
use serde::Deserialize;

use super::types::{validate_media, EndcardRecord, FileSelection, MediaFile, Orientation, Payload};
use crate::config::Config;
use crate::error::ClientError;

#[derive(Deserialize)]
struct FileInfo {
    filename: String,
}

/// Everything `/upload/combined` may return, across its response variants:
/// per-orientation documents, or a single rotatable document, with the
/// source filename flat or nested under `*_info`.
#[derive(Deserialize, Default)]
#[serde(default)]
struct ConvertResponse {
    endcard_id: Option<serde_json::Value>,
    portrait: Option<String>,
    landscape: Option<String>,
    portrait_info: Option<FileInfo>,
    landscape_info: Option<FileInfo>,
    html: Option<String>,
    file_info: Option<FileInfo>,
    filename: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
struct CheckoutResponse {
    id: String,
}

/// Talks to the conversion service. The app keeps at most one call in
/// flight and disables the trigger control for its duration.
#[derive(Clone)]
pub struct ConversionClient {
    server_url: String,
}

impl ConversionClient {
    pub fn new(config: &Config) -> Self {
        Self {
            server_url: config.server_url.clone(),
        }
    }

    /// Uploads the selection and returns the refreshed record. Validation
    /// already ran at pick time; it runs again here so an oversized or
    /// mistyped file can never reach the wire.
    pub async fn convert(
        &self,
        selection: &FileSelection,
        endcard_id: Option<&str>,
    ) -> Result<EndcardRecord, ClientError> {
        for file in selection.files() {
            validate_media(&file.filename, file.size)?;
        }

        let form = build_form(selection, endcard_id)?;
        let url = format!("{}/upload/combined", self.server_url);
        println!("Uploading to {}", url);

        let response = reqwest::Client::new()
            .post(&url)
            .multipart(form)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(server_error(status, &body));
        }

        let parsed: ConvertResponse = serde_json::from_str(&body).map_err(|e| {
            ClientError::Transport(format!("Failed to parse conversion response: {}", e))
        })?;
        Ok(map_response(parsed, selection.fallback_filename()))
    }

    /// Posts the same multipart body to the checkout endpoint and returns
    /// the hosted checkout session id.
    pub async fn create_checkout_session(
        &self,
        selection: &FileSelection,
        endcard_id: Option<&str>,
    ) -> Result<String, ClientError> {
        for file in selection.files() {
            validate_media(&file.filename, file.size)?;
        }

        let form = build_form(selection, endcard_id)?;
        let url = format!("{}/create-checkout-session", self.server_url);
        println!("Creating checkout session at {}", url);

        let response = reqwest::Client::new()
            .post(&url)
            .multipart(form)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(server_error(status, &body));
        }

        let parsed: CheckoutResponse = serde_json::from_str(&body).map_err(|e| {
            ClientError::Transport(format!("Failed to parse checkout response: {}", e))
        })?;
        Ok(parsed.id)
    }
}

fn build_form(
    selection: &FileSelection,
    endcard_id: Option<&str>,
) -> Result<multipart::Form, ClientError> {
    let mut form = multipart::Form::new();

    match selection {
        FileSelection::Combined(file) => {
            form = form.part("media_file", file_part(file)?);
        }
        FileSelection::Split {
            portrait,
            landscape,
        } => {
            if let Some(file) = portrait {
                form = form.part(Orientation::Portrait.field_name(), file_part(file)?);
            }
            if let Some(file) = landscape {
                form = form.part(Orientation::Landscape.field_name(), file_part(file)?);
            }
        }
    }

    if let Some(id) = endcard_id {
        form = form.text("endcard_id", id.to_string());
    }

    Ok(form)
}

fn file_part(file: &MediaFile) -> Result<multipart::Part, ClientError> {
    let bytes = std::fs::read(&file.path)?;
    let part = multipart::Part::bytes(bytes)
        .file_name(file.filename.clone())
        .mime_str(file.media_type.mime())?;
    Ok(part)
}

/// Non-2xx responses carry `{"error": "..."}`; surface that text verbatim,
/// falling back to a generic message when the body is not parseable.
fn server_error(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("Conversion failed with status {}", status));
    ClientError::Server { status, message }
}

fn normalize_id(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn map_response(response: ConvertResponse, fallback: String) -> EndcardRecord {
    let endcard_id = response.endcard_id.and_then(normalize_id);
    let flat_name = response.filename.unwrap_or(fallback);

    // Single rotatable document: one payload serves both orientations.
    if let Some(html) = response.html {
        let filename = response
            .file_info
            .map(|i| i.filename)
            .unwrap_or_else(|| flat_name.clone());
        let payload = Payload { html, filename };
        return EndcardRecord {
            endcard_id,
            portrait: Some(payload.clone()),
            landscape: Some(payload),
            rotatable: true,
        };
    }

    let portrait = response.portrait.map(|html| Payload {
        html,
        filename: response
            .portrait_info
            .map(|i| i.filename)
            .unwrap_or_else(|| flat_name.clone()),
    });
    let landscape = response.landscape.map(|html| Payload {
        html,
        filename: response
            .landscape_info
            .map(|i| i.filename)
            .unwrap_or_else(|| flat_name.clone()),
    });

    EndcardRecord {
        endcard_id,
        portrait,
        landscape,
        rotatable: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::media::{MediaType, MAX_UPLOAD_BYTES};
    use std::path::PathBuf;

    fn parse(json: &str) -> ConvertResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn server_error_surfaces_the_error_field() {
        let err = server_error(400, r#"{"error":"bad format"}"#);
        assert_eq!(err.to_string(), "bad format");
        assert!(matches!(err, ClientError::Server { status: 400, .. }));
    }

    #[test]
    fn unparseable_error_bodies_fall_back_to_a_generic_message() {
        let err = server_error(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "Conversion failed with status 502");
    }

    #[test]
    fn both_orientations_map_to_separate_payloads() {
        let response = parse(
            r#"{
                "endcard_id": 12,
                "portrait": "<html>p</html>",
                "landscape": "<html>l</html>",
                "portrait_info": {"filename": "ad_p.png"},
                "landscape_info": {"filename": "ad_l.png"}
            }"#,
        );
        let record = map_response(response, "fallback.png".to_string());

        assert_eq!(record.endcard_id.as_deref(), Some("12"));
        assert_eq!(record.portrait.as_ref().unwrap().filename, "ad_p.png");
        assert_eq!(record.landscape.as_ref().unwrap().filename, "ad_l.png");
        assert!(!record.rotatable);
        assert!(record.has_both());
    }

    #[test]
    fn single_html_response_becomes_a_rotatable_record() {
        let response = parse(
            r#"{
                "endcard_id": "e-9",
                "html": "<html>rot</html>",
                "file_info": {"filename": "ad.png"}
            }"#,
        );
        let record = map_response(response, "fallback.png".to_string());

        assert!(record.rotatable);
        assert_eq!(record.endcard_id.as_deref(), Some("e-9"));
        let portrait = record.payload_for(Orientation::Portrait).unwrap();
        let landscape = record.payload_for(Orientation::Landscape).unwrap();
        assert_eq!(portrait, landscape);
        assert_eq!(portrait.filename, "ad.png");
    }

    #[test]
    fn flat_filename_fills_missing_file_info() {
        let response = parse(
            r#"{"portrait": "<html>p</html>", "filename": "ad.png"}"#,
        );
        let record = map_response(response, "fallback.png".to_string());
        assert_eq!(record.portrait.unwrap().filename, "ad.png");
        assert!(record.landscape.is_none());
    }

    #[test]
    fn fallback_filename_used_when_response_has_none() {
        let response = parse(r#"{"landscape": "<html>l</html>"}"#);
        let record = map_response(response, "chosen.mp4".to_string());
        assert_eq!(record.landscape.unwrap().filename, "chosen.mp4");
    }

    #[tokio::test]
    async fn oversized_selection_is_rejected_before_any_request() {
        let client = ConversionClient {
            // Nothing listens here; a validation failure must surface
            // before a connection is ever attempted.
            server_url: "http://127.0.0.1:1".to_string(),
        };
        let selection = FileSelection::Combined(MediaFile {
            path: PathBuf::from("/nonexistent/ad.png"),
            filename: "ad.png".to_string(),
            size: MAX_UPLOAD_BYTES + 1,
            media_type: MediaType::Png,
        });

        let err = client.convert(&selection, None).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn mistyped_checkout_selection_is_rejected_before_any_request() {
        let client = ConversionClient {
            server_url: "http://127.0.0.1:1".to_string(),
        };
        let selection = FileSelection::Combined(MediaFile {
            path: PathBuf::from("/nonexistent/ad.gif"),
            filename: "ad.gif".to_string(),
            size: 100,
            media_type: MediaType::Png,
        });

        let err = client
            .create_checkout_session(&selection, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
