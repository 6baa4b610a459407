mod state;
mod ui;

use eframe::{egui, App};
use std::sync::mpsc as std_mpsc;

pub use state::{InputMode, SessionState};

use crate::config::Config;
use crate::download::{self, DownloadKind};
use crate::error::ClientError;
use crate::preview::PreviewRenderer;
use crate::upload::{ConversionClient, MediaFile, Orientation, Payload};
use crate::utils::edit_link;
use crate::utils::media::format_size;

/// Which picker a UI button fills.
#[derive(Debug, Clone, Copy)]
pub enum FileSlot {
    Combined,
    Portrait,
    Landscape,
}

pub struct EndcardConverter {
    config: Config,
    state: SessionState,
    preview: PreviewRenderer,
}

impl EndcardConverter {
    pub fn new(_cc: &eframe::CreationContext<'_>, edit_target: Option<String>) -> Self {
        println!("Initializing EndCard Converter Pro");
        let config = Config::from_env();
        println!("Conversion server: {}", config.server_url);

        let mut state = SessionState::default();
        if let Some(target) = edit_target {
            match edit_link::extract_endcard_id(&target) {
                Some(id) => {
                    println!("Editing existing endcard {}", id);
                    state.record.endcard_id = Some(id);
                }
                None => println!("Ignoring unrecognized edit target: {}", target),
            }
        }

        Self {
            config,
            state,
            preview: PreviewRenderer::new(),
        }
    }

    pub fn reset_session(&mut self) {
        println!("Resetting session state");
        self.state.clear();
        self.preview.discard_last();
    }

    pub fn pick_file(&mut self, slot: FileSlot) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Media", &["jpg", "jpeg", "png", "mp4"])
            .pick_file()
        {
            match MediaFile::from_path(&path) {
                Ok(file) => {
                    self.state.error_message = None;
                    self.state.status_line = Some(format!(
                        "Selected {} ({})",
                        file.filename,
                        format_size(file.size)
                    ));
                    match slot {
                        FileSlot::Combined => self.state.combined_file = Some(file),
                        FileSlot::Portrait => self.state.portrait_file = Some(file),
                        FileSlot::Landscape => self.state.landscape_file = Some(file),
                    }
                }
                Err(e) => self.state.fail(&e),
            }
        }
    }

    pub fn clear_file(&mut self, slot: FileSlot) {
        match slot {
            FileSlot::Combined => self.state.combined_file = None,
            FileSlot::Portrait => self.state.portrait_file = None,
            FileSlot::Landscape => self.state.landscape_file = None,
        }
        self.state.status_line = None;
    }

    pub fn start_conversion(&mut self) {
        if self.state.is_converting {
            return;
        }
        let selection = match self.state.selection() {
            Some(selection) => selection,
            None => {
                self.state.error_message =
                    Some("Please select a file for conversion".to_string());
                return;
            }
        };

        println!("Starting conversion...");
        self.state.is_converting = true;
        self.state.error_message = None;
        self.state.status_line = None;

        let client = ConversionClient::new(&self.config);
        let endcard_id = self.state.record.endcard_id.clone();
        let (sender, receiver) = std_mpsc::channel();
        self.state.convert_receiver = Some(receiver);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let outcome = client.convert(&selection, endcard_id.as_deref()).await;
                sender.send(outcome).unwrap_or_default();
            });
        });
    }

    pub fn start_checkout(&mut self) {
        if self.state.is_purchasing {
            return;
        }
        let selection = match self.state.selection() {
            Some(selection) => selection,
            None => {
                self.state.error_message =
                    Some("Please select a file before purchasing".to_string());
                return;
            }
        };

        println!("Starting checkout...");
        self.state.is_purchasing = true;
        self.state.error_message = None;

        let client = ConversionClient::new(&self.config);
        let endcard_id = self.state.record.endcard_id.clone();
        let (sender, receiver) = std_mpsc::channel();
        self.state.checkout_receiver = Some(receiver);

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let outcome = client
                    .create_checkout_session(&selection, endcard_id.as_deref())
                    .await;
                sender.send(outcome).unwrap_or_default();
            });
        });
    }

    /// Flips the display mode. Re-renders the preview when the new
    /// orientation has a payload; silently keeps the old tab otherwise.
    pub fn toggle_orientation(&mut self) {
        let orientation = self.state.toggle_orientation();
        println!("Switched to {}", orientation.mode_label());
        if let Some(payload) = self.state.record.payload_for(orientation).cloned() {
            self.render_preview(&payload, orientation);
        }
    }

    pub fn preview_current(&mut self) {
        match self.state.active_payload().cloned() {
            Some(payload) => {
                let orientation = self.state.orientation;
                self.render_preview(&payload, orientation);
            }
            None => self.state.fail(&ClientError::MissingPayload),
        }
    }

    fn render_preview(&mut self, payload: &Payload, orientation: Orientation) {
        if let Err(e) = self
            .preview
            .render(payload, orientation, self.state.inject_sdk_stub)
        {
            self.state.fail(&e);
        }
    }

    pub fn download_current(&mut self) {
        let payload = match self.state.active_payload().cloned() {
            Some(payload) => payload,
            None => {
                self.state.fail(&ClientError::MissingPayload);
                return;
            }
        };
        let kind = if self.state.record.rotatable {
            DownloadKind::Rotatable
        } else {
            DownloadKind::Oriented(self.state.orientation)
        };

        let suggested = download::download_file_name(&payload.filename, kind);
        if let Some(dest) = rfd::FileDialog::new()
            .set_file_name(&suggested)
            .add_filter("HTML", &["html"])
            .save_file()
        {
            match download::save_payload_as(&payload, &dest) {
                Ok(()) => {
                    self.state.status_line = Some(format!("Saved {}", dest.display()));
                }
                Err(e) => self.state.fail(&e),
            }
        }
    }

    pub fn download_both(&mut self) {
        if !self.state.record.has_both() {
            self.state.fail(&ClientError::MissingPayload);
            return;
        }

        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            let record = self.state.record.clone();
            for orientation in [Orientation::Portrait, Orientation::Landscape] {
                if let Some(payload) = record.payload_for(orientation) {
                    if let Err(e) =
                        download::save_payload(payload, DownloadKind::Oriented(orientation), &dir)
                    {
                        self.state.fail(&e);
                        return;
                    }
                }
            }
            self.state.status_line =
                Some(format!("Saved both endcards to {}", dir.display()));
        }
    }

    pub fn apply_edit_link(&mut self) {
        match edit_link::extract_endcard_id(&self.state.edit_link_text) {
            Some(id) => {
                println!("Editing existing endcard {}", id);
                self.state.status_line = Some(format!("Editing endcard {}", id));
                self.state.error_message = None;
                self.state.record.endcard_id = Some(id);
            }
            None => {
                self.state.error_message =
                    Some("Could not find an endcard_id in that link".to_string());
            }
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if let Some(receiver) = &self.state.convert_receiver {
            if let Ok(outcome) = receiver.try_recv() {
                self.state.convert_receiver = None;
                match outcome {
                    Ok(record) => {
                        println!("Conversion succeeded");
                        self.state.apply_record(record);
                        self.state.status_line = Some("Endcard generated".to_string());
                        if let Some(payload) = self.state.active_payload().cloned() {
                            let orientation = self.state.orientation;
                            self.render_preview(&payload, orientation);
                        }
                    }
                    Err(e) => {
                        println!("Conversion failed: {}", e);
                        self.state.fail(&e);
                    }
                }
                ctx.request_repaint();
            }
        }

        if let Some(receiver) = &self.state.checkout_receiver {
            if let Ok(outcome) = receiver.try_recv() {
                self.state.checkout_receiver = None;
                self.state.is_purchasing = false;
                match outcome {
                    Ok(session_id) => {
                        let url = format!("{}/{}", self.config.checkout_url, session_id);
                        println!("Opening checkout {}", url);
                        match open::that(&url) {
                            Ok(()) => {
                                self.state.status_line =
                                    Some("Opening secure checkout in your browser".to_string());
                            }
                            Err(e) => self.state.fail(&ClientError::Io(e.to_string())),
                        }
                    }
                    Err(e) => {
                        println!("Checkout failed: {}", e);
                        self.state.fail(&e);
                    }
                }
                ctx.request_repaint();
            }
        }

        if self.state.busy() {
            ctx.request_repaint();
        }
    }
}

impl App for EndcardConverter {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
