use std::sync::mpsc::Receiver;

use crate::error::ClientError;
use crate::upload::{EndcardRecord, FileSelection, MediaFile, Orientation, Payload};

/// How the user supplies creatives: one file converted into both
/// orientations, or separate files per orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Combined,
    Split,
}

/// Everything one editing session holds: the picked files, the record the
/// server returned, the orientation machine, and the in-flight request
/// plumbing.
pub struct SessionState {
    pub input_mode: InputMode,
    pub combined_file: Option<MediaFile>,
    pub portrait_file: Option<MediaFile>,
    pub landscape_file: Option<MediaFile>,
    pub record: EndcardRecord,
    pub orientation: Orientation,
    pub inject_sdk_stub: bool,
    pub is_converting: bool,
    pub is_purchasing: bool,
    pub error_message: Option<String>,
    pub status_line: Option<String>,
    pub edit_link_text: String,
    pub convert_receiver: Option<Receiver<Result<EndcardRecord, ClientError>>>,
    pub checkout_receiver: Option<Receiver<Result<String, ClientError>>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            input_mode: InputMode::default(),
            combined_file: None,
            portrait_file: None,
            landscape_file: None,
            record: EndcardRecord::default(),
            orientation: Orientation::Portrait,
            inject_sdk_stub: true,
            is_converting: false,
            is_purchasing: false,
            error_message: None,
            status_line: None,
            edit_link_text: String::new(),
            convert_receiver: None,
            checkout_receiver: None,
        }
    }
}

impl SessionState {
    pub fn clear(&mut self) {
        *self = SessionState::default();
    }

    /// The filled slots for the active input mode, or `None` when nothing
    /// is selected yet.
    pub fn selection(&self) -> Option<FileSelection> {
        match self.input_mode {
            InputMode::Combined => self.combined_file.clone().map(FileSelection::Combined),
            InputMode::Split => {
                if self.portrait_file.is_none() && self.landscape_file.is_none() {
                    None
                } else {
                    Some(FileSelection::Split {
                        portrait: self.portrait_file.clone(),
                        landscape: self.landscape_file.clone(),
                    })
                }
            }
        }
    }

    /// Flips the orientation unconditionally and returns the new state.
    pub fn toggle_orientation(&mut self) -> Orientation {
        self.orientation = self.orientation.toggled();
        self.orientation
    }

    pub fn active_payload(&self) -> Option<&Payload> {
        self.record.payload_for(self.orientation)
    }

    /// Folds a successful conversion response into the record. A response
    /// replaces the orientations it carries; a split upload of one file
    /// leaves the other orientation's payload alone. Rotatable documents
    /// replace everything. The orientation machine falls back to portrait,
    /// discarding the previous choice.
    pub fn apply_record(&mut self, incoming: EndcardRecord) {
        // Responses that omit the id still update the same server record,
        // so keep the one we have.
        let endcard_id = incoming
            .endcard_id
            .clone()
            .or_else(|| self.record.endcard_id.clone());

        let (portrait, landscape, rotatable) = if incoming.rotatable || self.record.rotatable {
            (incoming.portrait, incoming.landscape, incoming.rotatable)
        } else {
            (
                incoming.portrait.or_else(|| self.record.portrait.take()),
                incoming.landscape.or_else(|| self.record.landscape.take()),
                false,
            )
        };

        self.record = EndcardRecord {
            endcard_id,
            portrait,
            landscape,
            rotatable,
        };
        self.orientation = Orientation::Portrait;
        self.is_converting = false;
        self.error_message = None;
    }

    /// Error path: surface the message and hand the controls back.
    pub fn fail(&mut self, error: &ClientError) {
        self.error_message = Some(error.to_string());
        self.status_line = None;
        self.is_converting = false;
        self.is_purchasing = false;
    }

    pub fn busy(&self) -> bool {
        self.is_converting || self.is_purchasing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str) -> Payload {
        Payload {
            html: format!("<html>{}</html>", name),
            filename: name.to_string(),
        }
    }

    fn record_with_both() -> EndcardRecord {
        EndcardRecord {
            endcard_id: Some("3".to_string()),
            portrait: Some(payload("p.png")),
            landscape: Some(payload("l.png")),
            rotatable: false,
        }
    }

    #[test]
    fn toggling_twice_restores_the_active_payload() {
        let mut state = SessionState::default();
        state.apply_record(record_with_both());

        let original = state.active_payload().cloned().unwrap();
        state.toggle_orientation();
        assert_ne!(state.active_payload().cloned().unwrap(), original);
        state.toggle_orientation();
        assert_eq!(state.active_payload().cloned().unwrap(), original);
    }

    #[test]
    fn successful_conversion_resets_orientation_to_portrait() {
        let mut state = SessionState::default();
        state.orientation = Orientation::Landscape;
        state.is_converting = true;

        state.apply_record(record_with_both());

        assert_eq!(state.orientation, Orientation::Portrait);
        assert!(!state.is_converting);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn split_response_keeps_the_other_orientations_payload() {
        let mut state = SessionState::default();
        state.apply_record(record_with_both());

        let update = EndcardRecord {
            endcard_id: None,
            portrait: None,
            landscape: Some(payload("l2.png")),
            rotatable: false,
        };
        state.apply_record(update);

        assert_eq!(state.record.portrait.as_ref().unwrap().filename, "p.png");
        assert_eq!(state.record.landscape.as_ref().unwrap().filename, "l2.png");
    }

    #[test]
    fn rotatable_response_replaces_the_whole_record() {
        let mut state = SessionState::default();
        state.apply_record(record_with_both());

        let update = EndcardRecord {
            endcard_id: None,
            portrait: Some(payload("rot.png")),
            landscape: Some(payload("rot.png")),
            rotatable: true,
        };
        state.apply_record(update);

        assert!(state.record.rotatable);
        assert_eq!(state.record.portrait.as_ref().unwrap().filename, "rot.png");
    }

    #[test]
    fn record_id_survives_responses_that_omit_it() {
        let mut state = SessionState::default();
        state.apply_record(record_with_both());

        let mut update = record_with_both();
        update.endcard_id = None;
        state.apply_record(update);

        assert_eq!(state.record.endcard_id.as_deref(), Some("3"));
    }

    #[test]
    fn failure_restores_interactive_controls() {
        let mut state = SessionState::default();
        state.is_converting = true;
        state.is_purchasing = true;
        state.status_line = Some("Converting".to_string());

        state.fail(&ClientError::Transport("connection refused".to_string()));

        assert!(!state.busy());
        assert!(state.status_line.is_none());
        assert_eq!(
            state.error_message.as_deref(),
            Some("connection refused")
        );
    }

    #[test]
    fn empty_selection_is_none_in_both_modes() {
        let mut state = SessionState::default();
        assert!(state.selection().is_none());
        state.input_mode = InputMode::Split;
        assert!(state.selection().is_none());
    }

    #[test]
    fn initial_state_is_portrait_with_stub_injection() {
        let state = SessionState::default();
        assert_eq!(state.orientation, Orientation::Portrait);
        assert!(state.inject_sdk_stub);
        assert!(!state.busy());
        assert!(!state.record.has_payload());
    }
}
