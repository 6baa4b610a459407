mod converter;
mod types;

pub use converter::ConversionClient;
pub use types::{
    validate_media, EndcardRecord, FileSelection, MediaFile, Orientation, Payload,
};
