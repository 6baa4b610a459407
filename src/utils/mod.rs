pub mod edit_link;
pub mod media;
