pub mod data_display;
pub mod error_dialog;
pub mod file_upload;
pub mod json_preview;
pub mod loading_overlay;
pub mod schema_editor;
