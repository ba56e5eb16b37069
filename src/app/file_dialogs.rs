// file_dialogs.rs
use rfd::FileDialog;
use std::path::PathBuf;

pub fn select_images() -> Option<Vec<PathBuf>> {
    FileDialog::new()
        .set_title("Select PNG images")
        .add_filter("PNG image", &["png"])
        .pick_files()
}
