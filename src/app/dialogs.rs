// dialogs.rs
use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// Modal notifications shown to the user.
pub trait Dialogs {
    fn warning(&self, title: &str, message: &str);
    fn error(&self, title: &str, message: &str);
    fn info(&self, title: &str, message: &str);
}

/// Native message boxes. Each call blocks until the user presses OK.
pub struct NativeDialogs;

impl NativeDialogs {
    fn show(level: MessageLevel, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

impl Dialogs for NativeDialogs {
    fn warning(&self, title: &str, message: &str) {
        Self::show(MessageLevel::Warning, title, message);
    }

    fn error(&self, title: &str, message: &str) {
        Self::show(MessageLevel::Error, title, message);
    }

    fn info(&self, title: &str, message: &str) {
        Self::show(MessageLevel::Info, title, message);
    }
}
