// Test doubles for the codec and dialog seams.
use crate::app::dialogs::Dialogs;
use crate::app::image_processing::{ConvertError, WebpEncoder};
use crate::utils::Logger;
use parking_lot::Mutex;
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

pub fn test_logger() -> Logger {
    Logger::new(Arc::new(Mutex::new(Vec::new())))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCall {
    pub input: PathBuf,
    pub output: PathBuf,
    pub quality: u8,
}

/// Records every call and fails for the configured inputs.
#[derive(Default, Clone)]
pub struct ScriptedEncoder {
    calls: Rc<RefCell<Vec<EncodeCall>>>,
    failing: Vec<PathBuf>,
}

impl ScriptedEncoder {
    pub fn failing_on(path: &str) -> Self {
        Self { failing: vec![PathBuf::from(path)], ..Self::default() }
    }

    pub fn calls(&self) -> Vec<EncodeCall> {
        self.calls.borrow().clone()
    }
}

impl WebpEncoder for ScriptedEncoder {
    fn convert(&self, input: &Path, output: &Path, quality: u8) -> Result<u64, ConvertError> {
        self.calls.borrow_mut().push(EncodeCall {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            quality,
        });
        if self.failing.iter().any(|p| p == input) {
            return Err(ConvertError::Write(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )));
        }
        Ok(128)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Warning,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct ShownDialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

#[derive(Default, Clone)]
pub struct RecordingDialogs {
    shown: Rc<RefCell<Vec<ShownDialog>>>,
}

impl RecordingDialogs {
    pub fn shown(&self) -> Vec<ShownDialog> {
        self.shown.borrow().clone()
    }

    fn record(&self, kind: DialogKind, title: &str, message: &str) {
        self.shown.borrow_mut().push(ShownDialog {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

impl Dialogs for RecordingDialogs {
    fn warning(&self, title: &str, message: &str) {
        self.record(DialogKind::Warning, title, message);
    }

    fn error(&self, title: &str, message: &str) {
        self.record(DialogKind::Error, title, message);
    }

    fn info(&self, title: &str, message: &str) {
        self.record(DialogKind::Info, title, message);
    }
}
