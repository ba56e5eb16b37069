// app.rs
pub mod conversion;
pub mod dialogs;
pub mod file_dialogs;
pub mod gui;
pub mod image_processing;
pub mod selection;
pub mod thumbnails;

#[cfg(test)]
mod testing;

use conversion::{ConversionRunner, StepOutcome};
use dialogs::{Dialogs, NativeDialogs};
use eframe::egui;
use eframe::App as EframeApp;
use image_processing::{LibWebpEncoder, WebpEncoder};
use parking_lot::Mutex;
use selection::{Rejection, Selection};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thumbnails::ThumbnailCache;
use crate::utils::{Logger, get_memory_usage};

pub const MIN_QUALITY: u8 = 10;
pub const MAX_QUALITY: u8 = 100;
pub const DEFAULT_QUALITY: u8 = 80;
pub const GRID_COLUMNS: usize = 4;

/// Text shown inside the progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressStatus {
    Percent,
    NoSelection,
    Failed { path: PathBuf, error: String },
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionProgress {
    pub percent: u8,
    pub status: ProgressStatus,
}

impl Default for ConversionProgress {
    fn default() -> Self {
        Self { percent: 0, status: ProgressStatus::Percent }
    }
}

impl ConversionProgress {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn text(&self) -> String {
        match &self.status {
            ProgressStatus::Percent => format!("{}%", self.percent),
            ProgressStatus::NoSelection => "No images selected".to_string(),
            ProgressStatus::Failed { path, error } => {
                format!("Conversion error: {}: {}", path.display(), error)
            }
            ProgressStatus::Complete => "Conversion complete".to_string(),
        }
    }
}

/// Dialog owed to the user once the final progress state has been drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingNotice {
    Success,
    Failure(String),
}

pub struct App {
    // Application state
    pub selection: Selection,
    pub quality: u8,
    pub progress: ConversionProgress,
    pub log_messages: Arc<Mutex<Vec<String>>>,
    pub thumbnails: ThumbnailCache,
    runner: ConversionRunner,
    encoder: Box<dyn WebpEncoder>,
    dialogs: Box<dyn Dialogs>,
    pending_notice: Option<PendingNotice>,
    logger: Logger,
}

impl Default for App {
    fn default() -> Self {
        let log_messages = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new(log_messages.clone());
        Self::with_backends(
            log_messages,
            Box::new(LibWebpEncoder::new(logger)),
            Box::new(NativeDialogs),
        )
    }
}

impl App {
    pub fn with_backends(
        log_messages: Arc<Mutex<Vec<String>>>,
        encoder: Box<dyn WebpEncoder>,
        dialogs: Box<dyn Dialogs>,
    ) -> Self {
        let logger = Logger::new(log_messages.clone());
        Self {
            selection: Selection::default(),
            quality: DEFAULT_QUALITY,
            progress: ConversionProgress::default(),
            log_messages,
            thumbnails: ThumbnailCache::new(logger.clone()),
            runner: ConversionRunner::default(),
            encoder,
            dialogs,
            pending_notice: None,
            logger,
        }
    }

    /// True from `start_conversion` until the closing dialog has been shown.
    pub fn is_converting(&self) -> bool {
        self.runner.is_running() || self.pending_notice.is_some()
    }

    /// Adds dropped or picked files to the selection.
    pub fn add_files(&mut self, paths: Vec<PathBuf>) {
        if self.is_converting() {
            self.logger.log(format!("Ignoring {} file(s) while a conversion is running", paths.len()));
            return;
        }

        let report = self.selection.add(paths);
        for rejection in &report.rejected {
            match rejection {
                Rejection::NotPng(path) => {
                    self.logger.log(format!("Skipped {}: not a PNG file", path.display()))
                }
                Rejection::Duplicate(path) => {
                    self.logger.log(format!("Skipped {}: already selected", path.display()))
                }
            }
        }
        if report.added > 0 {
            self.logger.log(format!("Added {} image(s), {} selected", report.added, self.selection.len()));
        }
        if !self.selection.is_empty() {
            self.progress.reset();
        }
    }

    pub fn remove_file(&mut self, path: &Path) {
        if self.is_converting() {
            return;
        }
        if self.selection.remove(path) {
            self.logger.log(format!("Removed {}", path.display()));
        }
    }

    /// Starts a batch at the current quality, or warns when nothing is selected.
    pub fn start_conversion(&mut self) -> bool {
        if self.is_converting() {
            return false;
        }
        if self.selection.is_empty() {
            self.progress = ConversionProgress { percent: 0, status: ProgressStatus::NoSelection };
            self.logger.log("No images selected for conversion.");
            self.dialogs.warning("Warning", "No images selected!");
            return false;
        }

        let quality = self.quality.clamp(MIN_QUALITY, MAX_QUALITY);
        self.progress.reset();
        self.logger.log(format!(
            "Starting conversion of {} image(s) at quality {}",
            self.selection.len(),
            quality
        ));
        self.logger.log(get_memory_usage());
        self.runner.start(self.selection.paths().to_vec(), quality)
    }

    /// Converts the next file of the running batch and applies the outcome.
    pub fn step_conversion(&mut self) -> Option<StepOutcome> {
        let outcome = self.runner.step(self.encoder.as_ref(), &self.logger)?;
        match &outcome {
            StepOutcome::Progress(percent) => {
                self.progress.percent = *percent;
            }
            StepOutcome::Completed => {
                self.progress = ConversionProgress { percent: 100, status: ProgressStatus::Complete };
                self.logger.log("Conversion complete!");
                self.logger.log(get_memory_usage());
                self.pending_notice = Some(PendingNotice::Success);
            }
            StepOutcome::Failed { path, error } => {
                self.progress = ConversionProgress {
                    percent: 0,
                    status: ProgressStatus::Failed { path: path.clone(), error: error.to_string() },
                };
                self.pending_notice = Some(PendingNotice::Failure(format!(
                    "Conversion failed: {}\n{}",
                    path.display(),
                    error
                )));
            }
        }
        Some(outcome)
    }

    /// Shows the dialog that closes the last batch. On success the selection
    /// is cleared afterwards and the placeholder comes back.
    pub fn show_pending_notice(&mut self) -> bool {
        match self.pending_notice.take() {
            Some(PendingNotice::Success) => {
                self.dialogs.info("Done", "All images were converted successfully!");
                self.selection.clear();
                self.progress.reset();
                true
            }
            Some(PendingNotice::Failure(message)) => {
                self.dialogs.error("Error", &message);
                true
            }
            None => false,
        }
    }

    /// Conversion work for one frame. A notice queued by the previous frame
    /// is shown first, so the final progress state has already been drawn
    /// behind the modal dialog. Returns true while more frames are needed.
    pub fn tick(&mut self) -> bool {
        self.show_pending_notice();
        if self.runner.is_running() {
            self.step_conversion();
        }
        self.is_converting()
    }
}

impl EframeApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dropped: Vec<PathBuf> = ctx
            .input()
            .raw
            .dropped_files
            .iter()
            .filter_map(|file| file.path.clone())
            .collect();
        if !dropped.is_empty() {
            self.add_files(dropped);
        }

        if self.tick() {
            // Keep frames coming so the next file starts and the bar repaints.
            ctx.request_repaint();
        }

        self.thumbnails.sync(&self.selection);

        // Render the GUI
        gui::render(self, ctx);
    }
}
