// conversion.rs
use crate::app::image_processing::{webp_output_path, ConvertError, WebpEncoder};
use crate::utils::Logger;
use std::path::PathBuf;

/// Result of advancing a running batch by one file.
#[derive(Debug)]
pub enum StepOutcome {
    /// A file converted and more remain.
    Progress(u8),
    /// The last file converted; progress is 100%.
    Completed,
    /// The batch stopped at `path`; later files were left untouched.
    Failed { path: PathBuf, error: ConvertError },
}

struct Batch {
    files: Vec<PathBuf>,
    quality: u8,
    completed: usize,
}

/// Idle until `start`, then converts one file per `step` until the batch
/// completes or the first error aborts it.
#[derive(Default)]
pub struct ConversionRunner {
    batch: Option<Batch>,
}

pub fn percent_complete(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u8
}

impl ConversionRunner {
    pub fn is_running(&self) -> bool {
        self.batch.is_some()
    }

    /// Begins a batch over `files` at a fixed `quality`. Ignored when a batch
    /// is already running or there is nothing to convert.
    pub fn start(&mut self, files: Vec<PathBuf>, quality: u8) -> bool {
        if self.batch.is_some() || files.is_empty() {
            return false;
        }
        self.batch = Some(Batch { files, quality, completed: 0 });
        true
    }

    /// Converts the next file. Returns `None` while idle.
    pub fn step(&mut self, encoder: &dyn WebpEncoder, logger: &Logger) -> Option<StepOutcome> {
        let batch = self.batch.as_mut()?;
        let total = batch.files.len();
        let input = batch.files[batch.completed].clone();
        let output = webp_output_path(&input);

        logger.log(format!("Converting {} ({} of {})", input.display(), batch.completed + 1, total));
        match encoder.convert(&input, &output, batch.quality) {
            Ok(written) => {
                batch.completed += 1;
                logger.log(format!("Wrote {} ({} bytes)", output.display(), written));
                if batch.completed == total {
                    self.batch = None;
                    Some(StepOutcome::Completed)
                } else {
                    Some(StepOutcome::Progress(percent_complete(batch.completed, total)))
                }
            }
            Err(error) => {
                logger.error(format!("Conversion failed for {}: {}", input.display(), error));
                self.batch = None;
                Some(StepOutcome::Failed { path: input, error })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{test_logger, ScriptedEncoder};

    fn files(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn percent_is_rounded() {
        assert_eq!(percent_complete(1, 3), 33);
        assert_eq!(percent_complete(2, 3), 67);
        assert_eq!(percent_complete(3, 3), 100);
        assert_eq!(percent_complete(1, 8), 13);
        assert_eq!(percent_complete(0, 0), 0);
    }

    #[test]
    fn idle_runner_does_nothing() {
        let encoder = ScriptedEncoder::default();
        let mut runner = ConversionRunner::default();
        assert!(runner.step(&encoder, &test_logger()).is_none());
        assert!(!runner.start(Vec::new(), 80));
        assert!(!runner.is_running());
        assert!(encoder.calls().is_empty());
    }

    #[test]
    fn converts_in_order_and_writes_sibling_webp() {
        let encoder = ScriptedEncoder::default();
        let logger = test_logger();
        let mut runner = ConversionRunner::default();
        assert!(runner.start(files(&["/in/a.png", "/in/b.png"]), 55));

        assert!(matches!(runner.step(&encoder, &logger), Some(StepOutcome::Progress(50))));
        assert!(matches!(runner.step(&encoder, &logger), Some(StepOutcome::Completed)));
        assert!(!runner.is_running());

        let calls = encoder.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].input, PathBuf::from("/in/a.png"));
        assert_eq!(calls[0].output, PathBuf::from("/in/a.webp"));
        assert_eq!(calls[1].input, PathBuf::from("/in/b.png"));
        assert!(calls.iter().all(|c| c.quality == 55));
    }

    #[test]
    fn first_failure_aborts_batch() {
        let encoder = ScriptedEncoder::failing_on("/in/b.png");
        let logger = test_logger();
        let mut runner = ConversionRunner::default();
        runner.start(files(&["/in/a.png", "/in/b.png", "/in/c.png"]), 80);

        assert!(matches!(runner.step(&encoder, &logger), Some(StepOutcome::Progress(33))));
        match runner.step(&encoder, &logger) {
            Some(StepOutcome::Failed { path, .. }) => assert_eq!(path, PathBuf::from("/in/b.png")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!runner.is_running());
        assert!(runner.step(&encoder, &logger).is_none());
        assert_eq!(encoder.calls().len(), 2);
    }

    #[test]
    fn start_is_refused_while_running() {
        let mut runner = ConversionRunner::default();
        assert!(runner.start(files(&["/a.png"]), 80));
        assert!(!runner.start(files(&["/b.png"]), 90));
    }
}
