use std::time::{Instant, Duration};
use std::sync::Arc;
use parking_lot::Mutex;

/// Timestamped log sink shared by the UI log panel and the conversion runner.
#[derive(Clone)]
pub struct Logger {
    messages: Arc<Mutex<Vec<String>>>,
}

impl Logger {
    pub fn new(messages: Arc<Mutex<Vec<String>>>) -> Self {
        Logger { messages }
    }

    pub fn log(&self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{}", message);
        self.push(message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.push(message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.push(message);
    }

    fn push(&self, message: String) {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        self.messages.lock().push(format!("[{}] {}", timestamp, message));
    }
}

pub fn measure_time<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();
    (result, duration)
}

pub fn get_memory_usage() -> String {
    if let Ok(mem_info) = sys_info::mem_info() {
        format!(
            "Memory: Total: {} MB, Free: {} MB, Used: {} MB",
            mem_info.total / 1024,
            mem_info.free / 1024,
            mem_info.total.saturating_sub(mem_info.free) / 1024
        )
    } else {
        "Unable to get memory info".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_timestamps_every_message() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new(messages.clone());
        logger.log("first");
        logger.error("second failed");

        let messages = messages.lock();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with('['));
        assert!(messages[0].ends_with("] first"));
        assert!(messages[1].ends_with("] second failed"));
    }

    #[test]
    fn measure_time_returns_closure_result() {
        let (value, duration) = measure_time(|| 21 * 2);
        assert_eq!(value, 42);
        assert!(duration < Duration::from_secs(5));
    }
}
