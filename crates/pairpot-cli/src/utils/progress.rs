use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pairpot::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 100;

/// Renders engine [`Progress`] events as a stderr spinner during phases and a bar during
/// counted tasks.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
            .with_style(spinner_style());
        pb.finish_and_clear();
        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let pb = Arc::clone(&self.pb);
        Box::new(move |progress: Progress| match pb.lock() {
            Ok(guard) => apply(&guard, progress),
            Err(_) => warn!("Progress bar mutex was poisoned; dropping progress event."),
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(pb: &ProgressBar, progress: Progress) {
    match progress {
        Progress::PhaseStart { name } => {
            pb.reset();
            pb.set_length(0);
            pb.set_style(spinner_style());
            pb.set_message(name);
            pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::PhaseFinish => {
            pb.disable_steady_tick();
            pb.finish_with_message("done");
        }
        Progress::TaskStart { total_steps } => {
            pb.disable_steady_tick();
            pb.reset();
            pb.set_length(total_steps);
            pb.set_style(bar_style());
        }
        Progress::TaskIncrement => pb.inc(1),
        Progress::TaskFinish => {
            if let Some(len) = pb.length() {
                pb.set_position(len);
            }
            pb.finish();
        }
        Progress::Message(msg) => pb.println(format!("  {msg}")),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<16} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_starts_finished_and_empty() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn tabulation_events_drive_the_bar() {
        let handler = CliProgressHandler::new();
        let callback = handler.callback();

        callback(Progress::PhaseStart { name: "Tabulation" });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Tabulation");
            assert!(!pb.is_finished());
        }

        callback(Progress::TaskStart { total_steps: 6 });
        callback(Progress::TaskIncrement);
        callback(Progress::TaskIncrement);
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(6));
            assert_eq!(pb.position(), 2);
        }

        callback(Progress::TaskFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 6);
        }

        callback(Progress::PhaseFinish);
        assert_eq!(handler.pb.lock().unwrap().message(), "done");
    }

    #[test]
    fn callback_can_be_moved_to_another_thread() {
        let handler = CliProgressHandler::new();
        let callback = handler.callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Type selection" });
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        assert!(handler.pb.lock().unwrap().is_finished());
    }
}
