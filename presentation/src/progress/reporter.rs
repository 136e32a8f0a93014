//! Progress reporting for story generation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use story_chat_application::ProgressNotifier;
use story_chat_domain::GeneratedStory;

/// Spinner shown while the model writes
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_generation_start(&self, model: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(model.to_string());
        pb.set_message("writing your story...");
        pb.enable_steady_tick(Duration::from_millis(100));

        *self.spinner.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_generation_complete(&self, story: &GeneratedStory) {
        let Some(pb) = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return;
        };

        if story.is_fallback() {
            pb.finish_with_message(format!("{}", "used a ready-made story".yellow()));
        } else {
            pb.finish_with_message(format!("{}", "story ready!".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_generation_start(&self, model: &str) {
        println!("{} Writing your story with {}...", "->".cyan(), model.bold());
    }

    fn on_generation_complete(&self, story: &GeneratedStory) {
        if story.is_fallback() {
            println!("  {} used a ready-made story", "x".yellow());
        } else {
            println!("  {} story ready", "v".green());
        }
    }
}
