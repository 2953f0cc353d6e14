//! Shared terminal output: spinners, star ratings, failure reports

use anyhow::anyhow;
use bookshelf_core::BookshelfError;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// Run a request with a spinner on stderr. Hidden when stderr is not a terminal.
pub async fn with_spinner<F, T>(message: &str, request: F) -> T
where
    F: Future<Output = T>,
{
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = request.await;
    pb.finish_and_clear();
    result
}

/// Five-star rendering such as `★★★☆☆ (3)`
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{} ({})", "★".repeat(filled), "☆".repeat(5 - filled), rating)
}

/// Average rating to one decimal, or a dash when unrated
pub fn average(rating: Option<f64>) -> String {
    match rating {
        Some(avg) => format!("{:.1}", avg),
        None => "-".to_string(),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print per-field messages for validation failures and 400s, or a generic
/// line for other rejections, and hand back the error for the exit code.
pub fn report(err: anyhow::Error) -> anyhow::Error {
    let Some(failure) = err.downcast_ref::<BookshelfError>() else {
        return err;
    };

    if let Some(fields) = failure.field_errors() {
        for (field, messages) in fields.iter() {
            for message in messages {
                eprintln!("  {}: {}", field, message);
            }
        }
        return anyhow!("Request was not accepted, see the messages above");
    }

    match failure.status() {
        Some(status @ (401 | 403)) => {
            anyhow!("Not allowed (status {}). Try `bookshelf login` first.", status)
        }
        Some(status) => anyhow!("Request failed (status {}). Please try again.", status),
        None => err,
    }
}
