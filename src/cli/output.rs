use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress everything but errors and data rows.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a success message.
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("  {} {}", "✓".green(), msg);
    }
}

/// Print a warning message.
pub fn warning(msg: &str) {
    if !is_quiet() {
        println!("  {} {}", "⚠".yellow(), msg);
    }
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    if !is_quiet() {
        println!("\n{}", msg.bold());
    }
}

/// Start a spinner on stderr. Hidden in quiet mode and when stderr is
/// not a terminal.
pub fn spinner(msg: &str) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }
    let sp = ProgressBar::new_spinner();
    sp.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    sp.set_message(msg.to_string());
    sp.enable_steady_tick(Duration::from_millis(80));
    sp
}

/// Stop a spinner and replace it with a success line.
pub fn finish_spinner(sp: ProgressBar, msg: &str) {
    sp.finish_and_clear();
    success(msg);
}

/// Run `f` behind a spinner, clearing it whatever the outcome.
pub fn with_spinner<T, E>(msg: &str, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    let sp = spinner(msg);
    let result = f();
    sp.finish_and_clear();
    result
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("  {} {} [y/N]: ", "?".yellow(), prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    let answer = input.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
