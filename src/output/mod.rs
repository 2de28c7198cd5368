//! Terminal output styling for tfsummary
//!
//! The rendered summary goes to stdout untouched so it can be piped or posted
//! as a comment. Status messages go to stderr with color.

use owo_colors::OwoColorize;

/// Write the rendered summary to stdout without styling
pub fn body(text: &str) {
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
}

/// Print a warning message with a yellow warning symbol
pub fn warning(message: &str) {
    // Pastel cream/yellow: RGB(255, 230, 160)
    eprintln!(
        "{} {}",
        "⚠".truecolor(255, 230, 160).bold(),
        message.bright_white()
    );
}

/// Print an error message with a red X
pub fn error(message: &str) {
    // Pastel coral/salmon: RGB(255, 160, 160)
    eprintln!(
        "{} {}",
        "✗".truecolor(255, 160, 160).bold(),
        message.bright_white()
    );
}
