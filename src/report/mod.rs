pub mod text;
pub mod json;

use std::io::{self, Write};

use crate::engine::ShopOutcome;

/// Print one shop's outcome to stdout in the chosen format.
pub fn print(outcome: &ShopOutcome, json_output: bool) {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // a closed stdout (e.g. piped into head) is not worth aborting the pass over
    let _ = if json_output {
        writeln!(out, "{}", json::render(outcome))
    } else {
        write!(out, "{}", text::render_outcome(outcome))
    };
    let _ = out.flush();
}
