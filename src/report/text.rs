//! Plain text delta report.
//!
//! One block per shop, blank line after each:
//! - header naming the shop
//! - `+` line per added listing, title from the new snapshot
//! - `-` line per removed listing, title from the old snapshot
//! - a single "no changes" line when nothing moved

use std::fmt::Write;

use crate::engine::{CycleReport, ShopOutcome};
use crate::listing::Snapshot;
use crate::store::diff::Delta;

pub const NO_CHANGES: &str = "No Changes since last sync";

pub fn render(shop_id: &str, old: &Snapshot, new: &Snapshot, delta: &Delta) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Shop ID {shop_id}");

    for id in delta.added_sorted() {
        let _ = writeln!(output, "+ added listing {id} \"{}\"", new.title_of(id));
    }

    for id in delta.removed_sorted() {
        let _ = writeln!(output, "- removed listing {id} \"{}\"", old.title_of(id));
    }

    if delta.is_empty() {
        output.push_str(NO_CHANGES);
        output.push('\n');
    }

    output.push('\n');
    output
}

pub fn render_report(report: &CycleReport) -> String {
    render(&report.shop_id, &report.previous, &report.current, &report.delta)
}

/// Report block for a success, or the one-line failure message for an abort.
pub fn render_outcome(outcome: &ShopOutcome) -> String {
    match outcome {
        ShopOutcome::Reported(report) => render_report(report),
        ShopOutcome::Aborted { error, .. } => format!("{error}\n\n"),
    }
}
