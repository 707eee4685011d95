//! Line input for the panel binary: room updates and exit activations.

use crate::error::PanelError;
use crate::panel::RoomPanel;
use crate::sink::CommandSink;
use crate::store::Store;

#[derive(Debug)]
pub enum LineOutcome {
    /// Blank line
    Skipped,
    RoomUpdated { changed: bool },
    /// The line looked like a room document but did not parse
    BadUpdate(PanelError),
    Sent(String),
    NoSuchExit(String),
}

/// Handle one input line. A line starting with `{` is a room document
/// (JSON); anything else leaves through the exit of that name.
///
/// Directions are matched against the room the store holds right now, not
/// against whatever was last drawn, so an update followed at once by a
/// direction sees the new exits.
pub fn handle_line(line: &str, store: &Store, panel: &RoomPanel, sink: &dyn CommandSink) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() {
        return LineOutcome::Skipped;
    }

    if line.starts_with('{') {
        return match store.apply_json(line) {
            Ok(changed) => LineOutcome::RoomUpdated { changed },
            Err(e) => LineOutcome::BadUpdate(e),
        };
    }

    let tree = panel.render(&store.room_info());
    if panel.click(&tree, line, sink) {
        LineOutcome::Sent(line.to_string())
    } else {
        LineOutcome::NoSuchExit(line.to_string())
    }
}
