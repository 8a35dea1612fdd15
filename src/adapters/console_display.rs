//! Console display adapter.
//!
//! Implements [`TextDisplayPort`] without a panel: text is composed into
//! a fixed-size character frame and every changed row is written to the
//! log.  A real panel driver would implement the same trait.
//!
//! Pixel coordinates map onto the frame at [`CHAR_WIDTH_PX`] pixels per
//! column; each distinct `y` gets its own row.  Text past the right edge
//! is clipped and non-ASCII characters are shown as `?`.

use heapless::Vec;
use log::{debug, warn};

use crate::app::ports::TextDisplayPort;

pub const CHAR_WIDTH_PX: i32 = 4;
pub const FRAME_COLS: usize = 32;
pub const FRAME_ROWS: usize = 8;

struct Row {
    y: i32,
    cells: Vec<u8, FRAME_COLS>,
}

impl Row {
    fn text(&self) -> &str {
        // Only ASCII is ever stored.
        core::str::from_utf8(&self.cells).unwrap_or("")
    }
}

#[derive(Default)]
pub struct ConsoleDisplay {
    rows: Vec<Row, FRAME_ROWS>,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of the row at pixel `y`.
    pub fn row_text(&self, y: i32) -> Option<&str> {
        self.rows.iter().find(|r| r.y == y).map(Row::text)
    }

    fn row_mut(&mut self, y: i32) -> Option<&mut Row> {
        if let Some(i) = self.rows.iter().position(|r| r.y == y) {
            return self.rows.get_mut(i);
        }
        let row = Row { y, cells: Vec::new() };
        if self.rows.push(row).is_err() {
            return None;
        }
        self.rows.last_mut()
    }
}

impl TextDisplayPort for ConsoleDisplay {
    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let Some(row) = self.row_mut(y) else {
            warn!("display: frame full, dropping text at y={}", y);
            return;
        };

        let start = (x.max(0) / CHAR_WIDTH_PX) as usize;
        for (offset, ch) in text.chars().enumerate() {
            let col = start + offset;
            if col >= FRAME_COLS {
                break;
            }
            while row.cells.len() <= col {
                // Capacity is FRAME_COLS and col < FRAME_COLS.
                let _ = row.cells.push(b' ');
            }
            row.cells[col] = if ch.is_ascii() { ch as u8 } else { b'?' };
        }

        debug!("display | y={:>2} |{}|", y, row.text());
    }
}
