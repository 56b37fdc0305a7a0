//! Screen buffer
//!
//! Redraws a block of lines in place on a character terminal. Lines for a
//! frame are queued with [`ScreenBuf::write`] and sent to the terminal in a
//! single write by [`ScreenBuf::flush`].
//!
//! Terminals cannot report which row the cursor is on, so the buffer keeps
//! two counters instead:
//!
//! - `cursor`: the row the next write lands on, relative to the top of the
//!   drawn region
//! - `height`: the number of rows the region occupies
//!
//! Writing at `cursor == height` appends a new row, writing at
//! `cursor < height` overwrites a row in place. After a flush the cursor
//! physically sits one row below the region; the moves back to the top are
//! queued and ride along with the next frame's output.

use std::cmp::Ordering;
use std::io::Write;

use crate::ansi::{self, CLEAR_LINE, MOVE_DOWN, MOVE_UP};
use crate::config::Config;
use crate::error::{ScreenBufError, ScreenBufResult};
use crate::size::{ConfiguredWidth, TtyWidth, WidthSource};

/// Default number of columns subtracted from a line's visible length
/// before counting wrapped rows
pub const DEFAULT_DISPLAY_MARGIN: usize = 2;

/// Line-oriented screen buffer bound to one output stream
#[derive(Debug)]
pub struct ScreenBuf<W: Write, S: WidthSource = TtyWidth> {
    out: W,
    width: S,
    /// Bytes queued for the current frame
    buf: Vec<u8>,
    /// Clear the previous frame before the next write or flush
    reset: bool,
    cursor: usize,
    height: usize,
    /// Byte length of the last line written
    prev_len: usize,
    /// Visible length of the last line written
    prev_visible: usize,
    wrap_aware: bool,
    margin: usize,
}

impl<W: Write> ScreenBuf<W, TtyWidth> {
    /// Create a screen buffer that measures the terminal behind stdout.
    ///
    /// `wrap_aware` should be false when every line is known to fit on one
    /// row (selection menus) and true for free-form input lines.
    pub fn new(out: W, wrap_aware: bool) -> Self {
        Self::with_width(out, wrap_aware, TtyWidth::stdout())
    }
}

impl<W: Write> ScreenBuf<W, ConfiguredWidth> {
    /// Create a screen buffer from configuration
    pub fn from_config(out: W, config: &Config) -> Self {
        let mut screen = Self::with_width(out, config.wrap_aware, config.width_source());
        screen.margin = config.display_margin;
        screen
    }
}

impl<W: Write, S: WidthSource> ScreenBuf<W, S> {
    /// Create a screen buffer with an explicit terminal width source
    pub fn with_width(out: W, wrap_aware: bool, width: S) -> Self {
        Self {
            out,
            width,
            buf: Vec::new(),
            reset: false,
            cursor: 0,
            height: 0,
            prev_len: 0,
            prev_visible: 0,
            wrap_aware,
            margin: DEFAULT_DISPLAY_MARGIN,
        }
    }

    /// Row the next write lands on, counted from the top of the region
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of rows in the drawn region
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_wrap_aware(&self) -> bool {
        self.wrap_aware
    }

    /// Bytes queued but not yet flushed
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consume the buffer, returning the output stream. Unflushed bytes
    /// are dropped.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Discard unflushed output and clear the whole previous frame on the
    /// next write or flush.
    ///
    /// Nothing is emitted here, so calling it repeatedly is harmless.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.reset = true;
    }

    /// Queue a clear of every drawn row, bottom to top, and start over
    /// from the top of the region.
    pub fn clear(&mut self) {
        if self.height > 0 {
            tracing::trace!("Clearing {} rows", self.height);
        }
        for _ in 0..self.height {
            self.buf.extend_from_slice(MOVE_UP);
            self.buf.extend_from_slice(CLEAR_LINE);
        }
        self.cursor = 0;
        self.height = 0;
        self.reset = false;
    }

    /// Queue a single line at the current row.
    ///
    /// Returns the number of bytes of `line` accepted. Lines containing
    /// `\r` or `\n` are rejected without touching any state, since they
    /// would move the terminal cursor without the buffer knowing.
    pub fn write(&mut self, line: &[u8]) -> ScreenBufResult<usize> {
        if line.iter().any(|&b| b == b'\r' || b == b'\n') {
            return Err(ScreenBufError::InvalidInput {
                line: String::from_utf8_lossy(line).into_owned(),
            });
        }

        if self.reset {
            self.clear();
        }

        if self.wrap_aware {
            self.retract_wrapped_rows(line)?;
        }

        match self.cursor.cmp(&self.height) {
            Ordering::Equal => {
                self.buf.extend_from_slice(CLEAR_LINE);
                self.buf.extend_from_slice(line);
                self.buf.push(b'\n');
                self.height += 1;
                self.cursor += 1;
            },
            Ordering::Less => {
                self.buf.extend_from_slice(CLEAR_LINE);
                self.buf.extend_from_slice(line);
                self.buf.extend_from_slice(MOVE_DOWN);
                self.cursor += 1;
            },
            Ordering::Greater => {
                return Err(ScreenBufError::InvalidCursorPosition {
                    cursor: self.cursor,
                    height: self.height,
                });
            },
        }

        Ok(line.len())
    }

    /// Queue a single line given as a string. See [`ScreenBuf::write`].
    pub fn write_str(&mut self, line: &str) -> ScreenBufResult<usize> {
        self.write(line.as_bytes())
    }

    /// Send the frame to the output stream.
    ///
    /// Rows left over from a taller previous frame are cleared first. The
    /// moves back to the top of the region are queued, not sent, so the
    /// next frame starts from a known row.
    pub fn flush(&mut self) -> ScreenBufResult<()> {
        if self.reset {
            self.clear();
        }

        for _ in self.cursor..self.height {
            self.buf.extend_from_slice(CLEAR_LINE);
            self.buf.extend_from_slice(MOVE_DOWN);
        }

        tracing::trace!(
            "Flushing {} bytes ({} rows, {} abandoned)",
            self.buf.len(),
            self.height,
            self.height.saturating_sub(self.cursor)
        );

        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        self.buf.clear();

        for _ in 0..self.height {
            self.buf.extend_from_slice(MOVE_UP);
        }
        self.cursor = 0;

        Ok(())
    }

    /// Clear the extra rows the previous line at this position may have
    /// wrapped onto.
    ///
    /// The row count comes from the new line's visible length less the
    /// display margin. One more row is retracted when the line shrank and
    /// the previous line ended in one of the last two columns, where the
    /// terminal leaves a wrapped row behind as characters are deleted. That
    /// second rule is tuned to observed terminal behavior rather than
    /// derived from the wrap model.
    fn retract_wrapped_rows(&mut self, line: &[u8]) -> ScreenBufResult<()> {
        let columns = usize::from(self.width.columns()?);
        let visible = ansi::visible_len(line);

        if columns > 0 {
            let wrapped = visible.saturating_sub(self.margin) / columns;

            let column = self.prev_visible % columns;
            let at_wrap_edge = column == columns - 1 || column + 2 == columns;
            let deleting = self.prev_len > line.len() && at_wrap_edge;

            let rows = wrapped + usize::from(deleting);
            if rows > 0 {
                tracing::trace!(
                    "Retracting {} wrapped rows ({} visible, {} columns)",
                    rows,
                    visible,
                    columns
                );
            }
            for _ in 0..rows {
                self.buf.extend_from_slice(MOVE_UP);
                self.buf.extend_from_slice(CLEAR_LINE);
            }
        }

        self.prev_len = line.len();
        self.prev_visible = visible;
        Ok(())
    }
}
