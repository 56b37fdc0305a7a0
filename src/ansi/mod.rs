//! ANSI escape sequences
//!
//! The three control sequences the screen buffer emits, plus a scanner
//! that removes escape sequences from a line so its visible length can be
//! measured. Stripping is only ever used for width accounting; the bytes
//! written to the terminal are never altered.

mod scanner;

pub use scanner::sequence_len;

/// Erase the whole current line and return to column 0 (`ESC [ 2 K \r`)
pub const CLEAR_LINE: &[u8] = b"\x1b[2K\r";

/// Move the cursor up one row (`ESC [ 1 A`)
pub const MOVE_UP: &[u8] = b"\x1b[1A";

/// Move the cursor down one row (`ESC [ 1 B`)
pub const MOVE_DOWN: &[u8] = b"\x1b[1B";

/// Remove every escape sequence from `text`.
pub fn strip(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < chars.len() {
        match sequence_len(&chars[pos..]) {
            Some(len) => pos += len,
            None => {
                out.push(chars[pos]);
                pos += 1;
            },
        }
    }

    out
}

/// Number of visible characters in `line` once escape sequences are removed.
///
/// Invalid UTF-8 is decoded lossily, so each malformed run counts as a
/// single replacement character.
pub fn visible_len(line: &[u8]) -> usize {
    let text = String::from_utf8_lossy(line);
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0;
    let mut pos = 0;

    while pos < chars.len() {
        match sequence_len(&chars[pos..]) {
            Some(len) => pos += len,
            None => {
                count += 1;
                pos += 1;
            },
        }
    }

    count
}
