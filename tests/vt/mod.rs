//! Minimal virtual terminal for render tests
//!
//! Interprets just enough of the output stream to check what a real
//! terminal would show: printable text with autowrap, CR, LF, and the
//! CSI cursor up/down, erase-in-line and SGR sequences. LF also returns
//! to column 0, as the tty's ONLCR output processing does.

use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    Csi,
}

/// A fixed-size screen that scrolls when a line feed hits the bottom
#[derive(Debug)]
pub struct VirtualTerminal {
    cols: usize,
    rows: Vec<Vec<char>>,
    row: usize,
    col: usize,
    /// Cursor is past the last column; the next printable wraps
    pending_wrap: bool,
    state: State,
    params: String,
}

impl VirtualTerminal {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows: vec![vec![' '; cols]; rows],
            row: 0,
            col: 0,
            pending_wrap: false,
            state: State::Ground,
            params: String::new(),
        }
    }

    /// Feed raw output bytes
    pub fn feed(&mut self, data: &[u8]) {
        for c in String::from_utf8_lossy(data).chars() {
            self.process(c);
        }
    }

    /// Visible text of every row, right-trimmed
    pub fn text(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    /// Cursor position as (row, col)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn process(&mut self, c: char) {
        match self.state {
            State::Ground => match c {
                '\x1b' => self.state = State::Escape,
                '\r' => {
                    self.col = 0;
                    self.pending_wrap = false;
                },
                '\n' => {
                    self.linefeed();
                    self.col = 0;
                },
                c if c.is_control() => {},
                c => self.print(c),
            },
            State::Escape => {
                if c == '[' {
                    self.params.clear();
                    self.state = State::Csi;
                } else {
                    self.state = State::Ground;
                }
            },
            State::Csi => {
                if c.is_ascii_digit() || c == ';' || c == '?' {
                    self.params.push(c);
                } else {
                    self.dispatch_csi(c);
                    self.state = State::Ground;
                }
            },
        }
    }

    fn dispatch_csi(&mut self, final_char: char) {
        let n = self
            .params
            .split(';')
            .next()
            .and_then(|p| p.parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);

        match final_char {
            'A' => {
                self.row = self.row.saturating_sub(n);
                self.pending_wrap = false;
            },
            'B' => {
                self.row = (self.row + n).min(self.rows.len() - 1);
                self.pending_wrap = false;
            },
            'K' => {
                // Only the "whole line" form is emitted by the renderer
                if self.params == "2" {
                    self.rows[self.row].fill(' ');
                }
            },
            _ => {},
        }
    }

    fn print(&mut self, c: char) {
        let width = c.width().unwrap_or(0);
        if width == 0 {
            return;
        }

        if self.pending_wrap || self.col + width > self.cols {
            self.linefeed();
            self.col = 0;
            self.pending_wrap = false;
        }

        self.rows[self.row][self.col] = c;
        if width == 2 && self.col + 1 < self.cols {
            self.rows[self.row][self.col + 1] = ' ';
        }

        self.col += width;
        if self.col >= self.cols {
            self.col = self.cols - 1;
            self.pending_wrap = true;
        }
    }

    fn linefeed(&mut self) {
        if self.row + 1 < self.rows.len() {
            self.row += 1;
        } else {
            self.rows.remove(0);
            self.rows.push(vec![' '; self.cols]);
        }
    }
}
