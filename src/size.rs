//! Terminal width sources
//!
//! The screen buffer needs the terminal's column count to compensate for
//! lines that wrap. The source is injected so rendering can be tested
//! without an attached terminal.

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

use nix::errno::Errno;
use nix::libc;

/// Something that can report the current terminal width.
///
/// `Ok(0)` means the width is unknown, in which case wrap compensation is
/// skipped entirely.
pub trait WidthSource {
    /// Current number of columns
    fn columns(&self) -> io::Result<u16>;
}

impl<F> WidthSource for F
where
    F: Fn() -> io::Result<u16>,
{
    fn columns(&self) -> io::Result<u16> {
        self()
    }
}

/// A width that never changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidth(pub u16);

impl WidthSource for FixedWidth {
    fn columns(&self) -> io::Result<u16> {
        Ok(self.0)
    }
}

/// Width of the terminal attached to a file descriptor, queried with
/// `TIOCGWINSZ` on every call so resizes are picked up between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtyWidth {
    fd: RawFd,
}

impl TtyWidth {
    /// Query the terminal behind standard output
    pub fn stdout() -> Self {
        Self {
            fd: io::stdout().as_raw_fd(),
        }
    }

    /// Query the terminal behind `fd`.
    ///
    /// The descriptor must stay open for as long as this source is used.
    pub fn from_fd(fd: RawFd) -> Self {
        Self { fd }
    }
}

impl Default for TtyWidth {
    fn default() -> Self {
        Self::stdout()
    }
}

impl WidthSource for TtyWidth {
    fn columns(&self) -> io::Result<u16> {
        let mut ws = libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };

        // SAFETY: TIOCGWINSZ only writes into the winsize we pass
        let result = unsafe { libc::ioctl(self.fd, libc::TIOCGWINSZ, &mut ws) };
        if result == -1 {
            return match Errno::last() {
                // Not a terminal (pipe, file, closed descriptor): width unknown
                Errno::ENOTTY | Errno::EBADF | Errno::EINVAL => Ok(0),
                errno => Err(io::Error::from(errno)),
            };
        }

        Ok(ws.ws_col)
    }
}

/// Width source picked at runtime from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguredWidth {
    Fixed(FixedWidth),
    Terminal(TtyWidth),
}

impl WidthSource for ConfiguredWidth {
    fn columns(&self) -> io::Result<u16> {
        match self {
            ConfiguredWidth::Fixed(fixed) => fixed.columns(),
            ConfiguredWidth::Terminal(tty) => tty.columns(),
        }
    }
}
