// SPDX-License-Identifier: MIT
//
// Terminal control: raw mode, alternate screen, size queries, RAII cleanup.
//
// Safety: termios (tcgetattr, tcsetattr), ioctl (TIOCGWINSZ), isatty and
// raw fd reads/writes are plain POSIX calls with no safe wrapper in std.
// Each unsafe block is kept to the single call it needs.
#![allow(unsafe_code)]
//
// Raw mode turns off echo, canonical line editing, signals and CR/LF
// translation, sets 8-bit characters, and makes a read return after at
// most `VTIME` deciseconds even when no byte arrived.
// That bounded read is what lets the event loop notice a lone ESC and
// expire status messages without a second thread.
//
// The panic hook writes a pre-built restore sequence straight to fd 1,
// bypassing Rust's stdout lock, then restores termios from a global backup.
// A panic mid-frame therefore still leaves the user with a usable shell.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// The size assumed when nothing can be queried (tests, pipes).
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` when stdout is not a terminal or reports zero columns.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Whether stdin is connected to a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

/// Parse a cursor position report, `ESC [ rows ; cols R`.
///
/// The trailing `R` may be absent (the reader stops on it). Anything else
/// malformed yields `None`.
#[must_use]
pub fn parse_cursor_report(reply: &[u8]) -> Option<Size> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some(Size {
        rows: rows.parse().ok()?,
        cols: cols.parse().ok()?,
    })
}

/// Read one byte from stdin, `Ok(None)` when the read timed out.
#[cfg(unix)]
fn read_byte() -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    match read_stdin(&mut byte)? {
        0 => Ok(None),
        _ => Ok(Some(byte[0])),
    }
}

/// Raw `read(2)` on stdin. A timeout or interrupted call reads as 0 bytes.
#[cfg(unix)]
pub fn read_stdin(buf: &mut [u8]) -> io::Result<usize> {
    let n = unsafe {
        libc::read(
            libc::STDIN_FILENO,
            buf.as_mut_ptr().cast::<libc::c_void>(),
            buf.len(),
        )
    };
    if n < 0 {
        let err = io::Error::last_os_error();
        return match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => Ok(0),
            _ => Err(err),
        };
    }
    #[allow(clippy::cast_sign_loss)]
    Ok(n as usize)
}

#[cfg(not(unix))]
pub fn read_stdin(buf: &mut [u8]) -> io::Result<usize> {
    use std::io::Read;
    io::stdin().read(buf)
}

/// Ask the terminal where the cursor ends up after pushing it to the
/// bottom-right corner. Needs raw mode so the reply is not echoed.
#[cfg(unix)]
fn query_size_by_cursor() -> io::Result<Size> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    ansi::cursor_to_far_corner(&mut lock)?;
    ansi::request_cursor_position(&mut lock)?;
    lock.flush()?;
    drop(lock);

    let mut reply = Vec::with_capacity(32);
    while reply.len() < 32 {
        match read_byte()? {
            Some(b'R') | None => break,
            Some(b) => reply.push(b),
        }
    }

    parse_cursor_report(&reply).ok_or_else(|| {
        io::Error::other("unable to query the screen for size (columns / rows)")
    })
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Original termios for the panic hook, which cannot reach [`Terminal`].
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }
}

/// Reset attributes, show the cursor, leave the alternate screen.
/// The alternate screen exit goes last so the shell reappears clean.
#[rustfmt::skip]
const EMERGENCY_RESTORE: &[u8] = b"\
    \x1b[0m\
    \x1b[?25h\
    \x1b[?1049l";

static PANIC_HOOK_INSTALLED: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Terminal handle with RAII cleanup.
///
/// [`enter`](Self::enter) switches to raw mode and the alternate screen;
/// dropping the handle (or a panic) puts everything back.
///
/// ```no_run
/// use kiln_term::terminal::Terminal;
///
/// let mut term = Terminal::new()?;
/// term.enter()?;
/// // ... draw frames, read keys ...
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Terminal {
    #[cfg(unix)]
    original_termios: Option<libc::termios>,

    size: Size,

    /// `VTIME` for raw mode, in tenths of a second.
    read_timeout_ds: u8,

    active: bool,
}

impl Terminal {
    /// Create a handle without touching terminal modes.
    ///
    /// The size comes from `TIOCGWINSZ`, or 80×24 when that fails. The
    /// cursor-report fallback runs later, in [`enter`](Self::enter), once
    /// raw mode can swallow the reply.
    ///
    /// # Errors
    ///
    /// Currently infallible; `Result` keeps the constructor uniform with
    /// [`enter`](Self::enter).
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            #[cfg(unix)]
            original_termios: None,
            size: get_size().unwrap_or(Size::FALLBACK),
            read_timeout_ds: 1,
            active: false,
        })
    }

    /// Set the raw-mode read timeout (deciseconds). Takes effect on the
    /// next [`enter`](Self::enter). Zero is bumped to one so reads never
    /// spin.
    pub fn set_read_timeout(&mut self, deciseconds: u8) {
        self.read_timeout_ds = deciseconds.max(1);
    }

    #[inline]
    #[must_use]
    pub const fn read_timeout(&self) -> u8 {
        self.read_timeout_ds
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Re-query the size after SIGWINCH. Keeps the old size when the
    /// query fails.
    pub fn refresh_size(&mut self) -> Size {
        if let Some(s) = get_size() {
            self.size = s;
        }
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Whether raw mode is actually on (false when stdin is not a tty).
    #[cfg(unix)]
    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.original_termios.is_some()
    }

    #[cfg(not(unix))]
    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        false
    }

    /// Enter raw mode and the alternate screen.
    ///
    /// When `TIOCGWINSZ` gives nothing on a real terminal, the size is
    /// measured with a cursor position report instead. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be set, if the size cannot be
    /// determined on a terminal, or if writing to stdout fails.
    pub fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }

        install_panic_hook();
        self.enable_raw_mode()?;

        match get_size() {
            Some(size) => self.size = size,
            #[cfg(unix)]
            None if self.is_raw() => match query_size_by_cursor() {
                Ok(size) => self.size = size,
                Err(err) => {
                    let _ = self.disable_raw_mode();
                    return Err(err);
                }
            },
            None => {}
        }

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        ansi::enter_alt_screen(&mut lock)?;
        ansi::clear_screen(&mut lock)?;
        ansi::cursor_home(&mut lock)?;
        lock.flush()?;

        self.active = true;
        Ok(())
    }

    /// Leave the alternate screen and restore the original termios.
    /// Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout or restoring termios fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        ansi::reset(&mut lock)?;
        ansi::cursor_show(&mut lock)?;
        ansi::exit_alt_screen(&mut lock)?;
        lock.flush()?;
        drop(lock);

        self.disable_raw_mode()?;
        self.active = false;
        Ok(())
    }

    // ── Raw Mode (termios) ──────────────────────────────────────────

    #[cfg(unix)]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        if !is_tty() {
            return Ok(());
        }

        let fd = libc::STDIN_FILENO;

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            self.original_termios = Some(termios);
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(termios);
            }

            // No break-to-SIGINT, no CR->NL, no parity check, no 8th-bit
            // strip, no XON/XOFF.
            termios.c_iflag &=
                !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
            termios.c_oflag &= !libc::OPOST;
            termios.c_cflag |= libc::CS8;
            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

            // Return as soon as any byte is available, or after the timeout.
            termios.c_cc[libc::VMIN] = 0;
            termios.c_cc[libc::VTIME] = self.read_timeout_ds;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if let Some(ref original) = self.original_termios {
            unsafe {
                if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }

            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }
            self.original_termios = None;
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn disable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.active {
            let _ = self.leave();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
