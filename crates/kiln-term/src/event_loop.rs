// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop: read keys, let the application react, redraw.
//
// # Bounded reads
//
// Raw mode is configured with VMIN=0 / VTIME=n, so every `read()` returns
// after at most n tenths of a second. A read that brings bytes feeds the
// parser; a read that times out does two jobs:
//
//   1. Pending bytes in the parser are flushed. A lone ESC that saw no
//      follow-up within the timeout is the Escape key.
//   2. The application gets a tick, so time-based state (an expiring
//      status message) can request a redraw while the user is idle.
//
// No reader thread and no channel: the main thread owns stdin outright.
//
// # SIGWINCH
//
// The resize handler only sets an `AtomicBool`. The loop picks it up on
// the next iteration, at most one read timeout later.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ansi;
use crate::input::{KeyEvent, Parser};
use crate::output::OutputBuffer;
use crate::terminal::{self, Size, Terminal};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        // No SA_RESTART: an interrupted read returns early and the loop
        // sees the flag right away.
        sa.sa_flags = 0;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application wants after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Application interface for the event loop.
///
/// Per iteration the loop calls, in order: [`on_key`](App::on_key) for each
/// decoded key, [`on_resize`](App::on_resize) if the window changed,
/// [`on_tick`](App::on_tick), and finally [`paint`](App::paint) plus
/// [`cursor`](App::cursor) when something asked for a redraw.
pub trait App {
    /// Handle one key press. Return [`Action::Quit`] to leave the loop.
    fn on_key(&mut self, _key: &KeyEvent) -> Action {
        Action::Continue
    }

    /// The terminal size changed. Also called once before the first frame.
    fn on_resize(&mut self, _size: Size) {}

    /// Called every iteration. Return `true` to request a redraw.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// Paint the whole screen into `out`.
    ///
    /// The loop has already hidden the cursor and homed it. Each painted
    /// line is expected to clear its own tail.
    fn paint(&mut self, out: &mut OutputBuffer, size: Size);

    /// Where the hardware cursor goes after painting, as `(x, y)`.
    /// `None` leaves it hidden.
    fn cursor(&self) -> Option<(u16, u16)> {
        None
    }
}

// ─── Loop Config ─────────────────────────────────────────────────────────────

/// Timing configuration for the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// Raw-mode read timeout in tenths of a second (termios `VTIME`).
    ///
    /// Doubles as the Escape disambiguation delay. Default: 1 (100 ms).
    pub read_timeout_ds: u8,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { read_timeout_ds: 1 }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop.
///
/// ```no_run
/// use kiln_term::event_loop::{Action, App, EventLoop};
/// use kiln_term::input::{KeyCode, KeyEvent};
/// use kiln_term::output::OutputBuffer;
/// use kiln_term::terminal::Size;
///
/// struct Quitter;
///
/// impl App for Quitter {
///     fn on_key(&mut self, key: &KeyEvent) -> Action {
///         if key.code == KeyCode::Char('q') {
///             return Action::Quit;
///         }
///         Action::Continue
///     }
///
///     fn paint(&mut self, out: &mut OutputBuffer, _size: Size) {
///         out.push_bytes(b"press q");
///     }
/// }
///
/// EventLoop::new()?.run(&mut Quitter)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    parser: Parser,
    out: OutputBuffer,
    config: LoopConfig,
}

impl EventLoop {
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn new() -> io::Result<Self> {
        Self::with_config(LoopConfig::default())
    }

    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized.
    pub fn with_config(config: LoopConfig) -> io::Result<Self> {
        let mut terminal = Terminal::new()?;
        terminal.set_read_timeout(config.read_timeout_ds);
        Ok(Self {
            terminal,
            parser: Parser::new(),
            out: OutputBuffer::new(),
            config,
        })
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.terminal.size()
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> LoopConfig {
        self.config
    }

    /// Run until the application returns [`Action::Quit`] or stdin closes.
    ///
    /// The terminal is restored on every exit path, errors included.
    ///
    /// # Errors
    ///
    /// Returns an error if entering or leaving the terminal, reading stdin,
    /// or writing a frame fails.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        self.terminal.enter()?;
        install_sigwinch_handler();

        let result = self.run_inner(app);

        self.terminal.leave()?;
        result
    }

    fn run_inner(&mut self, app: &mut impl App) -> io::Result<()> {
        let mut size = self.terminal.size();
        app.on_resize(size);
        let mut dirty = true;
        let mut buf = [0u8; 64];

        loop {
            // ── Render if dirty ──────────────────────────────────
            if dirty {
                self.draw(app, size)?;
                dirty = false;
            }

            // ── Read (bounded by VTIME) ─────────────────────────
            let n = terminal::read_stdin(&mut buf)?;
            let keys = if n > 0 {
                self.parser.advance(&buf[..n])
            } else if self.parser.has_pending() {
                self.parser.flush()
            } else if !self.terminal.is_raw() {
                // Not a terminal: a zero-byte read is end of input.
                return Ok(());
            } else {
                Vec::new()
            };

            for key in &keys {
                if app.on_key(key) == Action::Quit {
                    return Ok(());
                }
            }
            if !keys.is_empty() {
                dirty = true;
            }

            // ── Resize ───────────────────────────────────────────
            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                size = self.terminal.refresh_size();
                app.on_resize(size);
                dirty = true;
            }

            // ── Tick ─────────────────────────────────────────────
            if app.on_tick() {
                dirty = true;
            }
        }
    }

    fn draw(&mut self, app: &mut impl App, size: Size) -> io::Result<()> {
        self.out.clear();
        ansi::cursor_hide(&mut self.out)?;
        ansi::cursor_home(&mut self.out)?;
        app.paint(&mut self.out, size);
        if let Some((x, y)) = app.cursor() {
            ansi::cursor_to(&mut self.out, x, y)?;
            ansi::cursor_show(&mut self.out)?;
        }
        self.out.flush_stdout()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    struct MinimalApp;
    impl App for MinimalApp {
        fn paint(&mut self, out: &mut OutputBuffer, _size: Size) {
            out.push_bytes(b"~");
        }
    }

    // ── LoopConfig ──────────────────────────────────────────────

    #[test]
    fn default_read_timeout_is_one_decisecond() {
        assert_eq!(LoopConfig::default().read_timeout_ds, 1);
    }

    #[test]
    fn config_reaches_terminal() {
        let event_loop = EventLoop::with_config(LoopConfig { read_timeout_ds: 3 }).unwrap();
        assert_eq!(event_loop.config().read_timeout_ds, 3);
        assert_eq!(event_loop.terminal.read_timeout(), 3);
    }

    // ── SIGWINCH flag ───────────────────────────────────────────

    #[test]
    fn sigwinch_flag_swap() {
        SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
        assert!(SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed));
        assert!(!SIGWINCH_RECEIVED.load(Ordering::Relaxed));
    }

    // ── App defaults ────────────────────────────────────────────

    #[test]
    fn app_defaults() {
        let mut app = MinimalApp;
        assert_eq!(
            app.on_key(&KeyEvent::plain(KeyCode::Char('x'))),
            Action::Continue
        );
        assert!(!app.on_tick());
        assert!(app.cursor().is_none());
        app.on_resize(Size { cols: 100, rows: 50 });
    }

    #[test]
    fn frame_is_wrapped_in_hide_and_home() {
        struct WithCursor;
        impl App for WithCursor {
            fn paint(&mut self, out: &mut OutputBuffer, _size: Size) {
                out.push_bytes(b"body");
            }
            fn cursor(&self) -> Option<(u16, u16)> {
                Some((2, 1))
            }
        }

        let mut app = WithCursor;
        let mut out = OutputBuffer::new();
        ansi::cursor_hide(&mut out).unwrap();
        ansi::cursor_home(&mut out).unwrap();
        app.paint(&mut out, Size::FALLBACK);
        assert_eq!(out.as_bytes(), b"\x1b[?25l\x1b[Hbody");
        assert_eq!(app.cursor(), Some((2, 1)));
    }
}
