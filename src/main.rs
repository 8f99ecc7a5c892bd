// SPDX-License-Identifier: MIT
//
// kiln — a small screen-oriented text editor.
//
// This is the binary that wires the two crates together:
//
//   kiln-term   → raw terminal, key parsing, event loop
//   kiln-editor → document, highlighting, search, view, prompts
//
// The Editor struct implements kiln-term's App trait. Each keypress flows
// through:
//
//   stdin → parser → on_key → Key → prompt or keymap → document/cursor
//   paint → view.scroll → view.draw → OutputBuffer → terminal
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text area                    │  ← rows - 2 (View)
//   ├──────────────────────────────┤
//   │ status bar (INVERSE)         │  ← 1 row
//   ├──────────────────────────────┤
//   │ message bar / prompt         │  ← 1 row
//   └──────────────────────────────┘

use std::env;
use std::fs::OpenOptions;
use std::process;
use std::sync::Mutex;
use std::time::Instant;

use kiln_editor::config::Config;
use kiln_editor::cursor::Cursor;
use kiln_editor::document::Document;
use kiln_editor::key::Key;
use kiln_editor::position::Position;
use kiln_editor::prompt::{Prompt, PromptEvent};
use kiln_editor::search::SearchState;
use kiln_editor::transform::Transform;
use kiln_editor::view::View;
use kiln_editor::Error;

use kiln_term::event_loop::{Action, App, EventLoop, LoopConfig};
use kiln_term::input::KeyEvent;
use kiln_term::output::OutputBuffer;
use kiln_term::terminal::Size;

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find | Ctrl-P = prototypes";

const USAGE: &str = "\
Usage: kiln [FILE]

Keys:
  Ctrl-S  save            Ctrl-F  find (arrows: next/previous)
  Ctrl-Q  quit            Ctrl-P  generate C prototypes

Environment:
  KILN_LOG                write a debug log to this file
  KILN_QUIT_TIMES         extra Ctrl-Q presses needed with unsaved changes
  KILN_MESSAGE_TIMEOUT    seconds a status message stays visible
  KILN_PROTOTYPE_PATTERN  default regex for Ctrl-P";

// ─── Prompts ────────────────────────────────────────────────────────────────

/// Cursor and scroll state captured when a find starts, restored on Escape.
#[derive(Clone, Copy)]
struct SavedView {
    cursor: Position,
    rowoff: usize,
    coloff: usize,
}

/// What an open prompt is collecting input for.
enum PromptKind {
    SaveAs,
    Find { search: SearchState, saved: SavedView },
    Transform(Transform),
}

struct ActivePrompt {
    prompt: Prompt,
    kind: PromptKind,
}

// ─── Editor ─────────────────────────────────────────────────────────────────

/// The editor application state.
struct Editor {
    doc: Document,
    cursor: Cursor,
    view: View,
    config: Config,

    /// Ctrl-Q presses still required before quitting a dirty document.
    /// Reset to `config.quit_times` by any other key.
    quit_times: u32,

    /// Status message and when it was set.
    message: Option<(String, Instant)>,

    /// The modal prompt, when one is open. All keys go to it.
    prompt: Option<ActivePrompt>,

    /// Screen position of the cursor from the last paint.
    cursor_screen: Option<(u16, u16)>,
}

impl Editor {
    fn new(doc: Document, config: Config) -> Self {
        let mut view = View::default();
        view.resize(Size::FALLBACK);
        let mut editor = Self {
            doc,
            cursor: Cursor::new(),
            view,
            quit_times: config.quit_times,
            config,
            message: None,
            prompt: None,
            cursor_screen: None,
        };
        editor.set_message(HELP_MESSAGE);
        editor
    }

    fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some((msg.into(), Instant::now()));
    }

    /// The message to draw, if it is still fresh. A prompt's text never
    /// expires while the prompt is open.
    fn status_message(&self) -> Option<&str> {
        let (msg, at) = self.message.as_ref()?;
        let fresh = self.prompt.is_some() || at.elapsed() < self.config.message_timeout;
        fresh.then_some(msg.as_str())
    }

    // ── Keymap ─────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: Key) -> Action {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return Action::Continue;
        }

        match key {
            Key::Ctrl(b'q') => {
                if self.doc.is_dirty() && self.quit_times > 0 {
                    let times = self.quit_times;
                    self.set_message(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {times} more times to quit."
                    ));
                    self.quit_times -= 1;
                    return Action::Continue;
                }
                info!("quit");
                return Action::Quit;
            }
            Key::Ctrl(b's') => self.save(),
            Key::Ctrl(b'f') => self.start_find(),
            Key::Ctrl(b'p') => self.start_transform(),
            Key::Ctrl(b'l') | Key::Escape => {}

            Key::Enter => {
                let pos = self.doc.split_row(self.cursor.position());
                self.cursor.set_position(pos);
            }
            Key::Backspace | Key::Ctrl(b'h') | Key::Delete => {
                if key == Key::Delete {
                    self.cursor.move_right(&self.doc);
                }
                let pos = self.doc.delete_char(self.cursor.position());
                self.cursor.set_position(pos);
            }

            Key::Home => self.cursor.home(),
            Key::End => self.cursor.end(&self.doc),
            Key::PageUp | Key::PageDown => {
                self.cursor
                    .page(key, &self.doc, self.view.rowoff(), self.view.screenrows());
            }
            k if k.is_arrow() => self.cursor.move_key(k, &self.doc),

            Key::Byte(b) => self.insert_bytes(&[b]),
            Key::Ctrl(c) => self.insert_bytes(&[c & 0x1F]),
            Key::Unicode(ch) => {
                let mut enc = [0u8; 4];
                self.insert_bytes(ch.encode_utf8(&mut enc).as_bytes());
            }
            _ => {}
        }

        self.quit_times = self.config.quit_times;
        Action::Continue
    }

    fn insert_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            let pos = self.doc.insert_char(self.cursor.position(), b);
            self.cursor.set_position(pos);
        }
    }

    // ── Save ───────────────────────────────────────────────────────────

    fn save(&mut self) {
        if self.doc.path().is_none() {
            self.open_prompt(
                Prompt::new("Save as: ", " (ESC to cancel)"),
                PromptKind::SaveAs,
            );
            return;
        }
        let result = self.doc.save();
        self.report_save(result);
    }

    fn report_save(&mut self, result: kiln_editor::Result<usize>) {
        match result {
            Ok(bytes) => self.set_message(format!("{bytes} bytes written to disk")),
            Err(e) => self.set_message(format!("Can't save! I/O error: {e}")),
        }
    }

    // ── Find ───────────────────────────────────────────────────────────

    fn start_find(&mut self) {
        let (rowoff, coloff) = self.view.offsets();
        let saved = SavedView {
            cursor: self.cursor.position(),
            rowoff,
            coloff,
        };
        self.open_prompt(
            Prompt::new("Search: ", " (Use ESC/Arrows/Enter)"),
            PromptKind::Find {
                search: SearchState::new(),
                saved,
            },
        );
    }

    // ── Transforms ─────────────────────────────────────────────────────

    fn start_transform(&mut self) {
        let Some(&transform) = Transform::available_for(self.doc.syntax()).first() else {
            let err = Error::TransformUnavailable {
                transform: Transform::Prototypes.name(),
                filetype: self.doc.filetype().unwrap_or("no ft").to_owned(),
            };
            self.set_message(err.to_string());
            return;
        };
        self.open_prompt(
            Prompt::new("Pattern: ", " (Enter for default, ESC to cancel)").allow_empty(),
            PromptKind::Transform(transform),
        );
    }

    fn run_transform(&mut self, transform: Transform, input: &str) {
        let pattern = if input.is_empty() {
            self.config.prototype_pattern.clone()
        } else {
            input.to_owned()
        };
        match transform.apply(&mut self.doc, &pattern) {
            Ok(msg) => self.set_message(msg),
            Err(e) => {
                warn!(transform = transform.name(), %e, "transform failed");
                self.set_message(e.to_string());
            }
        }
        self.cursor.snap(&self.doc);
    }

    // ── Prompt plumbing ────────────────────────────────────────────────

    fn open_prompt(&mut self, prompt: Prompt, kind: PromptKind) {
        self.set_message(prompt.message());
        self.prompt = Some(ActivePrompt { prompt, kind });
    }

    fn handle_prompt_key(&mut self, key: Key) {
        let Some(mut active) = self.prompt.take() else {
            return;
        };
        let event = active.prompt.handle_key(key);

        // Incremental search runs on every key, including the final one.
        if let PromptKind::Find { search, .. } = &mut active.kind {
            if let Some(hit) = search.step(&mut self.doc, active.prompt.input(), key) {
                self.cursor.set_position(Position::new(hit.row, hit.col));
                self.view.set_offsets(hit.row, self.view.coloff());
            }
        }

        match event {
            PromptEvent::Edited => {
                self.set_message(active.prompt.message());
                self.prompt = Some(active);
            }
            PromptEvent::Accepted(input) => {
                self.set_message("");
                self.finish_prompt(active.kind, Some(input));
            }
            PromptEvent::Cancelled => {
                self.set_message("");
                self.finish_prompt(active.kind, None);
            }
        }
    }

    fn finish_prompt(&mut self, kind: PromptKind, input: Option<String>) {
        match (kind, input) {
            (PromptKind::SaveAs, Some(name)) => {
                debug!(path = %name, "save as");
                let result = self.doc.save_as(name);
                self.report_save(result);
            }
            (PromptKind::SaveAs, None) => self.set_message("Save aborted"),
            (PromptKind::Find { mut search, .. }, Some(_)) => search.restore(&mut self.doc),
            (PromptKind::Find { mut search, saved }, None) => {
                search.restore(&mut self.doc);
                self.cursor.set_position(saved.cursor);
                self.view.set_offsets(saved.rowoff, saved.coloff);
            }
            (PromptKind::Transform(transform), Some(input)) => {
                self.run_transform(transform, &input);
            }
            (PromptKind::Transform(_), None) => {}
        }
    }
}

// ─── App implementation ─────────────────────────────────────────────────────

impl App for Editor {
    fn on_key(&mut self, key: &KeyEvent) -> Action {
        Key::from_event(key).map_or(Action::Continue, |k| self.handle_key(k))
    }

    fn on_resize(&mut self, size: Size) {
        self.view.resize(size);
    }

    fn on_tick(&mut self) -> bool {
        let expired = self.prompt.is_none()
            && self
                .message
                .as_ref()
                .is_some_and(|(_, at)| at.elapsed() >= self.config.message_timeout);
        if expired {
            self.message = None;
        }
        expired
    }

    fn paint(&mut self, out: &mut OutputBuffer, _size: Size) {
        self.view.scroll(&mut self.cursor, &self.doc);
        let message = self.status_message();
        self.view.draw(out, &self.doc, &self.cursor, message);
        self.cursor_screen = Some(self.view.cursor_screen(&self.cursor));
    }

    fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor_screen
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

/// Route tracing output to `$KILN_LOG`. Stdout is the editor's screen, so
/// without that variable nothing is logged.
fn init_tracing() {
    let Some(path) = env::var_os("KILN_LOG") else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("kiln: cannot open log file {}: {e}", path.to_string_lossy());
            return;
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kiln=info,kiln_editor=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn main() {
    let mut path = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                return;
            }
            "-V" | "--version" => {
                println!("kiln {VERSION}");
                return;
            }
            _ if path.is_none() => path = Some(arg),
            _ => {
                eprintln!("kiln: unexpected argument '{arg}'\n\n{USAGE}");
                process::exit(2);
            }
        }
    }

    init_tracing();
    let config = Config::from_env();
    debug!(?config, "starting");

    let doc = match &path {
        Some(p) => Document::open(p).unwrap_or_else(|e| {
            eprintln!("kiln: {p}: {e}");
            process::exit(1);
        }),
        None => Document::new(),
    };

    let mut editor = Editor::new(doc, config);

    let mut event_loop = EventLoop::with_config(LoopConfig::default()).unwrap_or_else(|e| {
        eprintln!("kiln: failed to initialize terminal: {e}");
        process::exit(1);
    });

    if let Err(e) = event_loop.run(&mut editor) {
        eprintln!("kiln: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_term::input::KeyCode;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    // ── Helpers ───────────────────────────────────────────────────────────

    fn press(ch: char) -> KeyEvent {
        KeyEvent::plain(KeyCode::Char(ch))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::ctrl(KeyCode::Char(ch))
    }

    fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars().map(press).collect()
    }

    /// Feed a sequence of key events, returning the last action.
    fn feed(editor: &mut Editor, keys: &[KeyEvent]) -> Action {
        let mut last = Action::Continue;
        for k in keys {
            last = editor.on_key(k);
        }
        last
    }

    fn editor_with(text: &str) -> Editor {
        Editor::new(Document::from_bytes(text.as_bytes()), Config::default())
    }

    fn lines(editor: &Editor) -> Vec<String> {
        editor
            .doc
            .rows()
            .iter()
            .map(|r| String::from_utf8_lossy(r.raw()).into_owned())
            .collect()
    }

    fn message(editor: &Editor) -> &str {
        editor.message.as_ref().map_or("", |(m, _)| m.as_str())
    }

    // ── Editing ───────────────────────────────────────────────────────────

    #[test]
    fn startup_shows_help() {
        let e = editor_with("");
        assert_eq!(message(&e), HELP_MESSAGE);
    }

    #[test]
    fn typing_into_empty_document() {
        let mut e = editor_with("");
        feed(&mut e, &typed("hi"));
        assert_eq!(lines(&e), vec!["hi"]);
        assert_eq!(e.cursor.position(), Position::new(0, 2));
        assert!(e.doc.is_dirty());
    }

    #[test]
    fn enter_splits_and_backspace_joins() {
        let mut e = editor_with("hello world\n");
        feed(&mut e, &[key(KeyCode::End)]);
        for _ in 0..6 {
            e.on_key(&key(KeyCode::Left));
        }
        e.on_key(&key(KeyCode::Enter));
        assert_eq!(lines(&e), vec!["hello", " world"]);
        assert_eq!(e.cursor.position(), Position::new(1, 0));

        e.on_key(&key(KeyCode::Backspace));
        assert_eq!(lines(&e), vec!["hello world"]);
        assert_eq!(e.cursor.position(), Position::new(0, 5));
    }

    #[test]
    fn ctrl_h_is_backspace() {
        let mut e = editor_with("ab\n");
        feed(&mut e, &[key(KeyCode::End), ctrl('h')]);
        assert_eq!(lines(&e), vec!["a"]);
    }

    #[test]
    fn delete_removes_byte_under_cursor() {
        let mut e = editor_with("abc\n");
        e.on_key(&key(KeyCode::Delete));
        assert_eq!(lines(&e), vec!["bc"]);
        assert_eq!(e.cursor.position(), Position::ZERO);
    }

    #[test]
    fn tab_and_unicode_insert_bytes() {
        let mut e = editor_with("");
        feed(&mut e, &[key(KeyCode::Tab), press('é')]);
        assert_eq!(e.doc.row(0).unwrap().raw(), "\té".as_bytes());
    }

    #[test]
    fn other_ctrl_keys_insert_control_bytes() {
        let mut e = editor_with("");
        e.on_key(&ctrl('a'));
        assert_eq!(e.doc.row(0).unwrap().raw(), b"\x01");
    }

    #[test]
    fn escape_and_ctrl_l_do_nothing() {
        let mut e = editor_with("x\n");
        feed(&mut e, &[key(KeyCode::Escape), ctrl('l')]);
        assert_eq!(lines(&e), vec!["x"]);
        assert!(!e.doc.is_dirty());
    }

    #[test]
    fn page_down_uses_view_height() {
        let text: String = (0..100).map(|i| format!("{i}\n")).collect();
        let mut e = editor_with(&text);
        e.on_resize(Size { cols: 80, rows: 12 });
        e.on_key(&key(KeyCode::PageDown));
        assert_eq!(e.cursor.cy(), 19);
    }

    // ── Quit ──────────────────────────────────────────────────────────────

    #[test]
    fn clean_document_quits_at_once() {
        let mut e = editor_with("x\n");
        assert_eq!(e.on_key(&ctrl('q')), Action::Quit);
    }

    #[test]
    fn dirty_document_needs_extra_presses() {
        let mut e = editor_with("");
        feed(&mut e, &typed("x"));
        for remaining in [3, 2, 1] {
            assert_eq!(e.on_key(&ctrl('q')), Action::Continue);
            assert!(message(&e).contains(&format!("Press Ctrl-Q {remaining} more times")));
        }
        assert_eq!(e.on_key(&ctrl('q')), Action::Quit);
    }

    #[test]
    fn other_key_resets_quit_counter() {
        let mut e = editor_with("");
        feed(&mut e, &typed("x"));
        feed(&mut e, &[ctrl('q'), ctrl('q')]);
        e.on_key(&key(KeyCode::Left));
        assert_eq!(e.quit_times, 3);
    }

    // ── Save ──────────────────────────────────────────────────────────────

    #[test]
    fn save_bound_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let mut e = Editor::new(Document::open(&path).unwrap(), Config::default());
        feed(&mut e, &typed("abc"));
        e.on_key(&ctrl('s'));
        assert_eq!(message(&e), "4 bytes written to disk");
        assert!(!e.doc.is_dirty());
        assert_eq!(std::fs::read(&path).unwrap(), b"abc\n");
    }

    #[test]
    fn save_unnamed_prompts_for_a_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.c");
        let mut e = editor_with("int x;\n");

        e.on_key(&ctrl('s'));
        assert_eq!(message(&e), "Save as:  (ESC to cancel)");
        feed(&mut e, &typed(path.to_str().unwrap()));
        e.on_key(&key(KeyCode::Enter));

        assert!(e.prompt.is_none());
        assert_eq!(message(&e), "7 bytes written to disk");
        assert_eq!(e.doc.filetype(), Some("c"));
        assert_eq!(std::fs::read(&path).unwrap(), b"int x;\n");
    }

    #[test]
    fn save_prompt_escape_aborts() {
        let mut e = editor_with("x\n");
        feed(&mut e, &[ctrl('s'), press('a'), key(KeyCode::Escape)]);
        assert_eq!(message(&e), "Save aborted");
        assert!(e.doc.path().is_none());
    }

    #[test]
    fn save_prompt_ignores_empty_enter() {
        let mut e = editor_with("x\n");
        feed(&mut e, &[ctrl('s'), key(KeyCode::Enter)]);
        assert!(e.prompt.is_some());
    }

    #[test]
    fn save_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::from_bytes(b"x\n");
        doc.set_path(dir.path());
        let mut e = Editor::new(doc, Config::default());
        e.on_key(&ctrl('s'));
        assert!(message(&e).starts_with("Can't save! I/O error: "));
    }

    // ── Find ──────────────────────────────────────────────────────────────

    #[test]
    fn find_moves_cursor_and_scrolls_match_to_top() {
        let mut e = editor_with("alpha\nbeta\ngamma\n");
        e.on_key(&ctrl('f'));
        feed(&mut e, &typed("mm"));
        assert_eq!(e.cursor.position(), Position::new(2, 2));
        assert_eq!(e.view.rowoff(), 2);
        assert!(message(&e).starts_with("Search: mm"));

        e.on_key(&key(KeyCode::Enter));
        assert!(e.prompt.is_none());
        assert_eq!(e.cursor.position(), Position::new(2, 2));
    }

    #[test]
    fn find_escape_restores_cursor_and_view() {
        let mut e = editor_with("alpha\nbeta\ngamma\n");
        e.on_key(&key(KeyCode::Right));
        e.on_key(&ctrl('f'));
        feed(&mut e, &typed("gam"));
        assert_eq!(e.cursor.cy(), 2);

        e.on_key(&key(KeyCode::Escape));
        assert_eq!(e.cursor.position(), Position::new(0, 1));
        assert_eq!(e.view.offsets(), (0, 0));
    }

    #[test]
    fn find_arrows_cycle_matches() {
        let mut e = editor_with("foo\nbar\nfoo\n");
        e.on_key(&ctrl('f'));
        feed(&mut e, &typed("foo"));
        assert_eq!(e.cursor.cy(), 0);
        e.on_key(&key(KeyCode::Down));
        assert_eq!(e.cursor.cy(), 2);
        e.on_key(&key(KeyCode::Down));
        assert_eq!(e.cursor.cy(), 0);
        e.on_key(&key(KeyCode::Up));
        assert_eq!(e.cursor.cy(), 2);
    }

    #[test]
    fn find_overlay_cleared_when_prompt_closes() {
        use kiln_editor::highlight::Highlight;

        let mut e = editor_with("needle\n");
        e.on_key(&ctrl('f'));
        feed(&mut e, &typed("needle"));
        assert_eq!(e.doc.row(0).unwrap().highlight()[0], Highlight::Match);
        e.on_key(&key(KeyCode::Enter));
        assert_eq!(e.doc.row(0).unwrap().highlight()[0], Highlight::Normal);
    }

    // ── Prototypes ────────────────────────────────────────────────────────

    #[test]
    fn ctrl_p_generates_prototypes_with_default_pattern() {
        let mut doc = Document::from_bytes(b"#include <stdio.h>\n\nint main(void) {\n}\n");
        doc.set_syntax(kiln_editor::syntax::by_name("c"));
        let mut e = Editor::new(doc, Config::default());

        e.on_key(&ctrl('p'));
        assert!(e.prompt.is_some());
        e.on_key(&key(KeyCode::Enter));
        assert_eq!(message(&e), "1 prototypes generated");
        assert_eq!(lines(&e)[2], "int main(void);");
    }

    #[test]
    fn ctrl_p_with_bad_pattern_reports_error() {
        let mut doc = Document::from_bytes(b"int main(void) {\n}\n");
        doc.set_syntax(kiln_editor::syntax::by_name("c"));
        let mut e = Editor::new(doc, Config::default());

        e.on_key(&ctrl('p'));
        feed(&mut e, &typed("("));
        e.on_key(&key(KeyCode::Enter));
        assert!(message(&e).starts_with("invalid pattern"));
        assert_eq!(e.doc.numrows(), 2);
    }

    #[test]
    fn ctrl_p_unavailable_without_c_syntax() {
        let mut e = editor_with("x\n");
        e.on_key(&ctrl('p'));
        assert!(e.prompt.is_none());
        assert_eq!(message(&e), "prototypes is not available for no ft");
    }

    // ── Drawing ───────────────────────────────────────────────────────────

    #[test]
    fn paint_places_cursor() {
        let mut e = editor_with("a\tb\n");
        feed(&mut e, &[key(KeyCode::Right), key(KeyCode::Right)]);
        let mut out = OutputBuffer::new();
        e.paint(&mut out, Size::FALLBACK);
        assert_eq!(e.cursor(), Some((8, 0)));

        let frame = String::from_utf8_lossy(out.as_bytes()).into_owned();
        assert!(frame.contains("[No Name] - 1 lines"));
        assert!(frame.contains(HELP_MESSAGE));
    }

    #[test]
    fn message_expires_on_tick() {
        let config = Config {
            message_timeout: Duration::ZERO,
            ..Config::default()
        };
        let mut e = Editor::new(Document::new(), config);
        assert!(e.on_tick());
        assert!(e.message.is_none());
        assert!(!e.on_tick());
    }

    #[test]
    fn prompt_message_does_not_expire() {
        let config = Config {
            message_timeout: Duration::ZERO,
            ..Config::default()
        };
        let mut e = Editor::new(Document::new(), config);
        e.on_key(&ctrl('f'));
        assert!(!e.on_tick());
        assert!(e.status_message().is_some_and(|m| m.starts_with("Search: ")));
    }

    #[test]
    fn ignored_keys_do_nothing() {
        let mut e = editor_with("x\n");
        e.on_key(&key(KeyCode::F(1)));
        e.on_key(&key(KeyCode::Insert));
        assert_eq!(lines(&e), vec!["x"]);
    }
}
