// SPDX-License-Identifier: MIT
//
// kiln-term: the terminal layer under the kiln editor.
//
// Raw termios, a handful of ANSI sequences, a legacy-keyboard parser and a
// single-threaded event loop built on bounded reads. Nothing here knows
// about text buffers; the editor paints into an `OutputBuffer` and reacts
// to `KeyEvent`s.

pub mod ansi;
pub mod color;
pub mod event_loop;
pub mod input;
pub mod output;
pub mod terminal;
