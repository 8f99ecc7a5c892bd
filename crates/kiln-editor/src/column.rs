//! Raw and rendered columns.
//!
//! A row is stored as raw bytes, but drawn with every tab expanded to the
//! next multiple of [`TAB_STOP`]. The cursor lives in raw columns (`cx`);
//! the screen lives in render columns (`rx`). The three functions here are
//! the only place that knows how the two relate, so expansion and both
//! conversions can never disagree.

/// Tab stop width, in screen columns.
pub const TAB_STOP: usize = 8;

/// Expand tabs in `raw` to spaces.
///
/// Every tab emits at least one space and then pads until the output length
/// is a multiple of [`TAB_STOP`]. All other bytes are copied unchanged.
#[must_use]
pub fn expand_tabs(raw: &[u8]) -> Vec<u8> {
    let tabs = raw.iter().filter(|&&b| b == b'\t').count();
    let mut render = Vec::with_capacity(raw.len() + tabs * (TAB_STOP - 1));

    for &b in raw {
        if b == b'\t' {
            render.push(b' ');
            while render.len() % TAB_STOP != 0 {
                render.push(b' ');
            }
        } else {
            render.push(b);
        }
    }
    render
}

/// Render column of raw column `cx`.
///
/// `cx` past the end of the row is clamped to the row length.
#[must_use]
pub fn raw_to_render(raw: &[u8], cx: usize) -> usize {
    let mut rx = 0;
    for &b in &raw[..cx.min(raw.len())] {
        if b == b'\t' {
            rx += (TAB_STOP - 1) - (rx % TAB_STOP);
        }
        rx += 1;
    }
    rx
}

/// Raw column that covers render column `rx`.
///
/// For a render column that falls inside a tab's padding this is the tab
/// itself. Past the end of the row it is the row length.
#[must_use]
pub fn render_to_raw(raw: &[u8], rx: usize) -> usize {
    let mut cur_rx = 0;
    for (cx, &b) in raw.iter().enumerate() {
        if b == b'\t' {
            cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
        }
        cur_rx += 1;
        if cur_rx > rx {
            return cx;
        }
    }
    raw.len()
}
