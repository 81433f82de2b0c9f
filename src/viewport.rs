//! Scroll offsets that keep the focused element on screen.

/// First visible item of a row so that `index` sits as close to the middle
/// of a `visible`-wide window as the row ends allow.
pub fn center_offset(index: usize, len: usize, visible: usize) -> usize {
    if visible == 0 || len <= visible {
        return 0;
    }
    index.saturating_sub(visible / 2).min(len - visible)
}

/// Minimal scroll: keep `offset` unless `index` fell outside the window.
pub fn follow_offset(offset: usize, index: usize, visible: usize) -> usize {
    if visible == 0 {
        index
    } else if index < offset {
        index
    } else if index >= offset + visible {
        index + 1 - visible
    } else {
        offset
    }
}

/// First section to draw in a vertical stack of sections with the given
/// heights so that `focused` fits in `available` rows.
pub fn first_visible(first: usize, focused: usize, heights: &[u16], available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let focused = focused.min(heights.len() - 1);
    let mut first = first.min(focused);
    while first < focused {
        let span: u32 = heights[first..=focused].iter().map(|h| *h as u32).sum();
        if span <= available as u32 {
            break;
        }
        first += 1;
    }
    first
}
