//! Raw bytes -> display bytes projection and the column mapping that agrees with it.
//!
//! All three functions share one tab rule: a tab advances to the next multiple
//! of `tab_stop`, and always by at least one column. A `tab_stop` of zero is
//! treated as one.

pub const DEFAULT_TAB_STOP: usize = 8;

#[inline]
fn tab_advance(col: usize, tab_stop: usize) -> usize {
    let ts = tab_stop.max(1);
    ts - (col % ts)
}

/// Expand tabs to spaces; every other byte is copied verbatim.
pub fn expand_tabs(raw: &[u8], tab_stop: usize) -> Vec<u8> {
    let tabs = raw.iter().filter(|b| **b == b'\t').count();
    let mut out = Vec::with_capacity(raw.len() + tabs * tab_stop.max(1).saturating_sub(1));
    for &b in raw {
        if b == b'\t' {
            let n = tab_advance(out.len(), tab_stop);
            out.resize(out.len() + n, b' ');
        } else {
            out.push(b);
        }
    }
    out
}

/// Rendered width of `raw[..cx]` (cx clamped to the line length).
pub fn cx_to_rx(raw: &[u8], cx: usize, tab_stop: usize) -> usize {
    raw[..cx.min(raw.len())].iter().fold(0, |rx, &b| {
        if b == b'\t' {
            rx + tab_advance(rx, tab_stop)
        } else {
            rx + 1
        }
    })
}

/// First raw index whose accumulated rendered width exceeds `rx`, or the line
/// length when `rx` lies at or past the end.
pub fn rx_to_cx(raw: &[u8], rx: usize, tab_stop: usize) -> usize {
    let mut cur = 0;
    for (cx, &b) in raw.iter().enumerate() {
        cur += if b == b'\t' {
            tab_advance(cur, tab_stop)
        } else {
            1
        };
        if cur > rx {
            return cx;
        }
    }
    raw.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tabs_copies_verbatim() {
        assert_eq!(expand_tabs(b"hello", 8), b"hello");
        assert!(expand_tabs(b"", 8).is_empty());
    }

    #[test]
    fn leading_tab_fills_to_first_stop() {
        assert_eq!(expand_tabs(b"\tx", 8), b"        x");
        assert_eq!(expand_tabs(b"\tx", 4), b"    x");
    }

    #[test]
    fn tab_mid_stop_pads_to_next_multiple() {
        assert_eq!(expand_tabs(b"abc\td", 4), b"abc d");
        assert_eq!(expand_tabs(b"abcd\te", 4), b"abcd    e");
    }

    #[test]
    fn tab_always_advances_at_least_one() {
        assert_eq!(expand_tabs(b"abcdefg\t|", 8), b"abcdefg |");
        assert_eq!(expand_tabs(b"a\tb", 1), b"a b");
        assert_eq!(expand_tabs(b"a\tb", 0), b"a b");
    }

    #[test]
    fn cx_to_rx_counts_tab_width() {
        let raw = b"\ta\tb";
        assert_eq!(cx_to_rx(raw, 0, 8), 0);
        assert_eq!(cx_to_rx(raw, 1, 8), 8);
        assert_eq!(cx_to_rx(raw, 2, 8), 9);
        assert_eq!(cx_to_rx(raw, 3, 8), 16);
        assert_eq!(cx_to_rx(raw, 4, 8), 17);
        assert_eq!(cx_to_rx(raw, 99, 8), 17, "clamped to line length");
    }

    #[test]
    fn rx_inside_tab_maps_to_the_tab() {
        let raw = b"x\ty";
        for rx in 1..8 {
            assert_eq!(rx_to_cx(raw, rx, 8), 1, "rx {rx}");
        }
        assert_eq!(rx_to_cx(raw, 8, 8), 2);
        assert_eq!(rx_to_cx(raw, 9, 8), 3);
        assert_eq!(rx_to_cx(raw, 500, 8), 3);
    }

    #[test]
    fn column_maps_agree_with_expansion() {
        let raw = b"a\tbc\t\td";
        let render = expand_tabs(raw, 8);
        assert_eq!(cx_to_rx(raw, raw.len(), 8), render.len());
        for cx in 0..=raw.len() {
            assert_eq!(rx_to_cx(raw, cx_to_rx(raw, cx, 8), 8), cx);
        }
    }
}
