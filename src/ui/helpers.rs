//! Shared rendering utilities.
//!
//! Widths are measured in terminal cells: wide characters (CJK, most emoji)
//! take two. ANSI styling is applied after measuring, never before.

use crate::table::Align;
use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of a column whose content determines its size.
pub const MAX_AUTO_WIDTH: usize = 40;

/// Terminal cells taken by `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Cuts `text` to `width` cells, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let budget = width - 1;
    let mut used = 0;
    let mut cut = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        cut.push(c);
    }
    cut.push('…');
    cut
}

/// Fits `text` into exactly `width` cells with the given alignment.
#[must_use]
pub fn align(text: &str, width: usize, alignment: Align) -> String {
    let text = truncate(text, width);
    let gap = width.saturating_sub(display_width(&text));
    match alignment {
        Align::Left => format!("{text}{}", " ".repeat(gap)),
        Align::Right => format!("{}{text}", " ".repeat(gap)),
        Align::Center => {
            let left = gap / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

/// Centers `text` in `width` cells.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    align(text, width.max(display_width(text)), Align::Center)
}

/// Wraps `text` in a foreground color and a reset.
#[must_use]
pub fn paint(text: &str, hex: &str) -> String {
    format!("{}{text}{}", Theme::fg(hex), Theme::reset())
}

/// Horizontal rule of `width` cells.
#[must_use]
pub fn rule(width: usize, theme: &Theme) -> String {
    paint(&"─".repeat(width), &theme.colors.border)
}

/// Removes ANSI CSI escape sequences, leaving the plain text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for terminator in chars.by_ref() {
                if terminator.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}
