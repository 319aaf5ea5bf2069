//! Pagination bar renderer.
//!
//! Displays the caller's pagination state; the current page size is
//! bracketed and unavailable directions are dimmed.

use crate::ui::helpers::paint;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Appends the pagination bar.
pub fn render_pagination(out: &mut String, info: &PaginationInfo, theme: &Theme) {
    let dim = &theme.colors.text_dim;
    let normal = &theme.colors.text_normal;

    let showing = info.range.map_or_else(
        || "No results".to_string(),
        |(first, last)| format!("Showing {first}–{last} of {}", info.total),
    );
    let previous = paint("‹ Prev", if info.has_previous { normal } else { dim });
    let next = paint("Next ›", if info.has_next { normal } else { dim });
    let sizes = info
        .page_sizes
        .iter()
        .map(|&size| {
            if size == info.limit {
                paint(&format!("[{size}]"), normal)
            } else {
                paint(&size.to_string(), dim)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    out.push_str(&paint(&showing, dim));
    out.push_str("   ");
    out.push_str(&previous);
    out.push_str(&paint(&format!("  Page {} of {}  ", info.page, info.total_pages), normal));
    out.push_str(&next);
    out.push_str("   ");
    out.push_str(&paint("Per page:", dim));
    out.push(' ');
    out.push_str(&sizes);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    #[test]
    fn test_pagination_bar() {
        let info = PaginationInfo {
            page: 2,
            total_pages: 5,
            limit: 10,
            total: 45,
            range: Some((11, 20)),
            has_previous: true,
            has_next: true,
            page_sizes: vec![10, 25],
        };
        let mut out = String::new();
        render_pagination(&mut out, &info, &Theme::default());
        assert_eq!(
            strip_ansi(&out),
            "Showing 11–20 of 45   ‹ Prev  Page 2 of 5  Next ›   Per page: [10] 25\n"
        );
    }

    #[test]
    fn test_empty_result() {
        let info = PaginationInfo {
            page: 1,
            total_pages: 1,
            limit: 25,
            total: 0,
            range: None,
            has_previous: false,
            has_next: false,
            page_sizes: vec![10, 25],
        };
        let mut out = String::new();
        render_pagination(&mut out, &info, &Theme::default());
        assert!(strip_ansi(&out).starts_with("No results"));
        assert!(strip_ansi(&out).ends_with("10 [25]\n"));
    }
}
