//! Filter bar renderer.
//!
//! One input per filterable column. Free-text inputs show their value or a
//! placeholder; select inputs list their choices until one is set.

use crate::ui::helpers::paint;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterField;

/// Appends the filter bar; nothing when no column is filterable.
pub fn render_filter_bar(out: &mut String, filters: &[FilterField], has_active: bool, theme: &Theme) {
    if filters.is_empty() {
        return;
    }

    let fields: Vec<String> = filters
        .iter()
        .map(|field| {
            let value = if !field.value.is_empty() {
                paint(&field.value, &theme.colors.text_normal)
            } else if field.options.is_empty() {
                format!("{}{}{}", Theme::dim(), "…", Theme::reset())
            } else {
                paint(&field.options.join("|"), &theme.colors.text_dim)
            };
            format!("{}: [{value}]", paint(&field.label, &theme.colors.filter_fg))
        })
        .collect();

    out.push_str(&paint("Filter", &theme.colors.filter_fg));
    out.push(' ');
    out.push_str(&fields.join("  "));
    if has_active {
        out.push_str("  ");
        out.push_str(&paint("× clear", &theme.colors.text_dim));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::strip_ansi;

    fn field(label: &str, value: &str, options: &[&str]) -> FilterField {
        FilterField {
            key: label.to_lowercase(),
            label: label.to_string(),
            value: value.to_string(),
            options: options.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_filter_bar() {
        let mut out = String::new();
        let fields = [field("Name", "al", &[]), field("City", "", &[]), field("Status", "", &["Paid", "Due"])];
        render_filter_bar(&mut out, &fields, true, &Theme::default());
        assert_eq!(
            strip_ansi(&out),
            "Filter Name: [al]  City: […]  Status: [Paid|Due]  × clear\n"
        );
    }

    #[test]
    fn test_no_filterable_columns() {
        let mut out = String::new();
        render_filter_bar(&mut out, &[], false, &Theme::default());
        assert!(out.is_empty());
    }
}
