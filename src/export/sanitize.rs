//! Pre-capture color sanitization.
//!
//! The rasterizer understands classic CSS colors but not the newer color functions that
//! utility-first stylesheets emit (`oklch(...)`, `color-mix(...)`, ...). Left in place they
//! render as black or make the whole paint invalid, so every occurrence inside style
//! blocks and paint attributes is replaced with a fallback color before capture.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Substituted for unsupported color functions unless the caller picks another color.
pub const DEFAULT_FALLBACK_COLOR: &str = "#888888";

static COLOR_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:oklch|oklab|lch|lab|color-mix|light-dark|color)\(")
        .expect("color function pattern is valid")
});

static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(<style[^>]*>)(.*?)(</style>)").expect("style block pattern is valid")
});

static PAINT_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(style|fill|stroke|stop-color|flood-color|lighting-color|color)(\s*=\s*)(?:"([^"]*)"|'([^']*)')"#,
    )
    .expect("paint attribute pattern is valid")
});

/// Result of a sanitization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    /// Number of color functions that were replaced.
    pub replaced: usize,
}

/// Replaces unsupported color functions in a CSS fragment, including nested ones such as
/// `color-mix(in srgb, oklch(0.7 0.1 200) 40%, white)`.
pub fn neutralize_color_functions(css: &str, fallback: &str) -> Sanitized {
    let mut out = String::with_capacity(css.len());
    let mut replaced = 0;
    let mut pos = 0;

    while let Some(m) = COLOR_FUNCTION.find_at(css, pos) {
        out.push_str(&css[pos..m.start()]);
        let mut depth = 1usize;
        let mut end = css.len();
        for (offset, c) in css[m.end()..].char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = m.end() + offset + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        out.push_str(fallback);
        replaced += 1;
        pos = end;
    }
    out.push_str(&css[pos..]);

    Sanitized {
        text: out,
        replaced,
    }
}

/// Sanitizes `<style>` blocks and paint-related attributes of an SVG document.
/// Text content is left untouched.
pub fn sanitize_svg(svg: &str, fallback: &str) -> Sanitized {
    let mut replaced = 0;

    let styled = STYLE_BLOCK.replace_all(svg, |caps: &Captures| {
        let inner = neutralize_color_functions(&caps[2], fallback);
        replaced += inner.replaced;
        format!("{}{}{}", &caps[1], inner.text, &caps[3])
    });

    let painted = PAINT_ATTRIBUTE.replace_all(&styled, |caps: &Captures| {
        let (value, quote) = match (caps.get(3), caps.get(4)) {
            (Some(v), _) => (v.as_str(), '"'),
            (None, Some(v)) => (v.as_str(), '\''),
            (None, None) => ("", '"'),
        };
        let inner = neutralize_color_functions(value, fallback);
        replaced += inner.replaced;
        format!("{}{}{}{}{}", &caps[1], &caps[2], quote, inner.text, quote)
    });

    Sanitized {
        text: painted.into_owned(),
        replaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_functions_are_replaced_whole() {
        let out = neutralize_color_functions(
            "fill: color-mix(in srgb, oklch(0.7 0.1 200) 40%, white); stroke: red",
            "#888",
        );
        assert_eq!(out.text, "fill: #888; stroke: red");
        assert_eq!(out.replaced, 1);
    }

    #[test]
    fn test_unbalanced_function_consumes_rest() {
        let out = neutralize_color_functions("oklch(0.5 0.2", "#000");
        assert_eq!(out.text, "#000");
    }

    #[test]
    fn test_similar_names_are_kept() {
        let out = neutralize_color_functions("background-color: rgb(1, 2, 3)", "#000");
        assert_eq!(out.replaced, 0);
        assert_eq!(out.text, "background-color: rgb(1, 2, 3)");
    }
}
