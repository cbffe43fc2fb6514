use unicode_width::UnicodeWidthStr;

/// Approximate advance of one terminal column, as a fraction of the font size.
///
/// Headless rendering has no font metrics available up front, so text is measured by
/// display columns. This is close enough for Arial/Helvetica at card and page sizes.
pub const AVG_CHAR_WIDTH: f64 = 0.55;

pub fn measure(text: &str, font_size: f64) -> f64 {
    UnicodeWidthStr::width(text) as f64 * font_size * AVG_CHAR_WIDTH
}

/// Shortens `text` with a trailing ellipsis so it fits in `max_width`.
pub fn truncate_to_width(text: &str, max_width: f64, font_size: f64) -> String {
    truncate_with(text, max_width, |s| measure(s, font_size))
}

/// [`truncate_to_width`] with a caller-supplied width function.
pub fn truncate_with(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> String {
    if measure(text) <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        out.push(c);
        if measure(&format!("{}…", out.trim_end())) > max_width {
            out.pop();
            break;
        }
    }
    let mut out = out.trim_end().to_string();
    out.push('…');
    out
}

/// Greedy word wrap to `max_width`. Words longer than a line are split.
pub fn wrap_text(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    wrap_with(text, max_width, |s| measure(s, font_size))
}

/// [`wrap_text`] with a caller-supplied width function, for callers that know the
/// real font metrics.
pub fn wrap_with(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure(word) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = split_long_word(word, max_width, &measure);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }
    // Trailing empty lines carry no content.
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn split_long_word(word: &str, max_width: f64, measure: &impl Fn(&str) -> f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if measure(&current) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("alpha beta gamma delta epsilon", 60.0, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure(line, 10.0) <= 60.0, "line too wide: {}", line);
        }
        assert_eq!(lines.join(" "), "alpha beta gamma delta epsilon");
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap_text("abcdefghijklmnopqrstuvwxyz", 30.0, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "abcdefghijklmnopqrstuvwxyz");
    }

    #[test]
    fn test_wrap_keeps_blank_lines_between_paragraphs() {
        let lines = wrap_text("first\n\nsecond", 200.0, 10.0);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_to_width("short", 100.0, 10.0), "short");
        let t = truncate_to_width("a very long title indeed", 50.0, 10.0);
        assert!(t.ends_with('…'));
        assert!(measure(&t, 10.0) <= 50.0);
    }

    #[test]
    fn test_wrap_with_custom_metrics() {
        // Every 'W' is twice as wide as any other character.
        let measure = |s: &str| s.chars().map(|c| if c == 'W' { 2.0 } else { 1.0 }).sum::<f64>();
        let lines = wrap_with("WWW aaa WWW", 7.0, measure);
        assert_eq!(lines, vec!["WWW", "aaa", "WWW"]);
        for line in &lines {
            assert!(measure(line) <= 7.0);
        }
        assert_eq!(truncate_with("WWWWWW", 7.0, measure), "WWW…");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
