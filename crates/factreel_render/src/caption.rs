//! Caption text preparation for the `drawtext` filter.

/// Escape text for use as an unquoted `drawtext` option value inside a
/// filtergraph.
///
/// Two levels apply: the option parser treats `\`, `'`, and `:` as special,
/// and the filtergraph parser then treats `\`, `'`, `[`, `]`, `,`, and `;`
/// as special. Text expansion is disabled separately with
/// `expansion=none`, so `%` needs no escaping.
///
/// # Examples
///
/// ```
/// use factreel_render::escape_drawtext;
///
/// assert_eq!(escape_drawtext("plain text"), "plain text");
/// assert_eq!(escape_drawtext("a: b"), r"a\\: b");
/// assert_eq!(escape_drawtext("one, two"), r"one\, two");
/// assert_eq!(escape_drawtext("it's"), r"it\\\'s");
/// ```
pub fn escape_drawtext(text: &str) -> String {
    let mut option_level = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '\'' | ':') {
            option_level.push('\\');
        }
        option_level.push(c);
    }

    let mut graph_level = String::with_capacity(option_level.len());
    for c in option_level.chars() {
        if matches!(c, '\\' | '\'' | '[' | ']' | ',' | ';') {
            graph_level.push('\\');
        }
        graph_level.push(c);
    }
    graph_level
}

/// Greedy word wrap so captions fit inside the frame.
///
/// Words longer than `max_chars` are kept whole on their own line. Existing
/// line breaks are treated as spaces.
///
/// # Examples
///
/// ```
/// use factreel_render::wrap_caption;
///
/// assert_eq!(wrap_caption("the quick brown fox", 10), "the quick\nbrown fox");
/// assert_eq!(wrap_caption("short", 40), "short");
/// ```
pub fn wrap_caption(text: &str, max_chars: usize) -> String {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Characters per caption line for a frame width and font size.
///
/// Assumes an average glyph is about 0.55 of the font size wide and keeps a
/// small margin on both sides.
pub(crate) fn chars_per_line(frame_width: u32, font_size: u32) -> usize {
    let usable = frame_width.saturating_sub(frame_width / 10) as f64;
    let glyph = (font_size.max(1) as f64) * 0.55;
    ((usable / glyph).floor() as usize).max(1)
}
