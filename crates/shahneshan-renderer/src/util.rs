//! Shared text helpers for scanning and rendering.

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Convert heading text to an anchor id.
///
/// Whitespace runs become a single `-`, only letters, numbers, `-` and `_`
/// survive, and the result is lowercased. Works on any script, so Persian
/// headings keep their letters.
///
/// # Examples
///
/// ```
/// use shahneshan_renderer::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("سلام دنیا"), "سلام-دنیا");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                result.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_alphabetic() || c.is_numeric() {
            result.extend(c.to_lowercase());
        } else if c == '-' || c == '_' {
            result.push(c);
        }
    }

    result
}

/// Check whether a character belongs to a right-to-left script block.
fn is_rtl_char(c: char) -> bool {
    matches!(
        c,
        // Hebrew, Arabic, Syriac, Arabic Supplement, Thaana, NKo, Samaritan,
        // Mandaic, Syriac Supplement, Arabic Extended-B/A
        '\u{0590}'..='\u{08FF}'
        // Hebrew and Arabic presentation forms A
        | '\u{FB1D}'..='\u{FDFF}'
        // Arabic presentation forms B
        | '\u{FE70}'..='\u{FEFF}'
    )
}

/// Detect whether text contains any right-to-left script character.
#[must_use]
pub fn is_rtl(text: &str) -> bool {
    text.chars().any(is_rtl_char)
}

/// Direction attribute value for a piece of text.
#[must_use]
pub(crate) fn dir_for(is_rtl: bool) -> &'static str {
    if is_rtl { "rtl" } else { "ltr" }
}

/// Remove every `<...>` tag from an HTML fragment, keeping the text between.
pub(crate) fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}
