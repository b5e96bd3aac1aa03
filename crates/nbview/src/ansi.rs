use ratatui::text::Text;

fn expand_tabs(s: &str) -> std::borrow::Cow<'_, str> {
    if s.contains('\t') {
        std::borrow::Cow::Owned(s.replace('\t', "    "))
    } else {
        std::borrow::Cow::Borrowed(s)
    }
}

/// Converts output text that may carry ANSI colour codes (tracebacks, coloured logs) into a
/// [`Text`].
///
/// Without the `ansi` feature the escapes are kept verbatim.
pub fn ansi_text(input: &str) -> Text<'static> {
    let input = expand_tabs(input);
    #[cfg(feature = "ansi")]
    {
        use ansi_to_tui::IntoText;
        let raw: &str = &input;
        raw.into_text()
            .unwrap_or_else(|_| Text::from(input.to_string()))
    }
    #[cfg(not(feature = "ansi"))]
    {
        Text::from(input.into_owned())
    }
}

/// Removes ANSI escape sequences (CSI colour codes, OSC titles and links), keeping the text.
pub fn strip_ansi(input: &str) -> std::borrow::Cow<'_, str> {
    if !input.contains('\u{1b}') {
        return std::borrow::Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\u{1b}' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('[') => {
                // Parameters and intermediates, then one final byte in `@`..=`~`.
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                // Terminated by BEL or ST (`ESC \`).
                while let Some(c) = chars.next() {
                    if c == '\u{7}' {
                        break;
                    }
                    if c == '\u{1b}' {
                        chars.next_if_eq(&'\\');
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    std::borrow::Cow::Owned(out)
}
