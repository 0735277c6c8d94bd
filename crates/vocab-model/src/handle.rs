use tracing::warn;

const REPLACED_CHARS: [char; 4] = [' ', '"', '\'', '\\'];

/// Turn free text into a lowercase handle.
///
/// Spaces, quotes and backslashes become `sep`, runs of separators collapse
/// to one, and the result is cut to `max_len` characters (0 = no limit).
pub fn handlify(text: &str, sep: char, max_len: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        warn!("handlify: text is empty");
        return String::new();
    }
    let mut handle = String::with_capacity(trimmed.len());
    let mut prev_sep = false;
    for ch in trimmed.to_lowercase().chars() {
        let ch = if REPLACED_CHARS.contains(&ch) { sep } else { ch };
        if ch == sep {
            if prev_sep {
                continue;
            }
            prev_sep = true;
        } else {
            prev_sep = false;
        }
        handle.push(ch);
    }
    if max_len > 0 {
        handle.chars().take(max_len).collect()
    } else {
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::handlify;

    #[test]
    fn collapses_separators() {
        assert_eq!(handlify("  Covid-19  Dx \"x\" ", '_', 64), "covid-19_dx_x_");
    }

    #[test]
    fn truncates() {
        assert_eq!(handlify("Abc Def", '_', 3), "abc");
        assert_eq!(handlify("Abc Def", '-', 0), "abc-def");
    }

    #[test]
    fn empty_text() {
        assert_eq!(handlify("   ", '_', 64), "");
    }
}
