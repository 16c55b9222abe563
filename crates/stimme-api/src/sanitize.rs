//! Input sanitization for submitted voices.
//!
//! Strips HTML tags and the usual script-injection vectors (`javascript:`,
//! `data:`, `vbscript:` protocols and `on<word>=` event handlers), all
//! case-insensitively. Removal runs to a fixpoint, so nested payloads like
//! `javajavascript:script:` cannot survive one pass and reappear — the
//! sanitizer is idempotent.

const PROTOCOLS: [&str; 3] = ["javascript:", "data:", "vbscript:"];

pub fn sanitize_message(input: &str) -> String {
    let mut out = input.to_string();
    loop {
        let mut next = strip_html_tags(&out);
        for pattern in PROTOCOLS {
            next = remove_ascii_ci(&next, pattern);
        }
        next = remove_event_handlers(&next);
        if next == out {
            break;
        }
        out = next;
    }
    out.trim().to_string()
}

/// Normalize a comma-separated tag string: trim each tag, drop angle
/// brackets, drop empties, keep at most five. `None` when nothing is left.
pub fn sanitize_tags(input: &str) -> Option<String> {
    let tags: Vec<String> = input
        .split(',')
        .map(|tag| tag.trim().replace(['<', '>'], ""))
        .filter(|tag| !tag.is_empty())
        .take(5)
        .collect();

    if tags.is_empty() {
        None
    } else {
        Some(tags.join(","))
    }
}

/// Remove `<...>` spans. An unclosed `<` with no matching `>` is kept,
/// matching the `<[^>]*>` behavior the frontend relies on.
fn strip_html_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Remove every ASCII-case-insensitive occurrence of `pattern` (itself
/// ASCII), left to right.
fn remove_ascii_ci(input: &str, pattern: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(at) = find_ascii_ci(rest, pattern) {
        out.push_str(&rest[..at]);
        rest = &rest[at + pattern.len()..];
    }
    out.push_str(rest);
    out
}

fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    // The needle is pure ASCII, so any match lies on char boundaries.
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Remove `on<word>=` event-handler patterns (`onclick=`, `ONLOAD=`, ...).
fn remove_event_handlers(input: &str) -> String {
    let b = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(b.len());
    let mut i = 0;
    while i < b.len() {
        if i + 2 < b.len()
            && b[i].eq_ignore_ascii_case(&b'o')
            && b[i + 1].eq_ignore_ascii_case(&b'n')
        {
            let mut j = i + 2;
            while j < b.len() && (b[j].is_ascii_alphanumeric() || b[j] == b'_') {
                j += 1;
            }
            if j > i + 2 && j < b.len() && b[j] == b'=' {
                i = j + 1;
                continue;
            }
        }
        out.push(b[i]);
        i += 1;
    }
    // Only ASCII spans were removed, so this is still valid UTF-8.
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_tags() {
        assert_eq!(
            sanitize_message("hello <script>alert(1)</script> world"),
            "hello alert(1) world"
        );
        assert_eq!(sanitize_message("<b>bold</b> text"), "bold text");
    }

    #[test]
    fn keeps_unclosed_angle_bracket() {
        assert_eq!(sanitize_message("5 < 7 is true"), "5 < 7 is true");
    }

    #[test]
    fn removes_protocols_any_case() {
        assert_eq!(sanitize_message("JaVaScRiPt:alert(1)"), "alert(1)");
        assert_eq!(sanitize_message("see DATA:text/html here"), "see text/html here");
        assert_eq!(sanitize_message("vbscript:msgbox"), "msgbox");
    }

    #[test]
    fn removes_event_handlers() {
        assert_eq!(sanitize_message("x onclick=alert(1) y"), "x alert(1) y");
        assert_eq!(sanitize_message("ONLOAD=boom"), "boom");
        // Bare "on" with no word characters before '=' is not a handler.
        assert_eq!(sanitize_message("carry on= please"), "carry on= please");
    }

    #[test]
    fn nested_payloads_do_not_survive() {
        assert_eq!(sanitize_message("javajavascript:script:alert(1)"), "alert(1)");
        assert_eq!(sanitize_message("oonclick=nclick=x"), "x");
        assert_eq!(sanitize_message("java<b>script:alert(1)"), "alert(1)");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "plain text that needs no cleaning at all",
            "<script>javascript:data:onload=</script>",
            "javajavascript:script: mixed <i>with</i> tags",
            "  padded   with whitespace  ",
            "umlauts überall, großes ß",
        ];
        for input in inputs {
            let once = sanitize_message(input);
            assert_eq!(sanitize_message(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn tags_are_trimmed_capped_and_bracket_free() {
        assert_eq!(
            sanitize_tags(" a , b ,, <c> , d , e , f ").as_deref(),
            Some("a,b,c,d,e")
        );
        assert_eq!(sanitize_tags("single").as_deref(), Some("single"));
        assert_eq!(sanitize_tags("  ,, <> ,"), None);
        assert_eq!(sanitize_tags(""), None);
    }
}
