//! Custom MiniJinja filters for JavaScript emission

use minijinja::Environment;

/// Register all custom filters with the environment
pub fn register_filters(env: &mut Environment<'_>) {
    env.add_filter("js_string", js_string);
}

/// Quote a value as a single-quoted JavaScript string literal
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_plain() {
        assert_eq!(js_string("hefs"), "'hefs'");
    }

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("it's"), r"'it\'s'");
        assert_eq!(js_string(r"C:\cmds"), r"'C:\\cmds'");
        assert_eq!(js_string("a\nb"), r"'a\nb'");
        assert_eq!(js_string("\u{0}"), r"'\u0000'");
    }
}
