//! Outer template substitution
//!
//! The outer template is user-suppliable plain text with `{{NAME}}`
//! placeholders. Substitution is a single literal pass: inserted values are
//! never rescanned, and unknown placeholders are kept verbatim.

/// Template used when the configuration supplies none
pub const DEFAULT_TEMPLATE: &str = "
{{IMPORTS}}

// Generated CLI code
{{REGISTRATIONS}}
";

pub const IMPORTS: &str = "IMPORTS";
pub const BIN_NAME: &str = "BIN_NAME";
pub const VERSION: &str = "VERSION";
pub const DESCRIPTION: &str = "DESCRIPTION";
pub const REGISTRATIONS: &str = "REGISTRATIONS";

/// Replace every known `{{NAME}}` in `template` with its value
pub fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
