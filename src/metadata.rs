//! Best-effort command metadata from source text
//!
//! Pattern-matches `export default defineCommand({...})`,
//! `export default {...}` and `module.exports = ...` without parsing the
//! language. Results feed diagnostics (`clisynth list --metadata`) only;
//! scanning, validation and generation never depend on them.

use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

fn regex_export() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:export\s+default|module\.exports\s*=)\s*(?:defineCommand\s*\(\s*)?(\{|function\b|async\b|\(|[A-Za-z_$][\w$]*\s*=>)",
        )
        .expect("export pattern")
    })
}

fn regex_description() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"\bdescription\s*:\s*(?:'((?:\\.|[^'\\])*)'|"((?:\\.|[^"\\])*)"|`((?:\\.|[^`\\])*)`)"#,
        )
        .expect("description pattern")
    })
}

fn regex_alias() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\balias\s*:\s*(?:'([^']*)'|"([^"]*)"|\[([^\]]*)\])"#).expect("alias pattern")
    })
}

fn regex_string() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"'([^']*)'|"([^"]*)""#).expect("string pattern"))
}

fn regex_action() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\baction\s*[:(]").expect("action pattern"))
}

/// How the default export appears to be shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportShape {
    /// Object literal (optionally wrapped in `defineCommand`)
    Object,
    /// Function or arrow expression
    Factory,
}

/// What could be read from a command file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandMetadata {
    pub shape: ExportShape,
    /// Raw object literal text (object exports only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub has_action: bool,
}

/// Read a file and extract its metadata; `None` on any failure
pub fn extract_command_metadata(path: &Path) -> Option<CommandMetadata> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_command_metadata(&content),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot read command file");
            None
        }
    }
}

/// Extract metadata from source text; `None` when no default export is found
pub fn parse_command_metadata(source: &str) -> Option<CommandMetadata> {
    let caps = regex_export().captures(source)?;
    let head = caps.get(1)?;

    if head.as_str() != "{" {
        return Some(CommandMetadata {
            shape: ExportShape::Factory,
            object: None,
            description: None,
            aliases: Vec::new(),
            has_action: false,
        });
    }

    let object = balanced_object(&source[head.start()..])?;
    let top = top_level(object);

    Some(CommandMetadata {
        shape: ExportShape::Object,
        description: find_description(&top),
        aliases: find_aliases(&top),
        has_action: regex_action().is_match(&top),
        object: Some(object.to_string()),
    })
}

fn find_description(top: &str) -> Option<String> {
    let caps = regex_description().captures(top)?;
    (1..=3)
        .find_map(|i| caps.get(i))
        .map(|m| m.as_str().to_string())
}

fn find_aliases(top: &str) -> Vec<String> {
    let Some(caps) = regex_alias().captures(top) else {
        return Vec::new();
    };

    if let Some(single) = caps.get(1).or_else(|| caps.get(2)) {
        return vec![single.as_str().to_string()];
    }

    caps.get(3)
        .map(|list| {
            regex_string()
                .captures_iter(list.as_str())
                .filter_map(|c| c.get(1).or_else(|| c.get(2)))
                .map(|m| m.as_str().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Slice from the opening `{` to its matching `}`, skipping string contents
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Keep only the outermost object's own text; nested braces become spaces
fn top_level(object: &str) -> String {
    let mut out = String::with_capacity(object.len());
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in object.chars() {
        let keep = depth <= 1;

        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
        } else {
            match c {
                '\'' | '"' | '`' => quote = Some(c),
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }

        let keep = keep && depth <= 1;
        out.push(if keep { c } else { ' ' });
    }

    out
}
