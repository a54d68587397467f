pub mod go_lang;
pub mod python;
pub mod rust_lang;

use crate::registry::Language;
use crate::traits::ErrorCodeEmitter;

/// Create the emitter for the given language.
pub fn create_emitter(language: Language) -> Box<dyn ErrorCodeEmitter> {
    match language {
        Language::Go => Box::new(go_lang::GoEmitter),
        Language::Python => Box::new(python::PythonEmitter),
        Language::Rust => Box::new(rust_lang::RustEmitter),
    }
}

/// Double-quoted string literal. Quotes, backslashes and common
/// whitespace escapes are shared by all targets; other control characters
/// go through `escape_other`.
pub(crate) fn quote(s: &str, escape_other: fn(char) -> String) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&escape_other(c)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Collapse contract text onto one line for use inside a line comment.
pub(crate) fn comment_text(s: &str) -> String {
    s.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
