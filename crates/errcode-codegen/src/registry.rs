use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::emitters;
use crate::error::CodegenError;
use crate::traits::ErrorCodeEmitter;

/// Target languages with a built-in emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Go,
    Python,
    Rust,
}

impl Language {
    /// Every supported language, in registry order.
    pub const ALL: [Language; 3] = [Language::Go, Language::Python, Language::Rust];

    /// Command-line token (e.g., "python").
    pub fn token(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Python => "python",
            Language::Rust => "rust",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Language {
    type Err = CodegenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.token() == token)
            .ok_or_else(|| CodegenError::UnsupportedLanguage {
                token: token.to_string(),
                supported: Language::ALL.iter().map(|l| l.token()).collect(),
            })
    }
}

/// Fixed mapping from language token to emitter.
///
/// Built once at startup and only read afterwards; pass it by reference to
/// a [`crate::CodeGenerator`].
pub struct EmitterRegistry {
    emitters: IndexMap<&'static str, Box<dyn ErrorCodeEmitter>>,
}

impl std::fmt::Debug for EmitterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmitterRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EmitterRegistry {
    /// Registry holding every built-in emitter.
    pub fn new() -> Self {
        Self::from_emitters(Language::ALL.into_iter().map(emitters::create_emitter).collect())
    }

    pub(crate) fn from_emitters(list: Vec<Box<dyn ErrorCodeEmitter>>) -> Self {
        let emitters = list
            .into_iter()
            .map(|emitter| (emitter.language().token(), emitter))
            .collect();
        Self { emitters }
    }

    /// Look up the emitter and output file extension for `token`.
    pub fn resolve(&self, token: &str) -> Result<(&dyn ErrorCodeEmitter, &str), CodegenError> {
        match self.emitters.get(token) {
            Some(emitter) => Ok((emitter.as_ref(), emitter.file_extension())),
            None => Err(CodegenError::UnsupportedLanguage {
                token: token.to_string(),
                supported: self.languages(),
            }),
        }
    }

    /// Registered language tokens, in registration order.
    pub fn languages(&self) -> Vec<&'static str> {
        self.emitters.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_builtin_languages() {
        let registry = EmitterRegistry::new();
        for (token, ext) in [("go", "go"), ("python", "py"), ("rust", "rs")] {
            let (emitter, resolved_ext) = registry.resolve(token).unwrap();
            assert_eq!(resolved_ext, ext);
            assert_eq!(emitter.language().token(), token);
        }
    }

    #[test]
    fn test_resolve_unknown_token() {
        let registry = EmitterRegistry::new();
        match registry.resolve("cobol").err().unwrap() {
            CodegenError::UnsupportedLanguage { token, supported } => {
                assert_eq!(token, "cobol");
                assert_eq!(supported, vec!["go", "python", "rust"]);
            }
            e => panic!("Expected UnsupportedLanguage, got: {:?}", e),
        }
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        let registry = EmitterRegistry::new();
        assert!(registry.resolve("Go").is_err());
        assert!(registry.resolve("").is_err());
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("rust".parse::<Language>().unwrap(), Language::Rust);
        assert_eq!(Language::Python.to_string(), "python");
        assert!("ts".parse::<Language>().is_err());
    }
}
