//! Language identification and detection
//!
//! Maps file extensions to the languages a symbol source understands.

use std::path::Path;

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    PlainText,
    JavaScript,
    TypeScript,
    Tsx,
    Java,
    Php,
    C,
    Cpp,
    Rust,
}

impl LanguageId {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" | "jsx" => LanguageId::JavaScript,
            "ts" | "mts" | "cts" => LanguageId::TypeScript,
            "tsx" => LanguageId::Tsx,
            "java" => LanguageId::Java,
            "php" => LanguageId::Php,
            "c" | "h" => LanguageId::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => LanguageId::Cpp,
            "rs" => LanguageId::Rust,
            _ => LanguageId::PlainText,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageId::PlainText)
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::JavaScript => "JavaScript",
            LanguageId::TypeScript => "TypeScript",
            LanguageId::Tsx => "TSX",
            LanguageId::Java => "Java",
            LanguageId::Php => "PHP",
            LanguageId::C => "C",
            LanguageId::Cpp => "C++",
            LanguageId::Rust => "Rust",
        }
    }

    /// Check if declarations can be extracted for this language
    pub fn has_symbols(&self) -> bool {
        !matches!(self, LanguageId::PlainText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(LanguageId::from_extension("js"), LanguageId::JavaScript);
        assert_eq!(LanguageId::from_extension("mjs"), LanguageId::JavaScript);
        assert_eq!(LanguageId::from_extension("jsx"), LanguageId::JavaScript);
        assert_eq!(LanguageId::from_extension("TS"), LanguageId::TypeScript);
        assert_eq!(LanguageId::from_extension("tsx"), LanguageId::Tsx);
        assert_eq!(LanguageId::from_extension("h"), LanguageId::C);
        assert_eq!(LanguageId::from_extension("hpp"), LanguageId::Cpp);
        assert_eq!(LanguageId::from_extension("rs"), LanguageId::Rust);
        assert_eq!(LanguageId::from_extension("md"), LanguageId::PlainText);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            LanguageId::from_path(Path::new("src/demo.ts")),
            LanguageId::TypeScript
        );
        assert_eq!(
            LanguageId::from_path(Path::new("/path/to/Main.java")),
            LanguageId::Java
        );
        assert_eq!(
            LanguageId::from_path(Path::new("Makefile")),
            LanguageId::PlainText
        );
        assert!(!LanguageId::PlainText.has_symbols());
    }
}
