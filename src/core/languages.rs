//! Supported languages and file-extension mapping for the editor pane.

use std::path::Path;

use crate::core::api::LanguageInfo;

/// Builtin language list, used when the backend's `/supported-languages`
/// endpoint is unreachable and to populate the selector offline.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("java", "Java"),
    ("python", "Python"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("c", "C"),
    ("cpp", "C++"),
    ("csharp", "C#"),
    ("go", "Go"),
    ("rust", "Rust"),
    ("ruby", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("kotlin", "Kotlin"),
    ("scala", "Scala"),
    ("bash", "Bash"),
    ("sql", "SQL"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("json", "JSON"),
    ("yaml", "YAML"),
    ("xml", "XML"),
];

/// Builtin list in the same shape the backend returns.
pub fn builtin_language_list() -> Vec<LanguageInfo> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(value, label)| LanguageInfo {
            value: (*value).to_string(),
            label: (*label).to_string(),
            description: None,
        })
        .collect()
}

/// Map a file's extension to a language value for the code context.
/// Covers the extensions the file picker accepts; anything else is None.
pub fn language_for_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let language = match ext.as_str() {
        "java" => "java",
        "py" => "python",
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "go" => "go",
        "rs" => "rust",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "kt" => "kotlin",
        "scala" => "scala",
        "clj" => "clojure",
        "sh" => "bash",
        "sql" => "sql",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "xml" => "xml",
        "yaml" | "yml" => "yaml",
        "txt" => "text",
        _ => return None,
    };
    Some(language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_maps_common_languages() {
        assert_eq!(language_for_extension(Path::new("a/b/main.py")), Some("python"));
        assert_eq!(language_for_extension(Path::new("App.tsx")), Some("typescript"));
        assert_eq!(language_for_extension(Path::new("lib.RS")), Some("rust"));
        assert_eq!(language_for_extension(Path::new("mod.h")), Some("c"));
    }

    #[test]
    fn extension_unknown_or_missing_is_none() {
        assert_eq!(language_for_extension(Path::new("Makefile")), None);
        assert_eq!(language_for_extension(&PathBuf::from("weird.xyz")), None);
    }

    #[test]
    fn builtin_list_matches_table() {
        let list = builtin_language_list();
        assert_eq!(list.len(), SUPPORTED_LANGUAGES.len());
        assert!(list.iter().any(|l| l.value == "java" && l.label == "Java"));
    }
}
