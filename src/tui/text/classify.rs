//! Heuristic language detection for code blocks without a usable fence tag.

use std::sync::LazyLock;

use regex::Regex;

/// Label used when no heuristic matches; doubles as "plain/unclassified".
pub(crate) const FALLBACK_LABEL: &str = "text";

static JAVA_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"import\s+java\.").expect("java import pattern compiles"));
static PYTHON_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*#.*python").expect("python comment pattern compiles"));
static HTML_TAG_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\w+.*>.*</\w+>").expect("html tag pattern compiles"));
static CSS_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+\s*\{[^}]*\}").expect("css block pattern compiles"));
static SQL_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|CREATE|ALTER|DROP)\b")
        .expect("sql keyword pattern compiles")
});
static POINTER_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+\s*\*\s*\w+").expect("pointer pattern compiles"));

/// One detection rule: `label` wins when `matches` fires, unless a refinement
/// step picks a more specific label (javascript/typescript, c/cpp).
struct Rule {
    label: &'static str,
    matches: fn(&str) -> bool,
    refine: Option<fn(&str) -> &'static str>,
}

/// Priority-ordered rule table. First match wins; later rules are never
/// consulted once an earlier one fires, so e.g. `import` lands on python
/// before the javascript keywords are even looked at.
const RULES: &[Rule] = &[
    Rule {
        label: "java",
        matches: is_java,
        refine: None,
    },
    Rule {
        label: "python",
        matches: is_python,
        refine: None,
    },
    Rule {
        label: "javascript",
        matches: is_js_family,
        refine: Some(refine_js_family),
    },
    Rule {
        label: "html",
        matches: is_html,
        refine: None,
    },
    Rule {
        label: "css",
        matches: is_css,
        refine: None,
    },
    Rule {
        label: "sql",
        matches: is_sql,
        refine: None,
    },
    Rule {
        label: "json",
        matches: is_json,
        refine: None,
    },
    Rule {
        label: "c",
        matches: is_c_family,
        refine: Some(refine_c_family),
    },
];

fn is_java(code: &str) -> bool {
    code.contains("public class")
        || code.contains("public static void main")
        || JAVA_IMPORT_RE.is_match(code)
}

fn is_python(code: &str) -> bool {
    code.contains("def ")
        || code.contains("import ")
        || code.contains("from ")
        || PYTHON_COMMENT_RE.is_match(code)
}

fn is_js_family(code: &str) -> bool {
    code.contains("function ")
        || code.contains("const ")
        || code.contains("let ")
        || code.contains("var ")
        || code.contains("=>")
        || code.contains("console.log")
}

fn refine_js_family(code: &str) -> &'static str {
    if code.contains("interface ") || code.contains(": ") {
        "typescript"
    } else {
        "javascript"
    }
}

fn is_html(code: &str) -> bool {
    code.contains("<html") || code.contains("<!DOCTYPE") || HTML_TAG_PAIR_RE.is_match(code)
}

fn is_css(code: &str) -> bool {
    CSS_BLOCK_RE.is_match(code) || code.contains("@media") || code.contains("@import")
}

fn is_sql(code: &str) -> bool {
    SQL_KEYWORD_RE.is_match(code)
}

/// Bracket shape check plus a strict parse. A parse failure means the rule
/// simply does not match; the error never leaves this function.
fn is_json(code: &str) -> bool {
    let bracketed = (code.starts_with('{') && code.ends_with('}'))
        || (code.starts_with('[') && code.ends_with(']'));
    bracketed && serde_json::from_str::<serde_json::Value>(code).is_ok()
}

fn is_c_family(code: &str) -> bool {
    code.contains("#include") || code.contains("int main(") || POINTER_DECL_RE.is_match(code)
}

fn refine_c_family(code: &str) -> &'static str {
    if code.contains("std::") || code.contains("cout") {
        "cpp"
    } else {
        "c"
    }
}

/// Guess the language of a bare code block. Total and deterministic: ambiguous
/// or unrecognizable content resolves to [`FALLBACK_LABEL`], never an error.
pub(crate) fn detect_language(code: &str) -> &'static str {
    let trimmed = code.trim();
    for rule in RULES {
        if (rule.matches)(trimmed) {
            return match rule.refine {
                Some(refine) => refine(trimmed),
                None => rule.label,
            };
        }
    }
    FALLBACK_LABEL
}

/// Final display label for a code segment. Explicit fence tags are trusted
/// as-is; only an empty tag or the generic placeholder goes through detection.
pub(crate) fn resolve_language<'a>(provisional: &'a str, content: &str) -> &'a str {
    if !provisional.is_empty() && provisional != FALLBACK_LABEL {
        return provisional;
    }
    detect_language(content)
}
