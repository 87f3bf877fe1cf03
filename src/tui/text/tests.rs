use super::{
    FALLBACK_LABEL, Segment, detect_language, parse_message_segments, resolve_language,
    style_prose_line, wrap_message,
};

// --- segmentation ---

#[test]
fn segments_plain_text_is_single_raw_segment() {
    let segs = parse_message_segments("Just plain text.");
    assert_eq!(segs, vec![Segment::Text("Just plain text.")]);
}

#[test]
fn segments_empty_input_yields_one_empty_text_segment() {
    // Fallback path returns the raw input untouched, even when empty.
    let segs = parse_message_segments("");
    assert_eq!(segs, vec![Segment::Text("")]);
}

#[test]
fn segments_whitespace_only_input_stays_raw() {
    // The no-fence path skips trimming; whitespace-only input survives as-is.
    let segs = parse_message_segments("  \n\t ");
    assert_eq!(segs, vec![Segment::Text("  \n\t ")]);
}

#[test]
fn segments_text_code_text_in_order() {
    let segs =
        parse_message_segments("Here is code:\n```python\ndef f():\n    return 1\n```\nDone.");
    assert_eq!(
        segs,
        vec![
            Segment::Text("Here is code:"),
            Segment::Code {
                language: "python",
                content: "def f():\n    return 1",
            },
            Segment::Text("Done."),
        ]
    );
}

#[test]
fn segments_code_block_without_tag_has_empty_language() {
    let segs = parse_message_segments("```\nconsole.log('hi')\n```");
    assert_eq!(
        segs,
        vec![Segment::Code {
            language: "",
            content: "console.log('hi')",
        }]
    );
}

#[test]
fn segments_tag_must_touch_the_fence() {
    // A space between fence and word means no tag; the word is block content.
    let segs = parse_message_segments("``` python\nx = 1\n```");
    match &segs[0] {
        Segment::Code { language, content } => {
            assert!(language.is_empty());
            assert!(content.contains("x = 1"));
        }
        other => panic!("expected code segment, got {:?}", other),
    }
}

#[test]
fn segments_unterminated_fence_is_ordinary_text() {
    let segs = parse_message_segments("look:\n```rust\nfn main() {");
    assert_eq!(segs, vec![Segment::Text("look:\n```rust\nfn main() {")]);
}

#[test]
fn segments_multiple_blocks_preserve_order() {
    let segs = parse_message_segments("a\n```x\n1\n```\nb\n```y\n2\n```\nc");
    assert_eq!(segs.len(), 5);
    assert_eq!(segs[0], Segment::Text("a"));
    assert_eq!(
        segs[1],
        Segment::Code {
            language: "x",
            content: "1",
        }
    );
    assert_eq!(segs[2], Segment::Text("b"));
    assert_eq!(
        segs[3],
        Segment::Code {
            language: "y",
            content: "2",
        }
    );
    assert_eq!(segs[4], Segment::Text("c"));
}

#[test]
fn segments_empty_block_body_is_dropped() {
    let segs = parse_message_segments("before\n```\n```\nafter");
    assert_eq!(segs, vec![Segment::Text("before"), Segment::Text("after")]);
}

#[test]
fn segments_only_an_empty_block_falls_back_to_raw_input() {
    // Everything trims away, so the whole input (fences included) comes back raw.
    let segs = parse_message_segments("```\n```");
    assert_eq!(segs, vec![Segment::Text("```\n```")]);
}

#[test]
fn segments_multi_path_never_returns_empty_content() {
    let segs = parse_message_segments("  \n```go\nx := 1\n```\n  ");
    assert_eq!(segs.len(), 1);
    for seg in &segs {
        assert!(!seg.content().trim().is_empty());
    }
}

#[test]
fn segments_fence_syntax_never_leaks_into_neighbors() {
    let input = "intro\n```sql\nSELECT 1;\n```\noutro";
    let segs = parse_message_segments(input);
    for seg in &segs {
        match seg {
            Segment::Text(t) => assert!(!t.contains("```")),
            Segment::Code { content, .. } => assert!(!content.contains("```")),
        }
    }
    // Round trip: contents appear in source order with only fences/tags removed.
    let mut cursor = 0;
    for seg in &segs {
        let pos = input[cursor..]
            .find(seg.content())
            .expect("segment content comes from the input");
        cursor += pos + seg.content().len();
    }
}

// --- language detection ---

#[test]
fn detect_java_by_class_and_import() {
    assert_eq!(detect_language("public class Foo {}"), "java");
    assert_eq!(detect_language("public static void main(String[] a) {}"), "java");
    assert_eq!(detect_language("import java.util.List;"), "java");
}

#[test]
fn detect_python_by_keywords_and_comment() {
    assert_eq!(detect_language("def f():\n    pass"), "python");
    assert_eq!(detect_language("from os import path"), "python");
    assert_eq!(detect_language("# Python example\nx = 1"), "python");
}

#[test]
fn detect_python_wins_over_javascript() {
    // `import` (priority 2) fires before any javascript keyword is consulted.
    assert_eq!(detect_language("import os\nfunction f() {}"), "python");
    assert_eq!(detect_language("import os\ndef run(): pass"), "python");
}

#[test]
fn detect_javascript_by_console_log() {
    assert_eq!(detect_language("console.log('hi')"), "javascript");
    assert_eq!(detect_language("function f() { return 1; }"), "javascript");
}

#[test]
fn detect_typescript_by_interface_or_annotation() {
    assert_eq!(detect_language("interface P { }\nconst x = 1;"), "typescript");
    assert_eq!(detect_language("const n: number = 1;"), "typescript");
}

#[test]
fn detect_html_by_doctype_and_tag_pair() {
    assert_eq!(detect_language("<!DOCTYPE html><html></html>"), "html");
    assert_eq!(detect_language("<div class=\"x\">hello</div>"), "html");
}

#[test]
fn detect_css_by_block_and_at_rule() {
    assert_eq!(detect_language(".card { color: red }"), "css");
    assert_eq!(detect_language("@media print\nbody\ncolor"), "css");
}

#[test]
fn detect_sql_is_case_insensitive() {
    assert_eq!(detect_language("update users set active = 1;"), "sql");
    assert_eq!(detect_language("DROP TABLE users;"), "sql");
}

#[test]
fn detect_python_wins_over_sql_via_from() {
    // "from " fires the python rule before the SQL keywords are consulted.
    assert_eq!(detect_language("select * from users"), "python");
}

#[test]
fn detect_sql_outranks_json() {
    // Valid JSON that contains a SQL keyword resolves by priority, not shape.
    assert_eq!(detect_language("{\"query\": \"SELECT 1\"}"), "sql");
}

#[test]
fn detect_json_requires_a_clean_parse() {
    assert_eq!(detect_language("{\"a\": 1}"), "json");
    assert_eq!(detect_language("[1, 2, 3]"), "json");
    // Bracketed but unparseable: the rule fails quietly and evaluation moves on.
    assert_eq!(detect_language("{broken"), FALLBACK_LABEL);
    assert_eq!(detect_language("{oops: trailing,}"), FALLBACK_LABEL);
}

#[test]
fn detect_c_and_cpp() {
    assert_eq!(detect_language("#include <stdio.h>\nchar *p = s;"), "c");
    assert_eq!(detect_language("#include <iostream>\nstd::vector<int> v;"), "cpp");
    assert_eq!(detect_language("int main( ) { cout << 1; }"), "cpp");
}

#[test]
fn detect_falls_back_to_text() {
    assert_eq!(detect_language("just some prose without code"), FALLBACK_LABEL);
    assert_eq!(detect_language(""), FALLBACK_LABEL);
}

#[test]
fn detect_is_deterministic_across_calls() {
    let snippet = "import os\nfunction f() {}";
    assert_eq!(detect_language(snippet), detect_language(snippet));
}

#[test]
fn resolve_trusts_explicit_tags() {
    assert_eq!(resolve_language("ruby", "def f(): pass"), "ruby");
    assert_eq!(resolve_language("rust", "console.log('x')"), "rust");
}

#[test]
fn resolve_detects_for_empty_or_placeholder_tags() {
    assert_eq!(resolve_language("", "console.log('hi')"), "javascript");
    assert_eq!(resolve_language("text", "def f():\n    pass"), "python");
    assert_eq!(resolve_language("", "no code here at all"), FALLBACK_LABEL);
}

// --- wrapping and prose styling ---

#[test]
fn wrap_message_preserves_newlines() {
    assert_eq!(wrap_message("line1\nline2", 100), ["line1", "line2"]);
}

#[test]
fn wrap_message_wraps_long_line() {
    assert_eq!(wrap_message("hello world test", 8), ["hello", "world", "test"]);
}

#[test]
fn wrap_message_keeps_empty_lines() {
    assert_eq!(wrap_message("a\n\nb", 100), ["a", "", "b"]);
}

#[test]
fn prose_line_plain() {
    let spans = style_prose_line("hello");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].content.as_ref(), "hello");
}

#[test]
fn prose_line_heading_strips_hashes() {
    let spans = style_prose_line("## Section");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].content.as_ref(), "Section");
}

#[test]
fn prose_line_bold_and_code() {
    use ratatui::style::Modifier;
    let spans = style_prose_line("**bold** and `code`");
    assert_eq!(spans[0].content.as_ref(), "bold");
    assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
    assert_eq!(spans[1].content.as_ref(), " and ");
    assert_eq!(spans[2].content.as_ref(), "code");
}

#[test]
fn prose_line_bullet_marker() {
    let spans = style_prose_line("- item");
    assert_eq!(spans[0].content.as_ref(), "• ");
    assert_eq!(spans[1].content.as_ref(), "item");
}

#[test]
fn prose_line_unpaired_markers_render_literally() {
    let spans = style_prose_line("a ** b ` c");
    let joined: String = spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(joined, "a ** b ` c");
}
