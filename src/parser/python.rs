//! Python definition extractor using tree-sitter.

use std::ops::Range;

use tree_sitter::{Language, Node};

use super::treesitter::{self, Preorder};
use super::{EntityKind, SourceEntity, Span};
use crate::error::SyntaxError;

pub struct PythonExtractor {
    language: Language,
}

impl PythonExtractor {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    /// Parse `source` and collect every function and class definition.
    pub fn extract(&self, source: &str) -> Result<Vec<SourceEntity>, SyntaxError> {
        let tree = treesitter::parse(&self.language, source)?;
        if let Some(err) = first_legacy_construct(tree.root_node(), source.as_bytes()) {
            return Err(err);
        }
        let entities = collect_entities(tree.root_node(), source.as_bytes());

        tracing::debug!(count = entities.len(), "extracted definitions");
        Ok(entities)
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// String prefixes Python 3 accepts, lowercased.
const STRING_PREFIXES: &[&str] = &["", "r", "u", "f", "b", "fr", "rf", "br", "rb"];

/// Find the first Python 2 construct the grammar still accepts.
///
/// The grammar parses `print x`, `exec code`, backtick repr and prefixes
/// such as `ur''` without errors, but none of them is valid Python 3.
fn first_legacy_construct(root: Node, source: &[u8]) -> Option<SyntaxError> {
    Preorder::new(root).find_map(|node| {
        let message = match node.kind() {
            "print_statement" => "print statement requires parentheses".to_string(),
            "exec_statement" => "exec statement requires parentheses".to_string(),
            "string_start" => {
                let text = node.utf8_text(source).ok()?;
                let prefix = text.trim_end_matches(['\'', '"', '`']);
                if text.ends_with('`') {
                    "backtick repr is not supported".to_string()
                } else if !STRING_PREFIXES.contains(&prefix.to_ascii_lowercase().as_str()) {
                    format!("invalid string prefix \"{}\"", prefix)
                } else {
                    return None;
                }
            }
            _ => return None,
        };

        let pos = node.start_position();
        Some(SyntaxError {
            message,
            line: pos.row + 1,
            column: pos.column + 1,
        })
    })
}

/// Byte ranges of string literals that span more than one line.
fn multiline_strings(root: Node) -> Vec<Range<usize>> {
    Preorder::new(root)
        .filter(|n| n.kind() == "string" && n.start_position().row != n.end_position().row)
        .map(|n| n.byte_range())
        .collect()
}

/// Walk the tree in pre-order, keeping function and class definitions.
///
/// The walk descends into definition bodies, so nested functions, methods
/// and inner classes are collected after their enclosing definition.
fn collect_entities(root: Node, source: &[u8]) -> Vec<SourceEntity> {
    let comments: Vec<Range<usize>> = Preorder::new(root)
        .filter(|n| n.kind() == "comment")
        .map(|n| n.byte_range())
        .collect();

    let strings = multiline_strings(root);

    Preorder::new(root)
        .filter_map(|node| entity_from_node(node, source, &comments, &strings))
        .collect()
}

fn entity_from_node(
    node: Node,
    source: &[u8],
    comments: &[Range<usize>],
    strings: &[Range<usize>],
) -> Option<SourceEntity> {
    let kind = match node.kind() {
        "function_definition" => EntityKind::Function,
        "class_definition" => EntityKind::Class,
        _ => return None,
    };

    let name = node
        .child_by_field_name("name")?
        .utf8_text(source)
        .ok()?
        .to_string();
    if name.is_empty() {
        return None;
    }

    // Decorators belong to the definition they wrap.
    let owner = match node.parent() {
        Some(parent) if parent.kind() == "decorated_definition" => parent,
        _ => node,
    };

    let span = Span::of(owner);
    let within = |r: &&Range<usize>| r.start >= span.start_byte && r.end <= span.end_byte;
    let comments = comments.iter().filter(within).cloned().collect();
    let strings = strings.iter().filter(within).cloned().collect();

    Some(SourceEntity {
        kind,
        name,
        line: node.start_position().row + 1,
        span,
        comments,
        strings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entities: &[SourceEntity]) -> Vec<(&str, EntityKind, usize)> {
        entities
            .iter()
            .map(|e| (e.name.as_str(), e.kind, e.line))
            .collect()
    }

    #[test]
    fn test_python_definitions_in_preorder() {
        let source = r#"
def hello():
    pass

class MyClass:
    def __init__(self):
        pass

    def method(self):
        def inner():
            return 1
        return inner()

class AnotherClass:
    class Meta:
        pass
"#;

        let entities = PythonExtractor::new().extract(source).unwrap();

        assert_eq!(
            names(&entities),
            vec![
                ("hello", EntityKind::Function, 2),
                ("MyClass", EntityKind::Class, 5),
                ("__init__", EntityKind::Function, 6),
                ("method", EntityKind::Function, 9),
                ("inner", EntityKind::Function, 10),
                ("AnotherClass", EntityKind::Class, 14),
                ("Meta", EntityKind::Class, 15),
            ]
        );
    }

    #[test]
    fn test_python_decorated_definition_span() {
        let source = r#"import functools

@functools.lru_cache(maxsize=None)
def fib(n):
    return n if n < 2 else fib(n - 1) + fib(n - 2)
"#;

        let entities = PythonExtractor::new().extract(source).unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].name, "fib");
        // Line points at the def keyword, the span at the decorator.
        assert_eq!(entities[0].line, 4);
        assert_eq!(entities[0].span.start_line, 3);
        assert_eq!(entities[0].span.end_line, 5);
    }

    #[test]
    fn test_python_async_function() {
        let source = "async def fetch(url):\n    return await get(url)\n";

        let entities = PythonExtractor::new().extract(source).unwrap();

        assert_eq!(names(&entities), vec![("fetch", EntityKind::Function, 1)]);
    }

    #[test]
    fn test_python_lambdas_are_not_entities() {
        let source = "square = lambda x: x * x\nVALUES = [1, 2, 3]\n";

        let entities = PythonExtractor::new().extract(source).unwrap();

        assert!(entities.is_empty());
    }

    #[test]
    fn test_python_syntax_error() {
        let source = "def ok():\n    pass\n\nprint((1, 2)\n";

        let err = PythonExtractor::new().extract(source).unwrap_err();

        assert!(err.line >= 4, "Expected error at or after line 4, got {}", err.line);
    }

    #[test]
    fn test_python2_print_statement_is_rejected() {
        let source = "print \"hello\"\n\ndef f():\n    return 1\n";

        let err = PythonExtractor::new().extract(source).unwrap_err();

        assert_eq!((err.line, err.column), (1, 1));
        assert!(err.message.contains("print"));
    }

    #[test]
    fn test_python2_constructs_are_rejected() {
        let cases = [
            ("def f():\n    exec \"x = 1\"\n", 2),
            ("def f(x):\n    return `x`\n", 2),
            ("def f():\n    return ur'x'\n", 2),
            ("def f():\n    return bu'x'\n", 2),
        ];

        for (source, line) in cases {
            let err = PythonExtractor::new().extract(source).unwrap_err();
            assert_eq!(err.line, line, "{:?}", source);
        }
    }

    #[test]
    fn test_python3_prints_and_prefixes_are_accepted() {
        let source = r#"def f(x):
    print(x)
    print("a", "b", sep=", ")
    return [r"\d", b"raw", Rb"\x00", f"{x}", rf"{x}\n", u"text", '''quoted''']
"#;

        let entities = PythonExtractor::new().extract(source).unwrap();

        assert_eq!(names(&entities), vec![("f", EntityKind::Function, 1)]);
    }

    #[test]
    fn test_python_multiline_strings_are_recorded() {
        let source = "def f():\n    \"\"\"Doc.\n\n    More.\n    \"\"\"\n    return 'one line'\n";

        let entities = PythonExtractor::new().extract(source).unwrap();

        assert_eq!(entities[0].strings.len(), 1);
        let range = entities[0].strings[0].clone();
        assert!(source[range].starts_with("\"\"\"Doc."));
    }

    #[test]
    fn test_python_comments_are_scoped_to_span() {
        let source = "# module comment\ndef f():\n    # inside\n    return 1\n";

        let entities = PythonExtractor::new().extract(source).unwrap();

        assert_eq!(entities[0].comments.len(), 1);
        let range = entities[0].comments[0].clone();
        assert_eq!(&source[range], "# inside");
    }

    #[test]
    fn test_python_nested_span_columns() {
        let source = "class Outer:\n    def method(self):\n        pass\n";

        let entities = PythonExtractor::new().extract(source).unwrap();

        assert_eq!(entities[0].span.start_column, 0);
        assert_eq!(entities[1].span.start_column, 4);
    }
}
