//! Handling of hand-written custom bodies.
//!
//! Bodies are opaque C++ text. Before splicing, they get a structural check
//! (non-empty, balanced delimiters) and a fixed list of named fix-ups for
//! idioms known to be malformed in existing spec files.

use lazy_static::lazy_static;
use regex::Regex;

/// A named textual patch applied to every custom body.
struct Fixup {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

lazy_static! {
    static ref FIXUPS: Vec<Fixup> = vec![Fixup {
        // raymath helpers are `static inline`, not members of the global
        // namespace as seen from the generated translation unit.
        name: "global-qualified-matrix-identity",
        pattern: Regex::new(r"(^|[^\w:])::MatrixIdentity\(\)").unwrap(),
        replacement: "${1}MatrixIdentity()",
    }];
    static ref RETURN_RE: Regex = Regex::new(r"^\s*return\b").unwrap();
}

/// Apply every fix-up in order.
pub fn apply_fixups(body: &str) -> String {
    FIXUPS.iter().fold(body.to_string(), |text, fixup| {
        let patched = fixup.pattern.replace_all(&text, fixup.replacement);
        if patched != text {
            tracing::debug!("applied fix-up {}", fixup.name);
        }
        patched.into_owned()
    })
}

/// Whether the last top-level statement of the body is a `return`.
///
/// Comments, literals and anything inside braces (nested blocks, lambdas)
/// are ignored. A body for which this is false may fall off its end, so the
/// emitter appends the nil sentinel.
pub fn ends_with_return(body: &str) -> bool {
    let Ok(code) = code_only(body) else {
        return false;
    };
    let mut top_level = String::with_capacity(code.len());
    let mut depth = 0usize;
    for c in code.chars() {
        match c {
            '{' => {
                depth += 1;
                top_level.push(' ');
            }
            '}' => {
                depth = depth.saturating_sub(1);
                // A closed top-level block ends a statement.
                top_level.push(if depth == 0 { ';' } else { ' ' });
            }
            c if depth == 0 => top_level.push(c),
            _ => top_level.push(' '),
        }
    }
    top_level
        .split(';')
        .rev()
        .find(|stmt| !stmt.trim().is_empty())
        .is_some_and(|stmt| RETURN_RE.is_match(stmt))
}

/// Prefix every non-blank line with `prefix`.
pub fn indent(body: &str, prefix: &str) -> String {
    body.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str,
    Char,
}

/// The body with comments and literals blanked to spaces. Line breaks and
/// character positions are kept, so line numbers still apply.
fn code_only(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut state = State::Code;
    let mut line = 1;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        match state {
            State::Code => match c {
                '/' if matches!(chars.peek(), Some('/') | Some('*')) => {
                    state = if chars.next() == Some('/') {
                        State::LineComment
                    } else {
                        State::BlockComment
                    };
                    out.push_str("  ");
                }
                '"' => {
                    state = State::Str;
                    out.push(' ');
                }
                '\'' => {
                    state = State::Char;
                    out.push(' ');
                }
                c => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                    out.push_str("  ");
                } else {
                    out.push(if c == '\n' { '\n' } else { ' ' });
                }
            }
            State::Str | State::Char => {
                let quote = if state == State::Str { '"' } else { '\'' };
                if c == '\\' {
                    out.push(' ');
                    match chars.next() {
                        Some('\n') => {
                            line += 1;
                            out.push('\n');
                        }
                        Some(_) => out.push(' '),
                        None => {}
                    }
                } else if c == quote {
                    state = State::Code;
                    out.push(' ');
                } else if c == '\n' {
                    return Err(format!("unterminated literal on line {}", line - 1));
                } else {
                    out.push(' ');
                }
            }
        }
    }

    match state {
        State::Str | State::Char => Err(format!("unterminated literal on line {}", line)),
        State::BlockComment => Err("unterminated block comment".to_string()),
        State::Code | State::LineComment => Ok(out),
    }
}

/// Structural check: the body is non-empty and `()`, `[]`, `{}` are
/// balanced outside string literals, character literals and comments.
///
/// Returns a human-readable reason on failure.
pub fn check_structure(body: &str) -> Result<(), String> {
    if body.trim().is_empty() {
        return Err("body is empty".to_string());
    }

    let mut open: Vec<(char, usize)> = Vec::new();
    for (i, text) in code_only(body)?.lines().enumerate() {
        let line = i + 1;
        for c in text.chars() {
            match c {
                '(' | '[' | '{' => open.push((c, line)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match open.pop() {
                        Some((o, _)) if o == expected => {}
                        Some((o, at)) => {
                            return Err(format!(
                                "'{}' on line {} closes '{}' opened on line {}",
                                c, line, o, at
                            ))
                        }
                        None => return Err(format!("unmatched '{}' on line {}", c, line)),
                    }
                }
                _ => {}
            }
        }
    }
    if let Some((o, at)) = open.pop() {
        return Err(format!("'{}' opened on line {} is never closed", o, at));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_body_passes() {
        let body = r#"
auto t = LoadTexture(args[0].as_string().c_str());
int id = rlreg::resources().textures.insert(t);
return Value::from_int(id);
"#;
        assert_eq!(check_structure(body), Ok(()));
    }

    #[test]
    fn delimiters_inside_literals_and_comments_are_ignored() {
        let body = r#"// close ) here
/* and { here */
DrawText("({[", 0, 0, 10, Value::to_color(args[0]));
char c = ')';
"#;
        assert_eq!(check_structure(body), Ok(()));
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        assert_eq!(check_structure(r#"TraceLog(0, "say \"(\"");"#), Ok(()));
    }

    #[test]
    fn empty_body_is_rejected() {
        assert_eq!(check_structure("  \n "), Err("body is empty".to_string()));
    }

    #[test]
    fn unclosed_brace_is_rejected() {
        let err = check_structure("if (x) {\n  y();\n").unwrap_err();
        assert!(err.contains("'{' opened on line 1"), "{err}");
    }

    #[test]
    fn mismatched_closer_is_rejected() {
        let err = check_structure("foo(]").unwrap_err();
        assert!(err.contains("closes '('"), "{err}");
    }

    #[test]
    fn stray_closer_is_rejected() {
        let err = check_structure("foo();\n}").unwrap_err();
        assert_eq!(err, "unmatched '}' on line 2");
    }

    #[test]
    fn unterminated_string_is_rejected() {
        assert!(check_structure("puts(\"oops);\n").is_err());
    }

    #[test]
    fn matrix_identity_fixup_only_touches_global_qualification() {
        assert_eq!(
            apply_fixups("Matrix m = ::MatrixIdentity();"),
            "Matrix m = MatrixIdentity();"
        );
        assert_eq!(apply_fixups("::MatrixIdentity()"), "MatrixIdentity()");
        assert_eq!(
            apply_fixups("auto m = rm::MatrixIdentity();"),
            "auto m = rm::MatrixIdentity();"
        );
    }

    #[test]
    fn return_detection_is_word_bounded() {
        assert!(ends_with_return("return Value::nil();"));
        assert!(ends_with_return("int id = 3;\nreturn Value::from_int(id);\n"));
        assert!(!ends_with_return("int returned = 1;"));
    }

    #[test]
    fn return_in_comment_or_string_does_not_count() {
        assert!(!ends_with_return("// no return needed here\nClearBackground(RAYWHITE);"));
        assert!(!ends_with_return("/* return */ EndDrawing();"));
        assert!(!ends_with_return("TraceLog(LOG_INFO, \"return\");"));
    }

    #[test]
    fn return_inside_nested_lambda_does_not_count() {
        let body = "std::vector<int> v{3, 1, 2};\n\
                    std::sort(v.begin(), v.end(), [](int a, int b) { return a < b; });";
        assert!(!ends_with_return(body));
    }

    #[test]
    fn conditional_return_is_not_final() {
        assert!(!ends_with_return("if (args[0].as_bool()) return Value::from_int(1);"));
        assert!(!ends_with_return("if (x) { return Value::nil(); }"));
        assert!(ends_with_return("if (x) { y(); }\nreturn Value::nil();"));
    }

    #[test]
    fn indent_skips_blank_lines() {
        assert_eq!(indent("a();\n\nb();", "  "), "  a();\n\n  b();");
    }
}
