//! Include scanner
//!
//! Scans a file's raw bytes for quoted `#include "..."` directives with a
//! small state machine, without tokenizing C. System includes
//! (`#include <...>`) never match and are left untouched.

use cmerge_config::ScanMode;
use tracing::debug;

/// The directive token matched position-by-position.
const TOKEN: &[u8; 9] = b"#include\"";

/// Scan error for a malformed directive.
///
/// The byte offset always points at the `#` that opened the directive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("unterminated include filename on line {line} (byte offset {offset})")]
    UnterminatedQuote { line: usize, offset: usize },

    #[error("missing newline after include directive on line {line} (byte offset {offset})")]
    MissingNewline { line: usize, offset: usize },
}

/// A quoted-include directive found in a source buffer.
///
/// `[start, stop)` covers the full directive text in the containing
/// buffer: from the `#` through the closing quote, any trailing same-line
/// text, and the terminating newline. Splicing out exactly this range
/// removes the whole directive line tail from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Target filename as written between the quotes
    pub target: String,
    /// Byte offset of the `#`
    pub start: usize,
    /// Byte offset one past the terminating newline
    pub stop: usize,
    /// 1-based line number of the directive
    pub line: usize,
}

/// Scan `contents` for quoted-include directives, in order of appearance.
///
/// A match may only begin at the start of a line (indentation is allowed).
/// In `ScanMode::Lenient` spaces and tabs are transparent even in the
/// middle of the `#include` token; in `ScanMode::Strict` whitespace is only
/// permitted before the `#` and between `#include` and the opening quote.
pub fn scan_includes(
    contents: &[u8],
    mode: ScanMode,
) -> Result<Vec<IncludeDirective>, ScanError> {
    let mut directives = Vec::new();

    // ti: next index into TOKEN to match; 0 means no partial match.
    let mut ti = 0usize;
    let mut at_line_start = true;
    let mut match_start = 0usize;
    let mut line = 1usize;

    let mut i = 0usize;
    while i < contents.len() {
        let c = contents[i];

        if c == b' ' || c == b'\t' {
            // Whitespace is transparent at token boundaries; lenient mode
            // also tolerates it inside the token.
            let transparent = ti == 0 || ti == 8 || mode == ScanMode::Lenient;
            if !transparent {
                ti = 0;
                at_line_start = false;
            }
            i += 1;
            continue;
        }

        if (at_line_start || ti > 0) && c == TOKEN[ti] {
            if ti == 0 {
                match_start = i;
                at_line_start = false;
            }
            ti += 1;
            if ti == TOKEN.len() {
                // Matched `#include"`; take bytes up to the closing quote
                // as the filename.
                let name_start = i + 1;
                let mut j = name_start;
                while j < contents.len() && contents[j] != b'"' {
                    if contents[j] == b'\n' {
                        return Err(ScanError::UnterminatedQuote {
                            line,
                            offset: match_start,
                        });
                    }
                    j += 1;
                }
                if j == contents.len() {
                    return Err(ScanError::UnterminatedQuote {
                        line,
                        offset: match_start,
                    });
                }
                let target = String::from_utf8_lossy(&contents[name_start..j]).into_owned();

                // Consume through the end of the line so trailing text
                // after the closing quote is elided with the directive.
                let mut k = j + 1;
                while k < contents.len() && contents[k] != b'\n' {
                    k += 1;
                }
                if k == contents.len() {
                    return Err(ScanError::MissingNewline {
                        line,
                        offset: match_start,
                    });
                }

                debug!(
                    target: "cmerge::scanner",
                    name = %target,
                    line,
                    "found an include"
                );
                directives.push(IncludeDirective {
                    target,
                    start: match_start,
                    stop: k + 1,
                    line,
                });

                line += 1;
                i = k + 1;
                ti = 0;
                at_line_start = true;
                continue;
            }
            i += 1;
            continue;
        }

        ti = 0;
        if c == b'\n' {
            line += 1;
            at_line_start = true;
        } else {
            at_line_start = false;
        }
        i += 1;
    }

    Ok(directives)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str) -> Vec<IncludeDirective> {
        scan_includes(src.as_bytes(), ScanMode::Lenient).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_no_includes() {
        assert!(scan("int main() { return 0; }\n").is_empty());
    }

    #[test]
    fn test_single_include_offsets() {
        let src = "#include \"util.h\"\nint main(){}\n";
        let found = scan(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target, "util.h");
        assert_eq!(found[0].start, 0);
        // Stop is one past the newline
        assert_eq!(found[0].stop, src.find('\n').unwrap() + 1);
        assert_eq!(found[0].line, 1);
    }

    #[test]
    fn test_include_without_space() {
        let found = scan("#include\"a.h\"\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target, "a.h");
    }

    #[test]
    fn test_system_include_ignored() {
        assert!(scan("#include <stdio.h>\n").is_empty());
    }

    #[test]
    fn test_multiple_includes_in_order() {
        let src = "#include \"a.h\"\n#include \"b.h\"\nint x;\n#include \"c.h\"\n";
        let found = scan(src);
        let names: Vec<_> = found.iter().map(|d| d.target.as_str()).collect();
        assert_eq!(names, vec!["a.h", "b.h", "c.h"]);
        assert_eq!(found[1].line, 2);
        assert_eq!(found[2].line, 4);
    }

    #[test]
    fn test_directive_must_start_at_line_start() {
        assert!(scan("int x; #include \"a.h\"\n").is_empty());
    }

    #[test]
    fn test_indented_directive_matches() {
        let found = scan("  \t#include \"a.h\"\n");
        assert_eq!(found.len(), 1);
        // start points at the '#', not the indentation
        assert_eq!(found[0].start, 3);
    }

    #[test]
    fn test_lenient_accepts_whitespace_mid_token() {
        let found = scan("# include\t\"a.h\"\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target, "a.h");

        let found = scan("#in clu de \"b.h\"\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target, "b.h");
    }

    #[test]
    fn test_strict_rejects_whitespace_mid_token() {
        let src = "# include \"a.h\"\n";
        assert!(scan_includes(src.as_bytes(), ScanMode::Strict)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_strict_accepts_plain_directive() {
        let src = "  #include \"a.h\"\n#include\t\"b.h\"\n";
        let found = scan_includes(src.as_bytes(), ScanMode::Strict).unwrap();
        let names: Vec<_> = found.iter().map(|d| d.target.as_str()).collect();
        assert_eq!(names, vec!["a.h", "b.h"]);
    }

    #[test]
    fn test_partial_token_resets() {
        assert!(scan("#includx \"a.h\"\n").is_empty());
    }

    #[test]
    fn test_stop_covers_trailing_text() {
        let src = "#include \"a.h\" // legacy\nint x;\n";
        let found = scan(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stop, src.find('\n').unwrap() + 1);
    }

    #[test]
    fn test_crlf_line_ending() {
        let src = "#include \"a.h\"\r\nint x;\r\n";
        let found = scan(src);
        assert_eq!(found.len(), 1);
        // The '\r' is elided along with the directive
        assert_eq!(found[0].stop, src.find('\n').unwrap() + 1);
    }

    #[test]
    fn test_unterminated_quote_at_eof() {
        let err = scan_includes(b"#include \"a.h", ScanMode::Lenient).unwrap_err();
        assert_eq!(
            err,
            ScanError::UnterminatedQuote { line: 1, offset: 0 }
        );
    }

    #[test]
    fn test_newline_inside_filename_is_unterminated() {
        let err = scan_includes(b"#include \"a.h\nint x;\n", ScanMode::Lenient).unwrap_err();
        assert!(matches!(err, ScanError::UnterminatedQuote { line: 1, .. }));
    }

    #[test]
    fn test_missing_trailing_newline() {
        let err = scan_includes(b"#include \"a.h\"", ScanMode::Lenient).unwrap_err();
        assert_eq!(err, ScanError::MissingNewline { line: 1, offset: 0 });
    }

    #[test]
    fn test_error_reports_line_and_offset() {
        let src = b"int x;\n#include \"broken";
        let err = scan_includes(src, ScanMode::Lenient).unwrap_err();
        assert_eq!(
            err,
            ScanError::UnterminatedQuote { line: 2, offset: 7 }
        );
    }

    #[test]
    fn test_directive_on_last_line_with_newline() {
        let src = "int x;\n#include \"last.h\"\n";
        let found = scan(src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[0].stop, src.len());
    }

    #[test]
    fn test_consecutive_directives() {
        let src = "#include \"a.h\"\n#include \"b.h\"\n";
        let found = scan(src);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].stop, found[1].start);
    }
}
