// Parser error path tests
// These check that every malformed text is rejected and located correctly

use thrift_text::{parse, ParseError};

#[test]
fn test_parser_error_missing_closing_brace() {
    let source = r#"{ "key": 123"#;
    let result = parse(source, "test.json");
    assert!(
        matches!(result, Err(ParseError::UnexpectedEof { .. })),
        "Should fail with missing }}"
    );
}

#[test]
fn test_parser_error_missing_closing_bracket() {
    let source = r#"{ "arr": [1, 2, 3 }"#;
    let result = parse(source, "test.json");
    assert!(result.is_err(), "Should fail with missing ]");
}

#[test]
fn test_parser_error_unquoted_key() {
    let source = "{ key: 123 }";
    let result = parse(source, "test.json");
    assert!(
        matches!(result, Err(ParseError::Syntax { .. })),
        "Should fail with key must be a string"
    );
}

#[test]
fn test_parser_error_empty_input() {
    let result = parse("", "test.json");
    assert!(
        matches!(result, Err(ParseError::UnexpectedEof { .. })),
        "Should fail with unexpected EOF"
    );
}

#[test]
fn test_parser_error_bare_word() {
    let result = parse("nope", "test.json");
    assert!(result.is_err(), "Should fail with expected ident");
}

#[test]
fn test_parser_error_invalid_escape() {
    let result = parse(r#"["\q"]"#, "test.json");
    assert!(result.is_err(), "Should fail with invalid escape");
}

#[test]
fn test_parser_error_span_on_later_line() {
    let source = "{\n  \"a\": 1,\n  \"b\": tru\n}";
    match parse(source, "test.json") {
        Err(ParseError::Syntax { span, .. }) => {
            let line_three = source.find("  \"b\"").unwrap();
            assert!(span.offset() > line_three, "span should point into line 3");
        }
        other => panic!("Expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_parser_error_display() {
    let err = parse("[1 2]", "test.json").unwrap_err();
    let error_string = format!("{}", err);
    assert!(error_string.starts_with("Malformed document"));
    assert!(!error_string.contains("at line"));
}

#[test]
fn test_scalar_documents_are_accepted() {
    assert!(parse("42", "test.json").is_ok());
    assert!(parse("\"text\"", "test.json").is_ok());
    assert!(parse("null", "test.json").is_ok());
}
