use courier::http::parser::{ParseError, parse_http_response};
use courier::http::response::StatusCode;

#[test]
fn test_parse_response_with_body_and_keep_alive() {
    let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: keep-alive\r\n\r\nhello";

    let response = parse_http_response(raw).unwrap();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.version, "HTTP/1.1");
    assert_eq!(response.body, b"hello".to_vec());
    assert!(response.keep_alive);
}

#[test]
fn test_parse_headerless_response_keeps_default_keep_alive() {
    let raw = b"HTTP/1.1 404 Not Found\r\n\r\n";

    let response = parse_http_response(raw).unwrap();

    assert_eq!(response.status, StatusCode::NotFound);
    assert!(response.body.is_empty());
    // No Connection header: the construction default stands
    assert!(response.keep_alive);
}

#[test]
fn test_parse_connection_close_clears_keep_alive() {
    let raw = b"HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n";

    let response = parse_http_response(raw).unwrap();

    assert!(!response.keep_alive);
}

#[test]
fn test_parse_keep_alive_value_is_case_insensitive() {
    let raw = b"HTTP/1.1 200 OK\r\nConnection:  Keep-Alive \r\n\r\n";

    let response = parse_http_response(raw).unwrap();

    assert!(response.keep_alive);
}

#[test]
fn test_parse_fails_without_start_line_terminator() {
    let result = parse_http_response(b"HTTP/1.1 200 OK");

    assert!(matches!(result, Err(ParseError::MissingStartLine)));
}

#[test]
fn test_parse_fails_without_header_terminator() {
    let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n";

    let result = parse_http_response(raw);

    assert!(matches!(result, Err(ParseError::MissingHeadersEnd)));
}

#[test]
fn test_parse_fails_on_truncated_start_line() {
    // No space after the status code token
    let result = parse_http_response(b"HTTP/1.1 200\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidStartLine)));
}

#[test]
fn test_parse_fails_on_unknown_status_code() {
    let result = parse_http_response(b"HTTP/1.1 299 Mystery\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidStatus)));
}

#[test]
fn test_parse_fails_on_non_numeric_status_code() {
    let result = parse_http_response(b"HTTP/1.1 abc OK\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidStatus)));
}

#[test]
fn test_parse_fails_when_body_shorter_than_declared() {
    let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nhello";

    let result = parse_http_response(raw);

    assert!(matches!(result, Err(ParseError::IncompleteBody)));
}

#[test]
fn test_parse_captures_exactly_declared_body_bytes() {
    let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello-and-then-some";

    let response = parse_http_response(raw).unwrap();

    assert_eq!(response.body, b"hello".to_vec());
}

#[test]
fn test_parse_without_content_length_ignores_trailing_bytes() {
    let raw = b"HTTP/1.1 200 OK\r\nServer: test\r\n\r\ntrailing junk";

    let response = parse_http_response(raw).unwrap();

    assert!(response.body.is_empty());
}

#[test]
fn test_parse_fails_on_malformed_content_length() {
    let raw = b"HTTP/1.1 200 OK\r\nContent-Length: five\r\n\r\nxx";

    let result = parse_http_response(raw);

    assert!(matches!(result, Err(ParseError::InvalidContentLength)));
}

#[test]
fn test_parse_declared_length_without_body_bytes_is_empty_body() {
    // The length check only applies once the buffer extends past the
    // separator
    let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\n";

    let response = parse_http_response(raw).unwrap();

    assert!(response.body.is_empty());
}

#[test]
fn test_parse_skips_header_lines_without_colon() {
    let raw = b"HTTP/1.1 200 OK\r\nBrokenHeader\r\nServer: test\r\n\r\n";

    let response = parse_http_response(raw).unwrap();

    assert_eq!(response.headers.len(), 1);
    assert_eq!(response.header("Server"), Some("test"));
}

#[test]
fn test_parse_later_header_occurrence_wins() {
    let raw = b"HTTP/1.1 200 OK\r\nX-Trace: first\r\nx-trace: second\r\n\r\n";

    let response = parse_http_response(raw).unwrap();

    assert_eq!(response.header("X-Trace"), Some("second"));
}

#[test]
fn test_parse_strips_leading_spaces_but_not_tabs_from_values() {
    let raw = b"HTTP/1.1 200 OK\r\nX-Spaced:   padded\r\nX-Tabbed:\ttabbed\r\n\r\n";

    let response = parse_http_response(raw).unwrap();

    assert_eq!(response.header("X-Spaced"), Some("padded"));
    assert_eq!(response.header("X-Tabbed"), Some("\ttabbed"));
}

#[test]
fn test_parse_preserves_binary_body() {
    let raw = b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";

    let response = parse_http_response(raw).unwrap();

    assert_eq!(response.body, vec![0, 1, 2, 3]);
}

#[test]
fn test_parse_header_lookup_is_case_insensitive() {
    let raw = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n";

    let response = parse_http_response(raw).unwrap();

    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
}
