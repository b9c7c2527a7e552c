use courier::http::parser::parse_http_response;
use courier::http::request::{Method, RequestBuilder};

#[test]
fn test_method_string_round_trip() {
    let methods = vec![
        ("GET", Method::GET),
        ("POST", Method::POST),
        ("PUT", Method::PUT),
        ("DELETE", Method::DELETE),
        ("HEAD", Method::HEAD),
        ("OPTIONS", Method::OPTIONS),
        ("TRACE", Method::TRACE),
        ("CONNECT", Method::CONNECT),
    ];

    for (text, method) in methods {
        assert_eq!(Method::from_str(text), Some(method));
        assert_eq!(method.as_str(), text);
    }

    assert_eq!(Method::from_str("get"), None);
    assert_eq!(Method::from_str("FETCH"), None);
}

#[test]
fn test_builder_produces_request_line() {
    let request = RequestBuilder::new()
        .method(Method::GET)
        .uri("/index.html")
        .build()
        .unwrap();

    assert_eq!(request.request_line(), "GET /index.html HTTP/1.1");
    assert_eq!(request.version, "HTTP/1.1");
    assert!(request.body.is_empty());
}

#[test]
fn test_builder_requires_method_and_uri() {
    assert!(RequestBuilder::new().uri("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}

#[test]
fn test_builder_auto_content_length() {
    let request = RequestBuilder::new()
        .method(Method::POST)
        .uri("/api")
        .body(b"payload".to_vec())
        .build()
        .unwrap();

    assert_eq!(request.header("Content-Length"), Some("7"));
}

#[test]
fn test_builder_preserves_custom_content_length() {
    let request = RequestBuilder::new()
        .method(Method::POST)
        .uri("/api")
        .header("Content-Length", "999")
        .body(b"payload".to_vec())
        .build()
        .unwrap();

    assert_eq!(request.header("Content-Length"), Some("999"));
}

#[test]
fn test_builder_skips_content_length_for_empty_body() {
    let request = RequestBuilder::new()
        .method(Method::GET)
        .uri("/")
        .build()
        .unwrap();

    assert_eq!(request.header("Content-Length"), None);
}

#[test]
fn test_serialize_wire_layout() {
    let request = RequestBuilder::new()
        .method(Method::POST)
        .uri("/api/data")
        .header("Host", "127.0.0.1:8080")
        .header("Content-Type", "application/json")
        .body(b"{}".to_vec())
        .build()
        .unwrap();

    let wire = request.serialize();
    let text = String::from_utf8(wire).unwrap();

    assert!(text.starts_with("POST /api/data HTTP/1.1\r\n"));
    // Header keys are normalized to lower case before storage
    assert!(text.contains("host: 127.0.0.1:8080\r\n"));
    assert!(text.contains("content-type: application/json\r\n"));
    assert!(text.contains("content-length: 2\r\n"));
    assert!(text.ends_with("\r\n\r\n{}"));
}

#[test]
fn test_serialize_without_body_ends_with_blank_line() {
    let request = RequestBuilder::new()
        .method(Method::GET)
        .uri("/")
        .header("Host", "127.0.0.1")
        .build()
        .unwrap();

    let wire = request.serialize();

    assert!(wire.ends_with(b"\r\n\r\n"));
}

#[test]
fn test_serialized_headers_survive_a_parse_round_trip() {
    // Serialize a request, swap its request line for a status line, and
    // feed it through the response parser: every header key must survive
    // (case-insensitively) with its most-recently-set value.
    let request = RequestBuilder::new()
        .method(Method::POST)
        .uri("/submit")
        .header("X-Token", "first")
        .header("x-token", "second")
        .header("Accept", "*/*")
        .body(b"ping".to_vec())
        .build()
        .unwrap();

    let wire = String::from_utf8(request.serialize()).unwrap();
    let (_, rest) = wire.split_once("\r\n").unwrap();
    let simulated = format!("HTTP/1.1 200 OK\r\n{rest}");

    let response = parse_http_response(simulated.as_bytes()).unwrap();

    assert_eq!(response.header("X-TOKEN"), Some("second"));
    assert_eq!(response.header("accept"), Some("*/*"));
    assert_eq!(response.header("Content-Length"), Some("4"));
    assert_eq!(response.body, b"ping".to_vec());
}
