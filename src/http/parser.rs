use tracing::error;

use crate::http::headers::HeaderMap;
use crate::http::response::{Response, StatusCode};

/// Why a raw buffer failed to parse as an HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    MissingStartLine,
    InvalidStartLine,
    InvalidStatus,
    MissingHeadersEnd,
    InvalidEncoding,
    InvalidContentLength,
    IncompleteBody,
}

/// Locates the CRLFCRLF header terminator within `buf`.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Parses one complete raw message buffer into a structured [`Response`].
///
/// The buffer must contain the whole message: start line, header block and
/// (if a Content-Length header declares one) the full body. Nothing partial
/// is ever returned; every structural violation fails the parse with a
/// distinct [`ParseError`].
pub fn parse_http_response(raw: &[u8]) -> Result<Response, ParseError> {
    let start_line_end = find_crlf(raw).ok_or_else(|| {
        error!("Malformed response: missing start line terminator");
        ParseError::MissingStartLine
    })?;

    let start_line = std::str::from_utf8(&raw[..start_line_end]).map_err(|_| {
        error!("Malformed response: start line is not valid UTF-8");
        ParseError::InvalidEncoding
    })?;
    let (version, status) = parse_start_line(start_line)?;

    // The terminator overlaps the start line's CRLF when the header block
    // is empty, so the search starts at that CRLF rather than past it.
    let headers_end = find_headers_end(&raw[start_line_end..])
        .map(|pos| start_line_end + pos)
        .ok_or_else(|| {
            error!("Malformed response: missing header terminator");
            ParseError::MissingHeadersEnd
        })?;

    let header_block = if headers_end > start_line_end {
        std::str::from_utf8(&raw[start_line_end + 2..headers_end]).map_err(|_| {
            error!("Malformed response: header block is not valid UTF-8");
            ParseError::InvalidEncoding
        })?
    } else {
        ""
    };
    let headers = parse_headers(header_block);

    let keep_alive = match headers.get("Connection") {
        Some(value) => value.trim().to_ascii_lowercase() == "keep-alive",
        None => true,
    };

    let body = parse_body(raw, headers_end + 4, &headers)?;

    Ok(Response {
        version,
        status,
        headers,
        body,
        keep_alive,
    })
}

/// Splits the start line into `<version> <status-code> <reason...>`. The
/// reason phrase is structural only; its text is discarded.
fn parse_start_line(line: &str) -> Result<(String, StatusCode), ParseError> {
    let Some(version_end) = line.find(' ') else {
        error!("Malformed start line: missing space after version");
        return Err(ParseError::InvalidStartLine);
    };

    let rest = &line[version_end + 1..];
    let Some(status_end) = rest.find(' ') else {
        error!("Malformed start line: missing space after status code");
        return Err(ParseError::InvalidStartLine);
    };

    let token = &rest[..status_end];
    let status = StatusCode::from_token(token);
    if status == StatusCode::Invalid {
        error!("Invalid status code: {token:?}");
        return Err(ParseError::InvalidStatus);
    }

    Ok((line[..version_end].to_string(), status))
}

/// Parses the header block. Lines without a colon are skipped; a later
/// occurrence of a key overwrites an earlier one. The value keeps
/// everything after the colon with the leading run of spaces stripped
/// (spaces only, tabs survive).
fn parse_headers(block: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for line in block.split("\r\n") {
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        headers.insert(key, value.trim_start_matches(' '));
    }

    headers
}

fn parse_body(raw: &[u8], body_start: usize, headers: &HeaderMap) -> Result<Vec<u8>, ParseError> {
    if body_start >= raw.len() {
        return Ok(Vec::new());
    }

    // Without a declared length this protocol subset carries no body, even
    // when trailing bytes exist.
    let Some(declared) = headers.get("Content-Length") else {
        return Ok(Vec::new());
    };

    let content_length: usize = declared.trim().parse().map_err(|_| {
        error!("Invalid Content-Length header: {declared:?}");
        ParseError::InvalidContentLength
    })?;

    let available = raw.len() - body_start;
    if available < content_length {
        error!("Incomplete response body: expected {content_length} bytes, got {available}");
        return Err(ParseError::IncompleteBody);
    }

    Ok(raw[body_start..body_start + content_length].to_vec())
}
