//! Tests for the HTTP request parser.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use serde::Deserialize;

    use crate::parser::{HttpRequest, Method, HttpVersion, Error, parse_request};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /api/player HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.path, "/api/player");
        assert_eq!(result.version, HttpVersion::Http11);
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert!(result.body.is_empty());
        assert!(result.params.is_empty());
    }

    #[test]
    fn test_case_insensitive_headers() {
        let request = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert!(result.has_header("host"));
        assert!(result.has_header("HOST"));
        assert!(result.has_header("Host"));
    }

    #[test]
    fn test_missing_host_header() {
        let request = b"GET /index.html HTTP/1.1\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MissingHeader(ref h)) if h == "Host"));
    }

    #[test]
    fn test_http10_without_host() {
        let request = b"GET /index.html HTTP/1.0\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.version, HttpVersion::Http10);
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_version_tokens() {
        let request = b"GET /api/player HTTP/2.0\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.version, HttpVersion::Http20);
        assert_eq!(result.version.to_string(), "HTTP/2");

        assert!(HttpVersion::Http11.requires_host());
        assert!(!HttpVersion::Http10.requires_host());
        assert_eq!("HTTP/1.0".parse::<HttpVersion>().unwrap().to_string(), "HTTP/1.0");
        assert!(matches!("http/1.1".parse::<HttpVersion>(), Err(Error::InvalidVersion(_))));
    }

    #[test]
    fn test_invalid_method() {
        let request = b"INVALID /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidMethod(ref m)) if m == "INVALID"));
    }

    #[test]
    fn test_invalid_http_version() {
        let request = b"GET /index.html HTTP/9.9\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidVersion(ref v)) if v == "HTTP/9.9"));
    }

    #[test]
    fn test_invalid_header_format() {
        let request = b"GET /index.html HTTP/1.1\r\nInvalidHeader\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidHeaderFormat)));
    }

    #[test]
    fn test_empty_request() {
        let result = parse_request(b"");
        assert!(matches!(result, Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_incomplete_request_line() {
        let result = parse_request(b"GET\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_malformed_utf8_in_head() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nX-Test: \xFF\xFF\xFF\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MalformedRequestLine(ref s)) if s == "Invalid UTF-8"));
    }

    #[test]
    fn test_binary_body_is_kept_verbatim() {
        let request = b"POST /upload HTTP/1.1\r\nHost: example.com\r\n\r\n\xFF\x00\xFE";
        let result = parse_request(request).unwrap();
        assert_eq!(result.body, vec![0xFF, 0x00, 0xFE]);
    }

    #[test]
    fn test_mixed_line_endings() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\nUser-Agent: test\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("User-Agent").unwrap(), "test");
    }

    #[test]
    fn test_all_methods() {
        for method in Method::ALL {
            let raw = format!("{method} /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n");
            let result = parse_request(raw.as_bytes()).unwrap();
            assert_eq!(result.method, method);
        }
    }

    #[test]
    fn test_method_slot_indices_are_dense() {
        for (i, method) in Method::ALL.iter().enumerate() {
            assert_eq!(method.index(), i);
        }
        assert_eq!(Method::ALL.len(), Method::COUNT);
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::GET.to_string(), "GET");
        assert_eq!(Method::PATCH.to_string(), "PATCH");
    }

    #[test]
    fn test_path_with_query_parameters() {
        let request = b"GET /api/playlists/0/items/0:10?columns=title,artist HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.route_path(), "/api/playlists/0/items/0:10");
        assert_eq!(result.get_query_param("columns").unwrap(), "title,artist");
    }

    #[test]
    fn test_query_parameters_without_values() {
        let request = b"GET /search?q=test&flag&empty= HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.query_params.get("q").unwrap(), "test");
        assert!(result.has_query_param("flag"));
        assert_eq!(result.query_params.get("empty").unwrap(), "");
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct VolumeUpdate {
        volume: f32,
    }

    #[test]
    fn test_json_body() {
        let request = b"POST /api/player HTTP/1.1\r\n\
            Host: example.com\r\n\
            Content-Type: application/json\r\n\
            \r\n\
            {\"volume\":0.5}";

        let result = parse_request(request).unwrap();
        let update: VolumeUpdate = result.json().unwrap();
        assert_eq!(update, VolumeUpdate { volume: 0.5 });
    }

    #[test]
    fn test_json_requires_content_type() {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "example.com".to_string());
        headers.insert("Content-Type".to_string(), "text/plain".to_string());

        let request = HttpRequest::with_body(
            Method::POST,
            "/api/player".to_string(),
            HttpVersion::Http11,
            headers.clone(),
            b"{\"volume\":0.5}".to_vec(),
        );
        let result: Result<VolumeUpdate, _> = request.json();
        assert!(matches!(result, Err(Error::MissingHeader(_))));

        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let invalid = HttpRequest::with_body(
            Method::POST,
            "/api/player".to_string(),
            HttpVersion::Http11,
            headers,
            b"{\"volume\":}".to_vec(),
        );
        let result: Result<VolumeUpdate, _> = invalid.json();
        assert!(matches!(result, Err(Error::JsonError(_))));
    }

    #[test]
    fn test_path_params_lookup() {
        let mut request = HttpRequest::new(Method::GET, "/items/42".to_string(), HttpVersion::Http11, HashMap::new());
        assert!(request.get_param("id").is_none());

        request.params.insert("id".to_string(), "42".to_string());
        assert_eq!(request.get_param("id").unwrap(), "42");
    }
}
