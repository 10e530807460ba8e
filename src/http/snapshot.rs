//! Canonical request snapshots.
//!
//! A `RequestSnapshot` is the serializable capture of one inbound request
//! that a handler script receives as its single argument. The JSON field
//! names are a wire contract: deployed handler scripts parse `Method`,
//! `URL`, `Header` and friends, so they are pinned here and must not drift.

use std::collections::BTreeMap;

use axum::body::Body;
use axum::http::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, HOST};
use axum::http::{Method, Request};
use serde::{Deserialize, Serialize};

type Values = BTreeMap<String, Vec<String>>;

/// Immutable, serializable capture of one inbound HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestSnapshot {
    pub method: String,
    #[serde(rename = "URL")]
    pub url: String,
    pub proto: String,
    pub host: String,
    pub header: Values,
    pub content_length: i64,
    pub body: String,
    pub form: Values,
    pub post_form: Values,
}

impl RequestSnapshot {
    /// Build a snapshot from a live request, draining the body exactly once.
    ///
    /// A body that cannot be read counts as empty; nothing about snapshot
    /// construction is allowed to fail a request.
    pub async fn from_request(req: Request<Body>) -> Self {
        let (parts, body) = req.into_parts();

        let raw_body = axum::body::to_bytes(body, usize::MAX)
            .await
            .unwrap_or_default();
        let body = String::from_utf8_lossy(&raw_body).into_owned();

        let mut header = Values::new();
        for (name, value) in parts.headers.iter() {
            header
                .entry(canonical_header_name(name.as_str()))
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        let host = parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let content_length = parts
            .headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(if body.is_empty() { 0 } else { -1 });

        let query_values = parse_form(parts.uri.query().unwrap_or_default());

        let post_form = if has_form_body(&parts.method, parts.headers.get(CONTENT_TYPE)) {
            parse_form(&body)
        } else {
            Values::new()
        };

        // Body fields first, then query-string fields appended per key.
        let mut form = post_form.clone();
        for (key, values) in query_values {
            form.entry(key).or_default().extend(values);
        }

        Self {
            method: parts.method.to_string(),
            url: parts.uri.to_string(),
            proto: format!("{:?}", parts.version),
            host,
            header,
            content_length,
            body,
            form,
            post_form,
        }
    }

    /// Serialize for the subprocess argument.
    ///
    /// Total for every well-formed snapshot; the caller treats a failure
    /// here as a programming defect, not a runtime condition.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn has_form_body(method: &Method, content_type: Option<&HeaderValue>) -> bool {
    let form_method = matches!(*method, Method::POST | Method::PUT | Method::PATCH);
    let form_type = content_type
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false);
    form_method && form_type
}

/// Decode `a=1&b=2` pairs, preserving the order of repeated values per key.
fn parse_form(input: &str) -> Values {
    let mut values = Values::new();
    for (key, value) in url::form_urlencoded::parse(input.as_bytes()) {
        values
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    values
}

/// Fold a lowercased header name into the `Content-Type` form scripts
/// expect: uppercase the first letter and any letter after a dash.
fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper = c == '-';
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_header_names() {
        assert_eq!(canonical_header_name("host"), "Host");
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("x-request-id"), "X-Request-Id");
    }

    #[tokio::test]
    async fn test_snapshot_captures_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/run?a=1&a=2")
            .header("Host", "example.com")
            .header("X-Token", "first")
            .header("X-Token", "second")
            .header("Content-Length", "5")
            .body(Body::from("hello"))
            .unwrap();

        let snapshot = RequestSnapshot::from_request(req).await;

        assert_eq!(snapshot.method, "POST");
        assert_eq!(snapshot.url, "/run?a=1&a=2");
        assert_eq!(snapshot.proto, "HTTP/1.1");
        assert_eq!(snapshot.host, "example.com");
        assert_eq!(snapshot.content_length, 5);
        assert_eq!(snapshot.body, "hello");
        assert_eq!(snapshot.header["X-Token"], vec!["first", "second"]);
        assert_eq!(snapshot.form["a"], vec!["1", "2"]);
        assert!(snapshot.post_form.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_length_body() {
        let req = Request::builder()
            .method("PUT")
            .uri("/upload")
            .body(Body::from("chunked data"))
            .unwrap();

        let snapshot = RequestSnapshot::from_request(req).await;
        assert_eq!(snapshot.content_length, -1);

        let empty = Request::builder().uri("/").body(Body::empty()).unwrap();
        let snapshot = RequestSnapshot::from_request(empty).await;
        assert_eq!(snapshot.content_length, 0);
    }

    #[tokio::test]
    async fn test_form_body_values_precede_query_values() {
        let req = Request::builder()
            .method("POST")
            .uri("/submit?field=query&extra=q")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from("field=body&other=1"))
            .unwrap();

        let snapshot = RequestSnapshot::from_request(req).await;

        assert_eq!(snapshot.post_form["field"], vec!["body"]);
        assert_eq!(snapshot.form["field"], vec!["body", "query"]);
        assert_eq!(snapshot.form["other"], vec!["1"]);
        assert_eq!(snapshot.form["extra"], vec!["q"]);
    }

    #[tokio::test]
    async fn test_get_body_is_not_form_parsed() {
        let req = Request::builder()
            .method("GET")
            .uri("/submit")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from("field=body"))
            .unwrap();

        let snapshot = RequestSnapshot::from_request(req).await;
        assert!(snapshot.post_form.is_empty());
        assert_eq!(snapshot.body, "field=body");
    }

    #[tokio::test]
    async fn test_serialization_round_trip() {
        let req = Request::builder()
            .method("POST")
            .uri("/run?q=1")
            .header("Host", "example.com")
            .header("Accept", "text/plain")
            .header("Accept", "application/json")
            .body(Body::from("payload"))
            .unwrap();

        let snapshot = RequestSnapshot::from_request(req).await;
        let json = snapshot.to_json().unwrap();
        let decoded: RequestSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[tokio::test]
    async fn test_wire_field_names_are_stable() {
        let req = Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let snapshot = RequestSnapshot::from_request(req).await;
        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();

        for field in [
            "Method",
            "URL",
            "Proto",
            "Host",
            "Header",
            "ContentLength",
            "Body",
            "Form",
            "PostForm",
        ] {
            assert!(value.get(field).is_some(), "missing wire field {field}");
        }
    }
}
