use std::fmt::Write;

use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::HttpMethod;

/// A request as handed to a [`Transport`](crate::Transport).
///
/// `path` is relative to the API root and starts with `/`, e.g. `/coupons/abc`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The resolved path.
    pub path: String,
    /// The JSON body, if any.
    pub body: Option<Value>,
}

/// A successful response as returned by a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The decoded JSON body. `Value::Null` for empty bodies.
    pub data: Value,
}

/// Trait for converting a `reqwest::Request` to a HTTP string.
///
/// The `Authorization` header is never written out.
pub trait RequestToHttpString {
    /// Converts the `reqwest::Request` to a HTTP string.
    fn to_http_string(&self) -> Result<String, std::fmt::Error>;
}

impl RequestToHttpString for reqwest::Request {
    fn to_http_string(&self) -> Result<String, std::fmt::Error> {
        let mut result = String::new();

        write!(result, "{} {}", self.method(), self.url().path())?;
        if let Some(query) = self.url().query() {
            write!(result, "?{}", query)?;
        }
        writeln!(result, " HTTP/1.1")?;

        if let Some(host) = self.url().host_str() {
            if let Some(port) = self.url().port() {
                writeln!(result, "host: {}:{}", host, port)?;
            } else {
                writeln!(result, "host: {}", host)?;
            }
        }

        for (name, value) in self.headers() {
            if *name == AUTHORIZATION {
                writeln!(result, "{}: [redacted]", name)?;
            } else {
                writeln!(result, "{}: {}", name, value.to_str().unwrap_or("[binary]"))?;
            }
        }

        writeln!(result)?;

        if let Some(body) = self.body() {
            if let Some(bytes) = body.as_bytes() {
                result.push_str(&String::from_utf8_lossy(bytes));
            } else {
                result.push_str("[streaming body - cannot display]");
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn http_string_redacts_authorization() {
        let mut request = reqwest::Request::new(
            reqwest::Method::PUT,
            "https://selly.gg/api/v2/coupons/abc".parse().unwrap(),
        );
        request
            .headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_static("Basic c2VjcmV0"));
        *request.body_mut() = Some(r#"{"coupon":{"discount":10}}"#.into());

        let text = request.to_http_string().unwrap();
        assert!(text.starts_with("PUT /api/v2/coupons/abc HTTP/1.1\n"));
        assert!(text.contains("host: selly.gg\n"));
        assert!(text.contains("authorization: [redacted]\n"));
        assert!(!text.contains("c2VjcmV0"));
        assert!(text.ends_with(r#"{"coupon":{"discount":10}}"#));
    }
}
