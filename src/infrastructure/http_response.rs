// HTTP response utilities for JSON with optional Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{HeaderValue, Response, StatusCode, header},
};
use serde::Serialize;
use tokio::io::AsyncReadExt;

/// Compress a payload with Brotli
pub async fn brotli_compress(payload: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let cursor = std::io::Cursor::new(payload);
    let mut encoder = BrotliEncoder::new(cursor);
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Serialize a value to JSON with optional Brotli compression
pub async fn json_response<T: Serialize>(
    data: &T,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let json_bytes = serde_json::to_vec(data).map_err(|e| {
        tracing::error!(error = %e, "JSON serialization error");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let (body_bytes, content_encoding) = if compress {
        let original = json_bytes.len();
        let compressed = brotli_compress(json_bytes).await.map_err(|e| {
            tracing::error!(error = %e, "Brotli compression error");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::trace!(original, compressed = compressed.len(), "compressed JSON body");
        (compressed, Some("br"))
    } else {
        (json_bytes, None)
    };

    let content_length = HeaderValue::from_str(&body_bytes.len().to_string())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, content_length);

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!(error = %e, "Response build error");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::bufread::BrotliDecoder;
    use serde_json::json;

    #[tokio::test]
    async fn test_plain_json_response() {
        let response = json_response(&json!({"ok": true}), false).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_brotli_round_trip() {
        let value = json!({"temperature": 78.4, "phase": "Reaction"});
        let response = json_response(&value, true).await.unwrap();
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let mut decoder = BrotliDecoder::new(std::io::Cursor::new(body.to_vec()));
        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded).await.unwrap();
        assert_eq!(serde_json::from_slice::<serde_json::Value>(&decoded).unwrap(), value);
    }
}
