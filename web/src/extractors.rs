//! Custom Axum extractors.
//!
//! - [`CorrelationId`]: extract or generate a request correlation ID.
//! - [`SessionToken`]: the session cookie, parsed but not yet validated.
//! - [`AppJson`]: typed JSON bodies rejected in the standard error shape.

use crate::error::AppError;
use axum::{
    async_trait,
    extract::rejection::JsonRejection,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use hostly_core::SessionId;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "hostly_session";

/// Correlation ID for request tracing.
///
/// Extracted from the `X-Correlation-ID` header, or a fresh UUID v4 when the
/// client did not send one.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let correlation_id = parts
            .headers
            .get("X-Correlation-ID")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// The session cookie, if the request carried a well-formed one.
///
/// Extraction never fails: handlers decide whether a missing token is a 401
/// or an anonymous response.
#[derive(Debug, Clone, Copy)]
pub struct SessionToken(pub Option<SessionId>);

#[async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_session_cookie);

        Ok(Self(token))
    }
}

/// Typed JSON body that rejects in the standard error shape.
///
/// The bare `Json` extractor answers a missing or mistyped field with a
/// plain-text 422; the API contract is a 400 with a `{ code, message }`
/// body, so every handler takes its request body through this instead.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::JsonDataError(_)) => {
                Err(AppError::bad_request("Missing required fields"))
            }
            Err(_) => Err(AppError::bad_request("Invalid request body")),
        }
    }
}

fn parse_session_cookie(header: &str) -> Option<SessionId> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            SessionId::parse(value.trim()).ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let req = Request::builder()
            .header("X-Correlation-ID", uuid.to_string())
            .body(())
            .unwrap();

        let (mut parts, ()) = req.into_parts();
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(correlation_id.0, uuid);
    }

    #[tokio::test]
    async fn session_token_parsed_from_cookie_header() {
        let id = SessionId::new();
        let req = Request::builder()
            .header(
                axum::http::header::COOKIE,
                format!("theme=dark; {SESSION_COOKIE}={id}; lang=en"),
            )
            .body(())
            .unwrap();

        let (mut parts, ()) = req.into_parts();
        let token = SessionToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(token.0, Some(id));
    }

    #[tokio::test]
    async fn malformed_session_cookie_is_none() {
        let req = Request::builder()
            .header(
                axum::http::header::COOKIE,
                format!("{SESSION_COOKIE}=not-a-uuid"),
            )
            .body(())
            .unwrap();

        let (mut parts, ()) = req.into_parts();
        let token = SessionToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(token.0, None);
    }

    #[tokio::test]
    async fn missing_cookie_is_none() {
        let req = Request::builder().body(()).unwrap();
        let (mut parts, ()) = req.into_parts();
        let token = SessionToken::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(token.0, None);
    }
}
