#![allow(unused)]
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;

use crate::ENV;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Too Many Requests: {0}")]
    TooManyRequests(Cow<'static, str>),
    #[error("Service Unavailable")]
    ServiceUnavailable,
    #[error("Internal Server Error")]
    InternalServer,
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn unauthorized(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden(msg.into())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            Error::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Error::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());

        res.insert_header(("Access-Control-Allow-Origin", ENV.frontend_url.as_str()));
        res.insert_header(("Access-Control-Allow-Credentials", "true"));

        match self {
            Error::BadRequest(msg)
            | Error::Unauthorized(msg)
            | Error::Forbidden(msg)
            | Error::NotFound(msg)
            | Error::Conflict(msg)
            | Error::TooManyRequests(msg) => res.json(ErrorBody { message: msg.clone() }),
            Error::ServiceUnavailable => {
                res.json(ErrorBody { message: "Service temporarily unavailable".into() })
            }
            Error::InternalServer => {
                res.json(ErrorBody { message: "Internal Server Error".into() })
            }
        }
    }
}

/// Internal taxonomy. Repositories and services speak `SystemError`; handlers
/// convert to `Error` at the HTTP boundary. Business failures are returned to
/// the caller as-is, only the internal arms log.
#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    #[error("JWT Error")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Database Error: {0}")]
    Database(Cow<'static, str>),
    // Transient storage failure, the only class eligible for caller retry.
    #[error("Storage Unavailable: {0}")]
    Unavailable(Cow<'static, str>),
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Unauthorized: {0}")]
    Unauthorized(Cow<'static, str>),
    #[error("Forbidden: {0}")]
    Forbidden(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),
    #[error("Rejection cooldown active for another {remaining}")]
    Cooldown { remaining: chrono::Duration },
    #[error("Not Blocked: {0}")]
    NotBlocked(Cow<'static, str>),
    #[error("Internal System Error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::BadRequest(msg) => Error::BadRequest(msg),
            SystemError::Unauthorized(msg) => Error::Unauthorized(msg),
            SystemError::Forbidden(msg) => Error::Forbidden(msg),
            SystemError::NotFound(msg) => Error::NotFound(msg),
            SystemError::Conflict(msg) => Error::Conflict(msg),
            SystemError::NotBlocked(msg) => Error::BadRequest(msg),
            SystemError::Cooldown { remaining } => {
                let hours = remaining.num_hours().max(0);
                let minutes = (remaining.num_minutes() - hours * 60).max(0);
                Error::TooManyRequests(
                    format!("Cannot send another request for {hours} hours and {minutes} minutes.")
                        .into(),
                )
            }
            SystemError::Unavailable(msg) => {
                log::warn!("Storage unavailable: {}", msg);
                Error::ServiceUnavailable
            }
            other => {
                log::error!("Internal Server Error: {:?}", other);
                Error::InternalServer
            }
        }
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                // Unique violation: the insert race lost to a concurrent writer.
                Some("23505") => SystemError::Conflict("Record already exists".into()),
                _ => {
                    log::error!("Unhandled DB error: {:?}", db_err);
                    SystemError::Database(db_err.message().to_string().into())
                }
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                SystemError::Unavailable("Connection pool exhausted".into())
            }
            sqlx::Error::Io(io_err) => SystemError::Unavailable(io_err.to_string().into()),
            other => SystemError::Internal(Box::new(other)),
        }
    }
}

impl SystemError {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn forbidden(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_blocked(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotBlocked(msg.into())
    }

    pub fn cooldown(remaining: chrono::Duration) -> Self {
        Self::Cooldown { remaining }
    }
}
