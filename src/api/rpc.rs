//! tRPC-style request and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use enrollment_core::Error;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Query string of a `GET` procedure call.
#[derive(Debug, Default, Deserialize)]
pub struct QueryInput {
    pub input: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The input is not valid JSON.
    #[error("{0}")]
    Parse(String),

    /// The input is JSON but does not have the procedure's shape.
    #[error("{0}")]
    Shape(String),

    #[error(transparent)]
    Procedure(#[from] Error),
}

impl From<serde_json::Error> for RpcError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Syntax | Category::Eof | Category::Io => RpcError::Parse(err.to_string()),
            Category::Data => RpcError::Shape(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    BadRequest,
    NotFound,
    Conflict,
    InternalServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParseError => "PARSE_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// JSON-RPC 2.0 code used by tRPC for this error.
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::BadRequest => -32600,
            Self::NotFound => -32004,
            Self::Conflict => -32009,
            Self::InternalServerError => -32603,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ParseError | Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl RpcError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(_) => ErrorCode::ParseError,
            Self::Shape(_) => ErrorCode::BadRequest,
            Self::Procedure(err) => match err {
                Error::MissingInput(_) | Error::InvalidInput(_) => ErrorCode::BadRequest,
                Error::NotFound(_) => ErrorCode::NotFound,
                Error::ConstraintViolation(_) => ErrorCode::Conflict,
                Error::Store(_) | Error::Io(_) => ErrorCode::InternalServerError,
            },
        }
    }
}

/// A failed call, tagged with the procedure path it came from.
#[derive(Debug)]
pub struct RpcFailure {
    pub path: &'static str,
    pub error: RpcError,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: String,
    code: i32,
    data: ErrorData<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorData<'a> {
    code: &'static str,
    http_status: u16,
    path: &'a str,
}

impl IntoResponse for RpcFailure {
    fn into_response(self) -> Response {
        let code = self.error.code();
        let status = code.status();

        if status.is_server_error() {
            tracing::error!(path = self.path, error = %self.error, "procedure failed");
        } else {
            tracing::debug!(path = self.path, error = %self.error, "procedure rejected");
        }

        let body = ErrorEnvelope {
            error: ErrorBody {
                message: self.error.to_string(),
                code: code.json_rpc_code(),
                data: ErrorData {
                    code: code.as_str(),
                    http_status: status.as_u16(),
                    path: self.path,
                },
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Successful call payload, wrapped as `{"result": {"data": ...}}`.
#[derive(Debug)]
pub struct RpcSuccess<T>(pub T);

#[derive(Serialize)]
struct ResultEnvelope<T> {
    result: ResultData<T>,
}

#[derive(Serialize)]
struct ResultData<T> {
    data: T,
}

impl<T: Serialize> IntoResponse for RpcSuccess<T> {
    fn into_response(self) -> Response {
        Json(ResultEnvelope {
            result: ResultData { data: self.0 },
        })
        .into_response()
    }
}

pub type RpcResult<T> = Result<RpcSuccess<T>, RpcFailure>;

/// Decodes a procedure input. A missing or empty input is read as `{}` so
/// procedures whose fields are all optional can be called bare.
pub fn parse_input<T: DeserializeOwned>(raw: Option<&[u8]>) -> Result<T, RpcError> {
    match raw {
        Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => {
            Ok(serde_json::from_slice(bytes)?)
        }
        _ => Ok(serde_json::from_str("{}")?),
    }
}

/// Wraps the outcome of a procedure for the given path.
pub fn finish<T>(path: &'static str, result: enrollment_core::Result<T>) -> RpcResult<T> {
    result
        .map(RpcSuccess)
        .map_err(|err| RpcFailure {
            path,
            error: err.into(),
        })
}

/// Decodes the input and runs the procedure on it.
pub fn call<I, T, F>(path: &'static str, raw: Option<&[u8]>, procedure: F) -> RpcResult<T>
where
    I: DeserializeOwned,
    F: FnOnce(I) -> enrollment_core::Result<T>,
{
    let input = parse_input(raw).map_err(|error| RpcFailure { path, error })?;
    finish(path, procedure(input))
}
