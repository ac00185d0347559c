use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use bank_engine::AccountApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("Could not serialize access token. {0}")]
    CouldNotSerializeAccessToken(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("method not allowed {0}")]
    MethodNotAllowed(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    /// The one place where error kinds are mapped to HTTP statuses.
    ///
    /// The mapping is deliberately coarse: every failure inside the auth pipeline is a 403 (including
    /// unparsable ids and store misses, which the original service conflated with forbidden access), and
    /// every other handler failure is a 400, including unsupported verbs on defined paths. Making any of
    /// these more precise is a one-arm change here and nowhere else.
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(_) => StatusCode::FORBIDDEN,
            Self::CouldNotSerializeAccessToken(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::BAD_REQUEST,
            Self::BackendError(_) => StatusCode::BAD_REQUEST,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Auth token not provided")]
    MissingToken,
    #[error("Access token is not in the correct format. {0}")]
    PoorlyFormattedToken(String),
    #[error("Access token signature is invalid. {0}")]
    ValidationError(String),
    #[error("Could not sign access token. {0}")]
    SigningError(String),
    #[error("Could not read account id from path. {0}")]
    InvalidId(String),
    #[error("Account not found.")]
    AccountNotFound,
    #[error("Invalid JWT")]
    TokenMismatch,
}

impl From<AccountApiError> for ServerError {
    fn from(e: AccountApiError) -> Self {
        match e {
            AccountApiError::AccountNotFound(_) => Self::NoRecordFound(e.to_string()),
            AccountApiError::DatabaseError(_) | AccountApiError::DuplicateNumber => Self::BackendError(e.to_string()),
            AccountApiError::NotSupported(_) => Self::Unspecified(e.to_string()),
        }
    }
}
