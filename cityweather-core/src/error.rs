use thiserror::Error;

/// Why a weather lookup failed.
///
/// The `Display` text is what a front end shows in place of the temperature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Bad Request")]
    BadRequest,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden,
    #[error("Not Found")]
    NotFound,
    #[error("Too Many Requests")]
    TooManyRequests,
    #[error("Internal Server Error")]
    ServerError,
    #[error("Bad Gateway")]
    BadGateway,
    #[error("Service Unavailable")]
    ServiceUnavailable,
    #[error("Gateway Timeout")]
    GatewayTimeout,
    #[error("Connection Error:\nCheck your internet connection")]
    ConnectionError,
    #[error("Timeout Error:\nThe request timed out")]
    Timeout,
    #[error("Too many Redirects:\nCheck the URL")]
    TooManyRedirects,
    #[error("Request Error:\n{0}")]
    OtherRequestError(String),
}

impl ErrorKind {
    /// Map a non-success HTTP status to its error kind.
    ///
    /// Statuses outside the known table become `OtherRequestError` naming the code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::TooManyRequests,
            500 => ErrorKind::ServerError,
            502 => ErrorKind::BadGateway,
            503 => ErrorKind::ServiceUnavailable,
            504 => ErrorKind::GatewayTimeout,
            other => ErrorKind::OtherRequestError(format!("HTTP status {other}")),
        }
    }

    /// Classify a transport-level failure from the HTTP client.
    ///
    /// The request URL is stripped from the detail since it carries the API key.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ErrorKind::ConnectionError
        } else if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_redirect() {
            ErrorKind::TooManyRedirects
        } else {
            ErrorKind::OtherRequestError(err.without_url().to_string())
        }
    }
}

/// A city name that cannot be queried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQuery {
    #[error("City name must not be empty")]
    EmptyCity,
}
