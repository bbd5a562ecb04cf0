use actix_web::{
    error::{JsonPayloadError, ResponseError},
    http::{header::ContentType, StatusCode},
    HttpRequest,
    HttpResponse,
};
use admarket_payment_engine::PaymentVerificationError;
use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Внутрішня помилка сервера")]
    CouldNotDeserializePayload,
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("{0}")]
    PaymentVerification(#[from] PaymentVerificationError),
    #[error("{0}")]
    CheckoutValidation(String),
    #[error("{0}")]
    CheckoutUpstream(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::PaymentVerification(e) => match e {
                PaymentVerificationError::MissingFields => StatusCode::BAD_REQUEST,
                PaymentVerificationError::InvalidHashFormat => StatusCode::BAD_REQUEST,
                PaymentVerificationError::PaymentExpired => StatusCode::BAD_REQUEST,
                PaymentVerificationError::PaymentNotFound => StatusCode::NOT_FOUND,
                PaymentVerificationError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::CheckoutValidation(_) => StatusCode::BAD_REQUEST,
            Self::CheckoutUpstream(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::CouldNotDeserializePayload => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Every error leaves the server in the storefront's envelope, so the checkout page can show
    // `message` verbatim without sniffing the status code first.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "success": false, "message": self.to_string() }).to_string())
    }
}

/// Replaces actix's default payload error with the storefront envelope. The original backend
/// answered any unreadable body with its catch-all internal error, and the checkout page relies
/// on that shape.
pub fn json_payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("💻️ Could not parse the request payload. {err}");
    ServerError::CouldNotDeserializePayload.into()
}
