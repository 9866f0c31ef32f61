use actix_web::http::header;
use actix_web::http::StatusCode;
use actix_web::{
    HttpResponse,
    ResponseError,
};
use custom_error::custom_error;

use crate::dispatcher::RunError;

custom_error! {
///! Error inside route handler
pub RouteError
    AuthError{message:String} = "Authentication failed: {message}",
    InvalidTriggerConfig{message:String} = "Trigger is misconfigured: {message}",
    DispatchFailed{source:RunError} = "{source}",
    Unexpected{source:actix_web::error::BlockingError} = "{source}",
}

impl ResponseError for RouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            RouteError::AuthError { .. } => StatusCode::UNAUTHORIZED,
            RouteError::InvalidTriggerConfig { .. }
            | RouteError::DispatchFailed { .. }
            | RouteError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            RouteError::AuthError { .. } => HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, r#"Basic realm="dispatch""#))
                .finish(),
            RouteError::InvalidTriggerConfig { .. }
            | RouteError::DispatchFailed { .. }
            | RouteError::Unexpected { .. } => HttpResponse::InternalServerError().finish(),
        }
    }
}
