pub mod diary;
pub mod equipment;
pub mod health;
pub mod incident;
pub mod resource;
pub mod visitor;

pub mod error {
    use site_diary_common::request_io::outputs::{ErrorType, ServerErrorResponse};

    use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
    use actix_web::http::StatusCode;
    use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
    use std::borrow::Cow;
    use std::fmt;

    #[derive(Debug)]
    pub enum DoesNotExistType {
        Diary,
        Visitor,
        Incident,
        Utilization,
        Resource,
    }

    #[derive(Debug)]
    pub enum HttpErrorResponse {
        // 400
        IncorrectlyFormed(Cow<'static, str>),
        InvalidState(Cow<'static, str>),

        // 404
        DoesNotExist(Cow<'static, str>, DoesNotExistType),
        ForeignKeyDoesNotExist(Cow<'static, str>),

        // 409
        ConflictWithExisting(Cow<'static, str>),

        // 413
        InputTooLarge(Cow<'static, str>),

        // 500
        InternalError(Cow<'static, str>),
    }

    impl std::error::Error for HttpErrorResponse {}

    impl fmt::Display for HttpErrorResponse {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let server_error: ServerErrorResponse = self.into();
            write!(f, "{:?}", server_error)
        }
    }

    impl From<HttpErrorResponse> for ServerErrorResponse {
        fn from(resp: HttpErrorResponse) -> Self {
            (&resp).into()
        }
    }

    // Messages are passed through as-is; clients show them to the user directly.
    impl From<&HttpErrorResponse> for ServerErrorResponse {
        fn from(resp: &HttpErrorResponse) -> Self {
            let (err_type, msg) = match resp {
                HttpErrorResponse::IncorrectlyFormed(msg) => (ErrorType::IncorrectlyFormed, msg),
                HttpErrorResponse::InvalidState(msg) => (ErrorType::InvalidState, msg),
                HttpErrorResponse::DoesNotExist(msg, dne_type) => (
                    match dne_type {
                        DoesNotExistType::Diary => ErrorType::DiaryDoesNotExist,
                        DoesNotExistType::Visitor => ErrorType::VisitorDoesNotExist,
                        DoesNotExistType::Incident => ErrorType::IncidentDoesNotExist,
                        DoesNotExistType::Utilization => ErrorType::UtilizationDoesNotExist,
                        DoesNotExistType::Resource => ErrorType::ResourceDoesNotExist,
                    },
                    msg,
                ),
                HttpErrorResponse::ForeignKeyDoesNotExist(msg) => {
                    (ErrorType::ForeignKeyDoesNotExist, msg)
                }
                HttpErrorResponse::ConflictWithExisting(msg) => {
                    (ErrorType::ConflictWithExisting, msg)
                }
                HttpErrorResponse::InputTooLarge(msg) => (ErrorType::InputTooLarge, msg),
                HttpErrorResponse::InternalError(msg) => (ErrorType::InternalError, msg),
            };

            ServerErrorResponse {
                err_type,
                err_message: msg.to_string(),
            }
        }
    }

    impl actix_web::error::ResponseError for HttpErrorResponse {
        fn error_response(&self) -> HttpResponse {
            HttpResponseBuilder::new(self.status_code()).json(ServerErrorResponse::from(self))
        }

        fn status_code(&self) -> StatusCode {
            match *self {
                HttpErrorResponse::IncorrectlyFormed(_) | HttpErrorResponse::InvalidState(_) => {
                    StatusCode::BAD_REQUEST
                }
                HttpErrorResponse::DoesNotExist(_, _)
                | HttpErrorResponse::ForeignKeyDoesNotExist(_) => StatusCode::NOT_FOUND,
                HttpErrorResponse::ConflictWithExisting(_) => StatusCode::CONFLICT,
                HttpErrorResponse::InputTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
                HttpErrorResponse::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
        match err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                HttpErrorResponse::InputTooLarge(Cow::Borrowed("Request body is too large"))
                    .into()
            }
            JsonPayloadError::ContentType => HttpErrorResponse::IncorrectlyFormed(Cow::Borrowed(
                "Expected a body with Content-Type application/json",
            ))
            .into(),
            e => HttpErrorResponse::IncorrectlyFormed(Cow::Owned(e.to_string())).into(),
        }
    }

    pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
        HttpErrorResponse::IncorrectlyFormed(Cow::Owned(format!("Invalid ID in path: {err}")))
            .into()
    }

    pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
        HttpErrorResponse::IncorrectlyFormed(Cow::Owned(err.to_string())).into()
    }
}
