extern crate json;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use json::JsonValue;

//     400: BadRequest
//     401: NotAuthenticated
//     402: PaymentError
//     403: Forbidden
//     404: NotFound
//     405: MethodNotAllowed
//     406: NotAcceptable
//     408: Timeout
//     409: Conflict
//     411: LengthRequired
//     422: Unprocessable
//     429: TooManyRequests
//     500: GeneralError
//     501: NotImplemented
//     502: BadGateway
//     503: Unavailable

quick_error! {
  #[derive(Debug)]
  pub enum Error {
    NotFound(error: String) {
      display("{}", error)
    }
    // whole-file writes fail while another process holds the workbook open,
    // callers may retry
    IOError(error: String) {
      display("{}", error)
    }
    Validation(error: String) {
      display("{}", error)
    }
    GeneralError(error: String) {
      display("{}", error)
    }
    NotImplemented
  }
}

impl From<Error> for std::io::Error {
  fn from(e: Error) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
  }
}

impl std::convert::From<std::io::Error> for Error {
  fn from(e: std::io::Error) -> Self {
    Error::IOError(e.to_string())
  }
}

impl Error {
  fn to_code(&self) -> u16 {
    match self {
      Error::NotFound(_) => 404,
      Error::IOError(_) => 503,
      Error::Validation(_) => 422,
      Error::NotImplemented => 501,
      _ => 500,
    }
  }

  fn to_class_name(&self) -> &str {
    match self {
      Error::NotFound(_) => "not-found",
      Error::IOError(_) => "io-errors",
      Error::Validation(_) => "unprocessable",
      Error::GeneralError(_) => "general-errors",
      Error::NotImplemented => "not-implemented",
    }
  }

  fn to_name(&self) -> &str {
    match self {
      Error::NotFound(_) => "NotFound",
      Error::IOError(_) => "IOError",
      Error::Validation(_) => "Unprocessable",
      Error::GeneralError(_) => "GeneralError",
      Error::NotImplemented => "NotImplemented",
    }
  }

  pub fn to_json(&self) -> JsonValue {
    json::object! {
      className: self.to_class_name(),
      code: self.to_code(),
      message: self.to_string(),
      name: self.to_name(),
    }
  }
}

impl actix_web::ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    StatusCode::from_u16(self.to_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
  }

  fn error_response(&self) -> HttpResponse {
    HttpResponse::build(self.status_code())
      .content_type("application/json")
      .body(self.to_json().dump())
  }
}
