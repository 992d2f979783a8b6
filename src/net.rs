use serde::{Deserialize, Serialize};
use warp::{
  http::{header::CONTENT_TYPE, StatusCode},
  reply::Response,
  Reply,
};

use crate::error::LedgerError;

/// Body of `POST /api/v1/wallet/{walletId}/send`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PreTransaction {
  #[serde(rename = "idTo")]
  pub to: String,
  pub amount: f64,
}

pub(crate) fn json_reply<T: Serialize>(
  value: &T,
  status: StatusCode,
  on_error: StatusCode,
) -> Response {
  match serde_json::to_string(value) {
    Ok(body) => warp::reply::with_status(
      warp::reply::with_header(body, CONTENT_TYPE, "application/json"),
      status,
    )
    .into_response(),
    Err(err) => text_reply(err.to_string(), on_error),
  }
}

pub(crate) fn text_reply(message: impl Into<String>, status: StatusCode) -> Response {
  warp::reply::with_status(message.into(), status).into_response()
}

pub(crate) fn error_reply(err: &LedgerError) -> Response {
  text_reply(err.to_string(), err.status())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pre_transaction_reads_id_to() {
    let request: PreTransaction =
      serde_json::from_str(r#"{"idTo":"295b7ec4","amount":10}"#).unwrap();

    assert_eq!(request.to, "295b7ec4");
    assert_eq!(request.amount, 10.0);
  }

  #[test]
  fn errors_reply_in_plain_text() {
    let response = error_reply(&LedgerError::SenderNotFound);

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert!(response.headers()[CONTENT_TYPE]
      .to_str()
      .unwrap()
      .starts_with("text/plain"));
  }

  #[test]
  fn json_replies_set_content_type() {
    let response = json_reply(&vec![1, 2], StatusCode::OK, StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
  }
}
