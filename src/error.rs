use thiserror::Error;
use warp::http::StatusCode;

/// Reasons a wallet request is refused. The `Display` text is the reply body.
#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum LedgerError {
  #[error("Wallet not found")]
  WalletNotFound,

  #[error("Sender wallet not found")]
  SenderNotFound,

  #[error("Recipient wallet not found")]
  RecipientNotFound,

  #[error("Insufficient funds: balance {balance}, requested {amount}")]
  InsufficientFunds { balance: f64, amount: f64 },

  #[error("Malformed transfer request: {0}")]
  MalformedBody(String),
}

impl LedgerError {
  pub fn status(&self) -> StatusCode {
    match self {
      LedgerError::WalletNotFound => StatusCode::NOT_FOUND,
      LedgerError::SenderNotFound => StatusCode::PAYMENT_REQUIRED,
      LedgerError::RecipientNotFound
      | LedgerError::InsufficientFunds { .. }
      | LedgerError::MalformedBody(_) => StatusCode::BAD_REQUEST,
    }
  }
}

impl From<serde_json::Error> for LedgerError {
  fn from(err: serde_json::Error) -> Self {
    LedgerError::MalformedBody(err.to_string())
  }
}
