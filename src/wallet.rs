use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Balance every newly created wallet starts with.
pub(crate) const INITIAL_BALANCE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Wallet {
  pub id: String,
  pub balance: f64,
}

impl Wallet {
  pub fn new(id: impl Into<String>, balance: f64) -> Self {
    Wallet {
      id: id.into(),
      balance,
    }
  }

  /// A fresh wallet with a random v4 id and the initial balance.
  pub fn generate() -> Self {
    Wallet::new(Uuid::new_v4().to_string(), INITIAL_BALANCE)
  }

  pub fn debit(&mut self, amount: f64) {
    self.balance -= amount;
  }

  pub fn credit(&mut self, amount: f64) {
    self.balance += amount;
  }

  pub fn can_cover(&self, amount: f64) -> bool {
    amount <= self.balance
  }
}
