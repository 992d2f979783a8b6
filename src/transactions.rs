use std::collections::BTreeMap;

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
  pub time: String,
  #[serde(rename = "idFrom")]
  pub from: String,
  #[serde(rename = "idTo")]
  pub to: String,
  pub amount: f64,
}

impl Transaction {
  /// Record of a transfer completed now, stamped in RFC 3339 local time.
  pub fn completed(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
    Transaction {
      time: Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
      from: from.into(),
      to: to.into(),
      amount,
    }
  }

  pub fn involves(&self, wallet_id: &str) -> bool {
    self.from == wallet_id || self.to == wallet_id
  }
}

/// Transactions touching `wallet_id`, in key order, re-keyed from 1.
pub(crate) fn history_of(
  transactions: &BTreeMap<u64, Transaction>,
  wallet_id: &str,
) -> BTreeMap<u64, Transaction> {
  transactions
    .values()
    .filter(|transaction| transaction.involves(wallet_id))
    .cloned()
    .zip(1..)
    .map(|(transaction, key)| (key, transaction))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn transaction(from: &str, to: &str, amount: f64) -> Transaction {
    Transaction {
      time: "2024-01-25T23:40:25+03:00".to_string(),
      from: from.to_string(),
      to: to.to_string(),
      amount,
    }
  }

  #[test]
  fn history_keeps_order_and_rekeys_from_one() {
    let mut all = BTreeMap::new();
    all.insert(1, transaction("a", "b", 1.0));
    all.insert(2, transaction("c", "d", 2.0));
    all.insert(5, transaction("b", "c", 3.0));
    all.insert(9, transaction("d", "a", 4.0));

    let history = history_of(&all, "a");

    assert_eq!(history.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(history[&1].amount, 1.0);
    assert_eq!(history[&2].amount, 4.0);
  }

  #[test]
  fn unknown_wallet_has_empty_history() {
    let mut all = BTreeMap::new();
    all.insert(1, transaction("a", "b", 1.0));

    assert!(history_of(&all, "zzz").is_empty());
  }

  #[test]
  fn serializes_endpoints_as_id_fields() {
    let json = serde_json::to_value(transaction("a", "b", 10.0)).unwrap();

    assert_eq!(
      json,
      serde_json::json!({
        "time": "2024-01-25T23:40:25+03:00",
        "idFrom": "a",
        "idTo": "b",
        "amount": 10.0,
      })
    );
  }

  #[test]
  fn completed_transactions_carry_an_rfc3339_timestamp() {
    let transaction = Transaction::completed("a", "b", 1.5);

    assert!(chrono::DateTime::parse_from_rfc3339(&transaction.time).is_ok());
  }
}
