use std::collections::{BTreeMap, HashMap};

use crate::{transactions::Transaction, wallet::Wallet};

/// Backing store for wallets and the transaction log.
pub(crate) trait Ledger: Send {
  fn wallets(&self) -> HashMap<String, Wallet>;

  fn wallet(&self, id: &str) -> Option<Wallet>;

  /// Inserts the wallet, replacing any stored wallet with the same id.
  fn put_wallet(&mut self, wallet: Wallet);

  fn transactions(&self) -> BTreeMap<u64, Transaction>;

  /// Appends to the log and returns the key the transaction was stored under.
  fn append_transaction(&mut self, transaction: Transaction) -> u64;
}

#[derive(Debug, Default)]
pub(crate) struct MemoryLedger {
  wallets: HashMap<String, Wallet>,
  transactions: BTreeMap<u64, Transaction>,
  next_key: u64,
}

impl MemoryLedger {
  pub fn new() -> Self {
    MemoryLedger {
      wallets: HashMap::new(),
      transactions: BTreeMap::new(),
      next_key: 1,
    }
  }

  /// Ledger preloaded with two demo wallets and their transfer history.
  pub fn seeded() -> Self {
    const FIRST: &str = "d2ceaa81-0cf0-402f-be7e-7e89e0528420";
    const SECOND: &str = "295b7ec4-1fab-4ae5-95b4-05c1248bcdb0";

    let mut ledger = MemoryLedger::new();
    ledger.put_wallet(Wallet::new(FIRST, 87.5));
    ledger.put_wallet(Wallet::new(SECOND, 34.7));
    ledger.append_transaction(Transaction {
      time: "2024-01-25T23:40:25+03:00".to_string(),
      from: FIRST.to_string(),
      to: SECOND.to_string(),
      amount: 10.0,
    });
    ledger.append_transaction(Transaction {
      time: "2024-01-25T14:35:25+03:00".to_string(),
      from: SECOND.to_string(),
      to: FIRST.to_string(),
      amount: 21.0,
    });
    ledger
  }
}

impl Ledger for MemoryLedger {
  fn wallets(&self) -> HashMap<String, Wallet> {
    self.wallets.clone()
  }

  fn wallet(&self, id: &str) -> Option<Wallet> {
    self.wallets.get(id).cloned()
  }

  fn put_wallet(&mut self, wallet: Wallet) {
    self.wallets.insert(wallet.id.clone(), wallet);
  }

  fn transactions(&self) -> BTreeMap<u64, Transaction> {
    self.transactions.clone()
  }

  fn append_transaction(&mut self, transaction: Transaction) -> u64 {
    // `Default` leaves the counter at zero; keys start at 1 either way.
    let key = self.next_key.max(1);
    self.next_key = key + 1;
    self.transactions.insert(key, transaction);
    key
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn seeded_ledger_holds_demo_data() {
    let ledger = MemoryLedger::seeded();

    assert_eq!(ledger.wallets().len(), 2);
    assert_eq!(
      ledger.wallet("d2ceaa81-0cf0-402f-be7e-7e89e0528420").map(|w| w.balance),
      Some(87.5)
    );
    assert_eq!(
      ledger.transactions().keys().copied().collect::<Vec<_>>(),
      vec![1, 2]
    );
  }

  #[test]
  fn keys_continue_after_seed_data() {
    let mut ledger = MemoryLedger::seeded();

    let key = ledger.append_transaction(Transaction::completed("a", "b", 1.0));

    assert_eq!(key, 3);
  }

  #[test]
  fn default_ledger_starts_keys_at_one() {
    let mut ledger = MemoryLedger::default();

    assert_eq!(ledger.append_transaction(Transaction::completed("a", "b", 1.0)), 1);
    assert_eq!(ledger.append_transaction(Transaction::completed("b", "a", 1.0)), 2);
  }

  #[test]
  fn put_wallet_replaces_by_id() {
    let mut ledger = MemoryLedger::new();
    ledger.put_wallet(Wallet::new("w", 1.0));
    ledger.put_wallet(Wallet::new("w", 2.0));

    assert_eq!(ledger.wallets().len(), 1);
    assert_eq!(ledger.wallet("w"), Some(Wallet::new("w", 2.0)));
    assert_eq!(ledger.wallet("missing"), None);
  }
}
