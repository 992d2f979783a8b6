use std::{
  collections::{BTreeMap, HashMap},
  net::SocketAddr,
  sync::Arc,
};

use tokio::sync::Mutex;
use tracing::{info, warn};
use warp::{http::StatusCode, hyper::body::Bytes, Filter};

use crate::{
  error::LedgerError,
  net::{error_reply, json_reply, text_reply, PreTransaction},
  store::Ledger,
  transactions::{history_of, Transaction},
  wallet::Wallet,
};

pub(crate) type SharedLedger = Arc<Mutex<Box<dyn Ledger>>>;

#[derive(Clone)]
pub(crate) struct Server {
  ledger: SharedLedger,
}

impl Server {
  pub fn new(ledger: impl Ledger + 'static) -> Self {
    let ledger: Box<dyn Ledger> = Box::new(ledger);
    Server {
      ledger: Arc::new(Mutex::new(ledger)),
    }
  }

  pub async fn run(&self, address: SocketAddr) -> Result<(), warp::Error> {
    let (bound, serving) = warp::serve(self.routes()).try_bind_ephemeral(address)?;
    info!(address = %bound, "wallet ledger listening");
    serving.await;
    Ok(())
  }

  pub fn routes(
    &self,
  ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let server = self.clone();
    let list_wallets_route = warp::path!("api" / "v1" / "wallet")
      .and(warp::get())
      .and_then(move || {
        let server = server.clone();
        async move {
          let wallets = server.list_wallets().await;
          Ok::<_, warp::Rejection>(json_reply(
            &wallets,
            StatusCode::OK,
            StatusCode::INTERNAL_SERVER_ERROR,
          ))
        }
      });

    let server = self.clone();
    let create_wallet_route = warp::path!("api" / "v1" / "wallet")
      .and(warp::post())
      .and_then(move || {
        let server = server.clone();
        async move {
          server.create_wallet().await;
          Ok::<_, warp::Rejection>(text_reply("Wallet created", StatusCode::CREATED))
        }
      });

    let server = self.clone();
    let history_route = warp::path!("api" / "v1" / "wallet" / "history")
      .and(warp::get())
      .and_then(move || {
        let server = server.clone();
        async move {
          let transactions = server.list_transactions().await;
          Ok::<_, warp::Rejection>(json_reply(
            &transactions,
            StatusCode::OK,
            StatusCode::INTERNAL_SERVER_ERROR,
          ))
        }
      });

    let server = self.clone();
    let wallet_route = warp::path!("api" / "v1" / "wallet" / String)
      .and(warp::get())
      .and_then(move |wallet_id: String| {
        let server = server.clone();
        async move {
          let reply = match server.wallet(&wallet_id).await {
            Ok(wallet) => json_reply(&wallet, StatusCode::OK, StatusCode::BAD_REQUEST),
            Err(err) => error_reply(&err),
          };
          Ok::<_, warp::Rejection>(reply)
        }
      });

    let server = self.clone();
    let send_route = warp::path!("api" / "v1" / "wallet" / String / "send")
      .and(warp::post())
      .and(warp::body::bytes())
      .and_then(move |wallet_id: String, body: Bytes| {
        let server = server.clone();
        async move {
          let reply = match server.transfer(&wallet_id, &body).await {
            Ok(_) => text_reply("Transfer completed", StatusCode::ACCEPTED),
            Err(err) => error_reply(&err),
          };
          Ok::<_, warp::Rejection>(reply)
        }
      });

    let server = self.clone();
    let wallet_history_route = warp::path!("api" / "v1" / "wallet" / String / "history")
      .and(warp::get())
      .and_then(move |wallet_id: String| {
        let server = server.clone();
        async move {
          let history = server.wallet_history(&wallet_id).await;
          Ok::<_, warp::Rejection>(json_reply(
            &history,
            StatusCode::OK,
            StatusCode::NOT_FOUND,
          ))
        }
      });

    // Path before method: an unmatched path must reject as 404, not 405.
    // `history` must be tried before the `{walletId}` capture.
    list_wallets_route
      .or(create_wallet_route)
      .or(history_route)
      .or(wallet_route)
      .or(send_route)
      .or(wallet_history_route)
      .with(warp::trace::request())
  }

  pub async fn list_wallets(&self) -> HashMap<String, Wallet> {
    self.ledger.lock().await.wallets()
  }

  pub async fn wallet(&self, id: &str) -> Result<Wallet, LedgerError> {
    self
      .ledger
      .lock()
      .await
      .wallet(id)
      .ok_or(LedgerError::WalletNotFound)
  }

  pub async fn create_wallet(&self) -> Wallet {
    let wallet = Wallet::generate();
    self.ledger.lock().await.put_wallet(wallet.clone());

    info!(wallet_id = %wallet.id, balance = wallet.balance, "wallet created");
    wallet
  }

  pub async fn list_transactions(&self) -> BTreeMap<u64, Transaction> {
    self.ledger.lock().await.transactions()
  }

  pub async fn wallet_history(&self, wallet_id: &str) -> BTreeMap<u64, Transaction> {
    let transactions = self.ledger.lock().await.transactions();
    history_of(&transactions, wallet_id)
  }

  /// Returns the key of the recorded transaction.
  pub async fn transfer(&self, from_id: &str, body: &[u8]) -> Result<u64, LedgerError> {
    let mut ledger = self.ledger.lock().await;

    match process_transfer(&mut **ledger, from_id, body) {
      Ok((key, transaction)) => {
        info!(
          key,
          from = %transaction.from,
          to = %transaction.to,
          amount = transaction.amount,
          "transfer completed"
        );
        Ok(key)
      }
      Err(err) => {
        warn!(from = %from_id, error = %err, "transfer rejected");
        Err(err)
      }
    }
  }
}

fn process_transfer(
  ledger: &mut dyn Ledger,
  from_id: &str,
  body: &[u8],
) -> Result<(u64, Transaction), LedgerError> {
  let mut sender = ledger.wallet(from_id).ok_or(LedgerError::SenderNotFound)?;
  let request: PreTransaction = serde_json::from_slice(body)?;
  let recipient = ledger
    .wallet(&request.to)
    .ok_or(LedgerError::RecipientNotFound)?;

  if !sender.can_cover(request.amount) {
    return Err(LedgerError::InsufficientFunds {
      balance: sender.balance,
      amount: request.amount,
    });
  }

  sender.debit(request.amount);
  ledger.put_wallet(sender);

  // Re-read so that a transfer to self credits the debited wallet.
  let mut recipient = ledger.wallet(&recipient.id).unwrap_or(recipient);
  recipient.credit(request.amount);
  ledger.put_wallet(recipient);

  let transaction = Transaction::completed(from_id, request.to, request.amount);
  let key = ledger.append_transaction(transaction.clone());
  Ok((key, transaction))
}
