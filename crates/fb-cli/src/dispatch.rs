//! Per-invocation command contract.
//!
//! Every account-bound command goes through the same steps:
//!
//! 1. load the saved credentials ([`FbError::NotAuthenticated`] if none,
//!    before any SDK call),
//! 2. log in again with them,
//! 3. select the account by index,
//! 4. run one SDK operation and normalize its result.
//!
//! Commands add their own preconditions (price required, order exists)
//! between steps 3 and 4.

use fb_core::error::{FbError, FbResult};
use fb_core::session::SessionStore;
use fb_core::{SdkValue, normalize};
use fb_core::normalize::normalize_data;
use fb_sdk::request::MarketDataRequest;
use fb_sdk::{Account, BrokerSdk, SdkRequest};
use serde_json::Value;
use tracing::{debug, info, warn};

pub struct Dispatcher<S> {
    sdk: S,
    sessions: SessionStore,
    accounts: Option<Vec<Account>>,
}

impl<S: BrokerSdk> Dispatcher<S> {
    pub fn new(sdk: S, sessions: SessionStore) -> Self {
        Self { sdk, sessions, accounts: None }
    }

    pub fn sdk(&self) -> &S {
        &self.sdk
    }

    pub fn sdk_mut(&mut self) -> &mut S {
        &mut self.sdk
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Log in with the saved credentials; accounts are cached for the
    /// rest of the invocation.
    pub async fn authenticate(&mut self) -> FbResult<&[Account]> {
        if self.accounts.is_none() {
            let credentials = self.sessions.load()?.ok_or(FbError::NotAuthenticated)?;
            let result = self.sdk.login(&credentials).await?;
            if !result.is_success {
                warn!("[dispatch] saved credentials rejected");
                return Err(FbError::login_rejected(result.message.as_deref()));
            }
            info!("[dispatch] authenticated, {} account(s)", result.data.len());
            self.accounts = Some(result.data);
        }
        Ok(self.accounts.as_deref().unwrap_or_default())
    }

    /// Authenticate and pick the account at `index`.
    pub async fn account(&mut self, index: usize) -> FbResult<Account> {
        let accounts = self.authenticate().await?;
        select_account(accounts, index).cloned()
    }

    /// One SDK call, raw result.
    pub async fn invoke(&self, account: Option<&Account>, request: SdkRequest) -> FbResult<SdkValue> {
        debug!("[dispatch] {}", request.method());
        self.sdk.invoke(account, request).await
    }

    /// One account-bound call whose result is a single object.
    pub async fn single(&mut self, index: usize, request: impl Into<SdkRequest>) -> FbResult<Value> {
        let account = self.account(index).await?;
        self.single_for(&account, request).await
    }

    /// One account-bound call whose result carries a `data` list.
    pub async fn list(&mut self, index: usize, request: impl Into<SdkRequest>) -> FbResult<Value> {
        let account = self.account(index).await?;
        let result = self.invoke(Some(&account), request.into()).await?;
        Ok(normalize_data(&result))
    }

    /// One call bound to an already selected account.
    pub async fn single_for(&self, account: &Account, request: impl Into<SdkRequest>) -> FbResult<Value> {
        let result = self.invoke(Some(account), request.into()).await?;
        Ok(normalize(&result))
    }

    /// Market data call; needs a login but no account.
    pub async fn market(&mut self, request: MarketDataRequest) -> FbResult<Value> {
        self.authenticate().await?;
        let result = self.invoke(None, request.into()).await?;
        Ok(normalize(&result))
    }

    /// Current order records keyed by order number, in SDK order.
    pub async fn order_book(&self, account: &Account, listing: SdkRequest) -> FbResult<Vec<(String, SdkValue)>> {
        let results = self.invoke(Some(account), listing).await?;
        Ok(results
            .data_items()
            .iter()
            .map(|record| (order_no_of(record), record.clone()))
            .collect())
    }

    /// The first current order record with `order_no`.
    pub async fn find_order(&self, account: &Account, listing: SdkRequest, order_no: &str) -> FbResult<Option<SdkValue>> {
        let book = self.order_book(account, listing).await?;
        Ok(book.into_iter().find(|(no, _)| no == order_no).map(|(_, record)| record))
    }

    /// Release the SDK connection. Failures are only logged.
    pub async fn close(&mut self) {
        if let Err(e) = self.sdk.disconnect().await {
            warn!("[dispatch] disconnect failed: {e}");
        }
    }
}

/// Account at `index`, or a validation error naming the valid range.
pub fn select_account(accounts: &[Account], index: usize) -> FbResult<&Account> {
    accounts.get(index).ok_or_else(|| {
        FbError::Validation(match accounts.len() {
            0 => format!("Account index {index} out of range. No accounts available"),
            n => format!("Account index {index} out of range. Available: 0-{}", n - 1),
        })
    })
}

/// Order number of an order record: `order_no`, else `orderNo`, else "".
pub fn order_no_of(record: &SdkValue) -> String {
    let normalized = normalize(record);
    ["order_no", "orderNo"]
        .iter()
        .filter_map(|key| normalized.get(key).and_then(Value::as_str))
        .find(|no| !no.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn accounts(n: usize) -> Vec<Account> {
        (0..n).map(|i| Account(SdkValue::from(json!({"account": i.to_string()})))).collect()
    }

    #[test]
    fn account_index_in_range() {
        let accs = accounts(2);
        assert_eq!(select_account(&accs, 1).unwrap(), &accs[1]);
    }

    #[test]
    fn account_index_out_of_range() {
        let err = select_account(&accounts(2), 2).unwrap_err();
        assert_eq!(err.to_string(), "Account index 2 out of range. Available: 0-1");
        assert_eq!(err.exit_code(), 1);
        let err = select_account(&[], 0).unwrap_err();
        assert!(err.to_string().contains("No accounts"));
    }

    #[test]
    fn order_no_prefers_snake_case() {
        let rec = SdkValue::from(json!({"order_no": "A1", "orderNo": "B2"}));
        assert_eq!(order_no_of(&rec), "A1");
        let rec = SdkValue::from(json!({"order_no": "", "orderNo": "B2"}));
        assert_eq!(order_no_of(&rec), "B2");
        let rec = SdkValue::from(json!({"seq_no": "1"}));
        assert_eq!(order_no_of(&rec), "");
    }

    #[test]
    fn order_no_from_repr_record() {
        let rec: SdkValue = serde_json::from_value(json!({
            "$repr": "OrderResult { order_no: \"x0001\", price: 580.0 }"
        }))
        .unwrap();
        assert_eq!(order_no_of(&rec), "x0001");
    }
}
