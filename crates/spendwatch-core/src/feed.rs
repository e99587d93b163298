//! Sandbox banking API client
//!
//! Pulls purchase history from the Nessie-style sandbox API: list
//! the customer's accounts, then each account's purchases. The API
//! authenticates with a `key` query parameter. Purchases arrive
//! uncategorized; the keyword categorizer fills that in before
//! normalization.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::categorize::categorize;
use crate::error::{Error, Result};
use crate::models::{RawRecord, Transaction};
use crate::normalize::normalize_record;

const DEFAULT_HOST: &str = "http://api.nessieisreal.com";

/// An account as returned by the sandbox API.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedAccount {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// A purchase as returned by the sandbox API.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedPurchase {
    #[serde(rename = "_id")]
    pub id: String,
    pub purchase_date: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SandboxFeed {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    customer_id: String,
}

impl SandboxFeed {
    pub fn new(base_url: &str, api_key: &str, customer_id: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            customer_id: customer_id.to_string(),
        }
    }

    /// Builds a feed client from the environment, or `None` when the
    /// required variables are absent:
    /// - `SANDBOX_API_KEY` (required)
    /// - `SANDBOX_CUSTOMER_ID` (required)
    /// - `SANDBOX_API_HOST` (optional, defaults to the public sandbox)
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("SANDBOX_API_KEY").ok()?;
        let customer_id = std::env::var("SANDBOX_CUSTOMER_ID").ok()?;
        let host =
            std::env::var("SANDBOX_API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Some(Self::new(&host, &api_key, &customer_id))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Feed(format!(
                "sandbox API returned {} for {}",
                response.status(),
                path
            )));
        }

        Ok(response.json().await?)
    }

    pub async fn fetch_accounts(&self) -> Result<Vec<FeedAccount>> {
        self.get_json(&format!("/customers/{}/accounts", self.customer_id))
            .await
    }

    pub async fn fetch_purchases(&self, account_id: &str) -> Result<Vec<FeedPurchase>> {
        self.get_json(&format!("/accounts/{}/purchases", account_id))
            .await
    }

    /// Fetches all purchases across the customer's accounts as
    /// normalized transactions. A single account failing to load is
    /// logged and skipped; no accounts at all is an error.
    pub async fn fetch_transactions(&self) -> Result<Vec<Transaction>> {
        let accounts = self.fetch_accounts().await?;
        if accounts.is_empty() {
            return Err(Error::Feed(format!(
                "no accounts found for customer {}",
                self.customer_id
            )));
        }

        let mut transactions = Vec::new();
        for account in &accounts {
            let purchases = match self.fetch_purchases(&account.id).await {
                Ok(p) => p,
                Err(e) => {
                    warn!(account = %account.id, error = %e, "skipping account, purchases unavailable");
                    continue;
                }
            };

            for purchase in purchases {
                let description = purchase
                    .description
                    .unwrap_or_else(|| format!("Purchase {}", purchase.id));
                let raw = RawRecord {
                    date: purchase.purchase_date,
                    description: description.clone(),
                    category: Some(categorize(&description).to_string()),
                    amount: purchase.amount.to_string(),
                };
                if let Some(txn) = normalize_record(&raw) {
                    transactions.push(txn);
                }
            }
        }

        debug!(
            accounts = accounts.len(),
            transactions = transactions.len(),
            "fetched sandbox feed"
        );
        Ok(transactions)
    }
}
