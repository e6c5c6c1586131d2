// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::config::AggregatorConfig;
use crate::error::{Error, Result};
use crate::utils::http_client;

/// The three operations the core needs from the financial-data aggregation
/// service. Implemented over HTTP in production and by in-memory fakes in
/// tests.
pub trait AggregationService {
    /// Request a short-lived link token for the given user, to be handed to
    /// the client-side link widget.
    fn create_link_token(&self, user_id: &str) -> Result<String>;

    /// Exchange the widget's temporary public token for a durable access
    /// token.
    fn exchange_public_token(&self, public_token: &str) -> Result<String>;

    /// Fetch transactions for one linked item over a closed date range.
    fn transactions(
        &self,
        access_token: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RemoteTransaction>>;
}

/// A transaction as the aggregation service reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteTransaction {
    #[serde(alias = "transaction_id")]
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<Vec<String>>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    pub name: String,
}

impl RemoteTransaction {
    /// First entry of the service's category hierarchy, if it sent one.
    pub fn first_category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .and_then(|c| c.first())
            .map(|s| s.as_str())
    }

    pub fn merchant_text(&self) -> &str {
        self.merchant_name.as_deref().unwrap_or(&self.name)
    }
}

/// Blocking HTTP client for the aggregation service. Credentials ride in the
/// JSON body of every POST, per the service's convention.
pub struct HttpAggregator {
    client_id: String,
    secret: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpAggregator {
    pub fn new(config: AggregatorConfig) -> Result<Self> {
        if config.client_id.trim().is_empty() || config.secret.trim().is_empty() {
            return Err(Error::Config(
                "Aggregation client id and secret must be non-empty".into(),
            ));
        }
        let client = http_client().map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self {
            client_id: config.client_id,
            secret: config.secret,
            base_url: config.environment.base_url().to_string(),
            client,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(AggregatorConfig::from_env()?)
    }

    /// Override the API base URL (sandbox mirrors, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let response = self.client.post(&url).json(body).send()?;
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(Error::ExternalService(format!(
                "request to {} failed ({}): {}",
                path, status, text
            )));
        }
        serde_json::from_str(&text).map_err(|e| {
            Error::ExternalService(format!("invalid response from {}: {}", path, e))
        })
    }
}

impl AggregationService for HttpAggregator {
    fn create_link_token(&self, user_id: &str) -> Result<String> {
        #[derive(Serialize)]
        struct User<'a> {
            client_user_id: &'a str,
        }
        #[derive(Serialize)]
        struct Request<'a> {
            client_id: &'a str,
            secret: &'a str,
            client_name: &'a str,
            user: User<'a>,
            products: [&'a str; 2],
            country_codes: [&'a str; 1],
            language: &'a str,
        }
        #[derive(Deserialize)]
        struct Response {
            link_token: String,
        }

        let response: Response = self.post(
            "/link/token/create",
            &Request {
                client_id: &self.client_id,
                secret: &self.secret,
                client_name: "Wealthclip",
                user: User {
                    client_user_id: user_id,
                },
                products: ["auth", "transactions"],
                country_codes: ["US"],
                language: "en",
            },
        )?;
        Ok(response.link_token)
    }

    fn exchange_public_token(&self, public_token: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Request<'a> {
            client_id: &'a str,
            secret: &'a str,
            public_token: &'a str,
        }
        #[derive(Deserialize)]
        struct Response {
            access_token: String,
        }

        let response: Response = self.post(
            "/item/public_token/exchange",
            &Request {
                client_id: &self.client_id,
                secret: &self.secret,
                public_token,
            },
        )?;
        Ok(response.access_token)
    }

    fn transactions(
        &self,
        access_token: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RemoteTransaction>> {
        #[derive(Serialize)]
        struct Request<'a> {
            client_id: &'a str,
            secret: &'a str,
            access_token: &'a str,
            start_date: String,
            end_date: String,
        }
        #[derive(Deserialize)]
        struct Response {
            transactions: Vec<RemoteTransaction>,
        }

        let response: Response = self.post(
            "/transactions/get",
            &Request {
                client_id: &self.client_id,
                secret: &self.secret,
                access_token,
                start_date: start.to_string(),
                end_date: end.to_string(),
            },
        )?;
        Ok(response.transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_transaction_parses_service_payload() {
        let raw = r#"{
            "transaction_id": "tx-1",
            "date": "2025-07-04",
            "amount": 12.34,
            "category": ["Food and Drink", "Restaurants"],
            "merchant_name": "Corner Cafe",
            "name": "CORNER CAFE 0042"
        }"#;
        let tx: RemoteTransaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.id, "tx-1");
        assert_eq!(tx.first_category(), Some("Food and Drink"));
        assert_eq!(tx.merchant_text(), "Corner Cafe");
    }

    #[test]
    fn remote_transaction_tolerates_missing_optionals() {
        let raw = r#"{"id": "tx-2", "date": "2025-07-05", "amount": -3, "name": "TRANSFER"}"#;
        let tx: RemoteTransaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.first_category(), None);
        assert_eq!(tx.merchant_text(), "TRANSFER");
    }
}
