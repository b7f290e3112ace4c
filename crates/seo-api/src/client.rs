//! Typed façade over an API backend

use serde_json::{json, Value};
use std::sync::Arc;

use crate::backend::{ApiBackend, Method, Params};

/// Marketplace search filters; unset filters are not sent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub dr_min: Option<i64>,
    pub price_max: Option<f64>,
    pub topic: Option<String>,
}

/// A backlink offered for sale
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub source_url: String,
    pub target_url: String,
    pub price_usd: f64,
    pub anchor: Option<String>,
    pub rel: Option<String>,
}

/// aipseo API client
#[derive(Clone)]
pub struct ApiClient {
    backend: Arc<dyn ApiBackend>,
}

impl ApiClient {
    /// Create a client over `backend`
    pub fn new(backend: Arc<dyn ApiBackend>) -> Self {
        Self { backend }
    }

    /// Raw call to any endpoint
    pub async fn call(&self, endpoint: &str, method: Method, params: Params) -> Value {
        self.backend.call(endpoint, method, params).await
    }

    /// SEO metrics for a URL
    pub async fn lookup(&self, url: &str) -> Value {
        self.get("lookup", json!({ "url": url })).await
    }

    /// Spam score for a URL
    pub async fn spam_score(&self, url: &str) -> Value {
        self.get("spam-score", json!({ "url": url })).await
    }

    /// Search marketplace listings
    pub async fn search_marketplace(&self, filters: &SearchFilters) -> Value {
        let mut params = Params::new();
        if let Some(dr_min) = filters.dr_min {
            params.insert("dr_min".into(), json!(dr_min));
        }
        if let Some(price_max) = filters.price_max {
            params.insert("price_max".into(), json!(price_max));
        }
        if let Some(topic) = &filters.topic {
            params.insert("topic".into(), json!(topic));
        }
        self.call("marketplace/search", Method::Get, params).await
    }

    /// Balance of a wallet
    pub async fn get_balance(&self, wallet_id: &str) -> Value {
        self.get("wallet/balance", json!({ "wallet_id": wallet_id }))
            .await
    }

    /// Register a new wallet
    pub async fn create_wallet(&self, name: Option<&str>) -> Value {
        let mut params = Params::new();
        if let Some(name) = name {
            params.insert("name".into(), json!(name));
        }
        self.call("wallet/create", Method::Post, params).await
    }

    /// Start a deposit; the response carries a checkout URL
    pub async fn deposit(&self, wallet_id: &str, amount_usd: f64) -> Value {
        self.post(
            "wallet/deposit",
            json!({ "wallet_id": wallet_id, "amount_usd": amount_usd }),
        )
        .await
    }

    /// Withdraw funds to a payout destination
    pub async fn withdraw(&self, wallet_id: &str, amount_usd: f64, dest: &str) -> Value {
        self.post(
            "wallet/withdraw",
            json!({ "wallet_id": wallet_id, "amount_usd": amount_usd, "dest": dest }),
        )
        .await
    }

    /// Buy a listing into escrow
    pub async fn buy_listing(&self, wallet_id: &str, listing_id: &str) -> Value {
        self.post(
            "marketplace/buy",
            json!({ "wallet_id": wallet_id, "listing_id": listing_id }),
        )
        .await
    }

    /// Offer a backlink for sale
    pub async fn list_backlink(&self, wallet_id: &str, listing: &NewListing) -> Value {
        let mut params = Params::new();
        params.insert("wallet_id".into(), json!(wallet_id));
        params.insert("source_url".into(), json!(listing.source_url));
        params.insert("target_url".into(), json!(listing.target_url));
        params.insert("price_usd".into(), json!(listing.price_usd));
        if let Some(anchor) = &listing.anchor {
            params.insert("anchor".into(), json!(anchor));
        }
        if let Some(rel) = &listing.rel {
            params.insert("rel".into(), json!(rel));
        }
        self.call("marketplace/list", Method::Post, params).await
    }

    async fn get(&self, endpoint: &str, params: Value) -> Value {
        self.call(endpoint, Method::Get, into_params(params)).await
    }

    async fn post(&self, endpoint: &str, params: Value) -> Value {
        self.call(endpoint, Method::Post, into_params(params)).await
    }
}

fn into_params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;

    fn client() -> (Arc<MockBackend>, ApiClient) {
        let mock = Arc::new(MockBackend::seeded(11));
        let client = ApiClient::new(mock.clone());
        (mock, client)
    }

    #[tokio::test]
    async fn test_search_sends_only_provided_filters() {
        let (mock, client) = client();

        client.search_marketplace(&SearchFilters::default()).await;
        let call = mock.last_call().unwrap();
        assert_eq!(call.endpoint, "marketplace/search");
        assert_eq!(call.method, Method::Get);
        assert!(call.params.is_empty());

        let filters = SearchFilters {
            dr_min: Some(40),
            price_max: Some(60.0),
            topic: None,
        };
        client.search_marketplace(&filters).await;
        let call = mock.last_call().unwrap();
        assert_eq!(Value::Object(call.params), json!({"dr_min": 40, "price_max": 60.0}));
    }

    #[tokio::test]
    async fn test_wallet_calls() {
        let (mock, client) = client();

        client.create_wallet(Some("test")).await;
        let call = mock.last_call().unwrap();
        assert_eq!(call.method, Method::Post);
        assert_eq!(Value::Object(call.params), json!({"name": "test"}));

        client.deposit("w_1", 100.0).await;
        let call = mock.last_call().unwrap();
        assert_eq!(
            Value::Object(call.params),
            json!({"wallet_id": "w_1", "amount_usd": 100.0})
        );

        let response = client.withdraw("w_1", 50.0, "bank_account123").await;
        assert_eq!(response["destination"], "bank_account123");
        let call = mock.last_call().unwrap();
        assert_eq!(call.endpoint, "wallet/withdraw");
        assert_eq!(call.params["dest"], "bank_account123");

        client.get_balance("w_1").await;
        let call = mock.last_call().unwrap();
        assert_eq!(call.method, Method::Get);
        assert_eq!(call.params["wallet_id"], "w_1");
    }

    #[tokio::test]
    async fn test_list_backlink_params() {
        let (mock, client) = client();
        let listing = NewListing {
            source_url: "https://example.com/blog/post".into(),
            target_url: "https://target.com/page".into(),
            price_usd: 75.0,
            anchor: Some("click here to visit".into()),
            rel: None,
        };

        let response = client.list_backlink("w_1", &listing).await;
        assert_eq!(response["status"], "active");
        assert_eq!(response["price_usd"], 75.0);

        let call = mock.last_call().unwrap();
        assert_eq!(
            Value::Object(call.params),
            json!({
                "wallet_id": "w_1",
                "source_url": "https://example.com/blog/post",
                "target_url": "https://target.com/page",
                "price_usd": 75.0,
                "anchor": "click here to visit"
            })
        );
    }

    #[tokio::test]
    async fn test_buy_listing() {
        let (_, client) = client();
        let response = client.buy_listing("w_1", "lst_12345678").await;
        assert_eq!(response["status"], "success");
        assert_eq!(response["listing_id"], "lst_12345678");
        assert!(response["escrow_id"].as_str().unwrap().starts_with("esc_"));
    }
}
