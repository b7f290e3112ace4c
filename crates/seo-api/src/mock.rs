//! In-process mock of the aipseo API
//!
//! Answers every known endpoint with plausible canned data so the CLI and
//! the agent tools work without network access.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::backend::{error_value, ApiBackend, Method, Params};
use crate::ids::random_id;

const DEFAULT_DR_MIN: i64 = 20;
const DEFAULT_PRICE_CAP: f64 = 1000.0;

/// A call received by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: String,
    pub method: Method,
    pub params: Params,
}

/// Mock API backend
pub struct MockBackend {
    rng: Mutex<StdRng>,
    calls: Mutex<Vec<RecordedCall>>,
    overrides: HashMap<String, Value>,
}

impl MockBackend {
    /// Create a mock seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a mock with reproducible output
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            calls: Mutex::new(Vec::new()),
            overrides: HashMap::new(),
        }
    }

    /// Answer `endpoint` with a fixed value instead of generated data
    pub fn with_response(mut self, endpoint: impl Into<String>, response: Value) -> Self {
        self.overrides.insert(endpoint.into(), response);
        self
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// The most recent call, if any
    pub fn last_call(&self) -> Option<RecordedCall> {
        lock(&self.calls).last().cloned()
    }

    fn respond(&self, endpoint: &str, params: &Params) -> Value {
        if let Some(response) = self.overrides.get(endpoint) {
            return response.clone();
        }

        let mut rng = lock(&self.rng);
        let rng = &mut *rng;

        match endpoint {
            "lookup" => json!({
                "url": str_param(params, "url").unwrap_or("example.com"),
                "domain_authority": 45,
                "page_authority": 38,
                "backlinks": 234,
                "referring_domains": 56,
                "indexed_pages": 1243,
                "last_crawled": "2023-05-10T14:32:45Z",
            }),
            "spam-score" => {
                let score: u32 = rng.gen_range(1..=10);
                json!({
                    "url": str_param(params, "url").unwrap_or("example.com"),
                    "spam_score": score,
                    "risk_level": risk_level(score),
                    "spam_flags": rng.gen_range(0..=5),
                    "last_checked": "2023-05-12T09:15:22Z",
                })
            }
            "wallet/create" => json!({
                "wallet_id": format!("w_{}", random_id(rng, 16)),
                "deposit_address": format!("aipseo_{}", random_id(rng, 24)),
            }),
            "wallet/balance" => json!({
                "wallet_id": str_param(params, "wallet_id").unwrap_or_default(),
                "tokens": rng.gen_range(100..=5000),
                "usd": rng.gen_range(10.0..500.0),
            }),
            "wallet/deposit" => json!({
                "wallet_id": str_param(params, "wallet_id").unwrap_or_default(),
                "amount_usd": f64_param(params, "amount_usd").unwrap_or(100.0),
                "stripe_checkout_url": "https://checkout.stripe.com/pay/mock_session_id",
            }),
            "wallet/withdraw" => json!({
                "wallet_id": str_param(params, "wallet_id").unwrap_or_default(),
                "amount_usd": f64_param(params, "amount_usd").unwrap_or(50.0),
                "destination": str_param(params, "dest").unwrap_or("example_bank_account"),
                "status": "processing",
                "transaction_id": format!("tx_{}", random_id(rng, 16)),
            }),
            "marketplace/search" => search_listings(rng, params),
            "marketplace/buy" => {
                let listing_id = match str_param(params, "listing_id") {
                    Some(id) => id.to_string(),
                    None => format!("lst_{}", random_id(rng, 8)),
                };
                json!({
                    "status": "success",
                    "escrow_id": format!("esc_{}", random_id(rng, 12)),
                    "listing_id": listing_id,
                })
            }
            "marketplace/list" => json!({
                "listing_id": format!("lst_{}", random_id(rng, 8)),
                "source_url": str_param(params, "source_url").unwrap_or("https://example.com/blog"),
                "target_url": str_param(params, "target_url").unwrap_or("https://target.com"),
                "price_usd": f64_param(params, "price_usd").unwrap_or(50.0),
                "status": "active",
            }),
            _ => error_value(format!("Unknown endpoint: {}", endpoint)),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiBackend for MockBackend {
    async fn call(&self, endpoint: &str, method: Method, params: Params) -> Value {
        debug!("Mock API call: {} {}", method, endpoint);

        let response = self.respond(endpoint, &params);
        lock(&self.calls).push(RecordedCall {
            endpoint: endpoint.to_string(),
            method,
            params,
        });
        response
    }
}

fn search_listings(rng: &mut StdRng, params: &Params) -> Value {
    let dr_min = params
        .get("dr_min")
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(DEFAULT_DR_MIN);
    let price_cap = f64_param(params, "price_max")
        .filter(|p| *p != 0.0)
        .unwrap_or(DEFAULT_PRICE_CAP);

    let count = rng.gen_range(3..=8);
    let listings: Vec<Value> = (0..count)
        .map(|_| {
            let dr = dr_min + rng.gen_range(0..=30);
            let price = price_cap.min(dr as f64 * rng.gen_range(0.5..1.5));
            json!({
                "listing_id": format!("lst_{}", random_id(rng, 8)),
                "source_url": format!(
                    "https://example{}.com/blog/post-{}",
                    rng.gen_range(1..=999),
                    rng.gen_range(1..=100)
                ),
                "dr_bucket": dr,
                "price_usd": price,
                "anchor": format!("sample anchor text {}", rng.gen_range(1..=100)),
            })
        })
        .collect();

    Value::Array(listings)
}

/// Spam risk bucket for a 1-10 score
pub fn risk_level(score: u32) -> &'static str {
    match score {
        0..=3 => "Low",
        4..=6 => "Medium",
        _ => "High",
    }
}

fn str_param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

fn f64_param(params: &Params, key: &str) -> Option<f64> {
    params.get(key).and_then(Value::as_f64)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
