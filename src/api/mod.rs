//! Blocking client for the production backend.

pub mod endpoints;
mod fallback;

pub use fallback::{fetch_with_fallback, Fetched};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use ureq::typestate::WithoutBody;
use ureq::{Agent, RequestBuilder};

use crate::config::ApiSettings;
use crate::error::{ReportError, Result};
use crate::metrics::{parse_list, parse_section, MetricsBundle};
use crate::report::FilterSelection;

/// Largest PDF the client will accept from the report endpoint.
const MAX_DOWNLOAD_BYTES: u64 = 64 * 1024 * 1024;

pub struct ApiClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(settings.timeout_secs)))
            .build()
            .into();

        let token = Some(settings.token.trim().to_string()).filter(|t| !t.is_empty());

        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, path: &str, params: &[(&str, String)]) -> RequestBuilder<WithoutBody> {
        let mut request = self.agent.get(self.url(path));
        for (key, value) in params {
            request = request.query(key, value);
        }
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// `GET <path>(params)` decoded as JSON.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        tracing::debug!(path, ?params, "GET");

        let body = self
            .request(path, params)
            .call()
            .and_then(|mut response| response.body_mut().read_to_string())
            .map_err(|e| ReportError::Http {
                endpoint: path.to_string(),
                source: e,
            })?;

        serde_json::from_str(&body).map_err(|e| ReportError::Decode {
            endpoint: path.to_string(),
            source: e,
        })
    }

    /// `GET <path>(params)` with fallback to `T::default()`.
    pub fn get_or_default<T>(&self, path: &str, params: &[(&str, String)]) -> Fetched<T>
    where
        T: DeserializeOwned + Default,
    {
        fetch_with_fallback(path, self.get_json(path, params))
    }

    /// Raw bytes of an authenticated binary endpoint. Non-success statuses
    /// are errors.
    pub fn download(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<u8>> {
        if self.token.is_none() {
            return Err(ReportError::MissingToken);
        }
        tracing::debug!(path, ?params, "GET (binary)");

        let mut response = self.request(path, params).call().map_err(|e| match e {
            ureq::Error::StatusCode(code) => ReportError::Download {
                endpoint: path.to_string(),
                reason: format!("server responded with status {code}"),
            },
            other => ReportError::Http {
                endpoint: path.to_string(),
                source: other,
            },
        })?;

        response
            .body_mut()
            .with_config()
            .limit(MAX_DOWNLOAD_BYTES)
            .read_to_vec()
            .map_err(|e| ReportError::Http {
                endpoint: path.to_string(),
                source: e,
            })
    }

    /// Fetch every payload a report needs. Each endpoint degrades to its
    /// zero value on its own; the names of the ones that did are returned.
    pub fn fetch_metrics_bundle(&self, filters: &FilterSelection) -> (MetricsBundle, Vec<String>) {
        let params = filters.query_params();
        let mut degraded = Vec::new();

        let mut fetch = |path: &str| -> Value {
            let fetched = self.get_or_default::<Value>(path, &params);
            if fetched.is_fallback() {
                degraded.push(path.to_string());
            }
            fetched.into_value()
        };

        let overview = fetch(endpoints::PRODUCTION_OVERVIEW);
        let alkansya = fetch(endpoints::ALKANSYA_DATA);
        let made_to_order = fetch(endpoints::MADE_TO_ORDER_DATA);
        let output = fetch(endpoints::OUTPUT_ANALYTICS);
        let products = fetch(endpoints::PRODUCTS);

        let bundle = MetricsBundle {
            overview: parse_section("overview", Some(&overview)),
            alkansya: parse_section("alkansya", Some(&alkansya)),
            made_to_order: parse_section("made_to_order", Some(&made_to_order)),
            output: parse_section("output", Some(&output)),
            products: parse_list("products", Some(&products)),
        };

        (bundle, degraded)
    }
}
