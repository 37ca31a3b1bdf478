//! Fetching the card list from the dashboard REST API.

use anyhow::{bail, Context, Result};
use cardcycle_ingest::{parse_accounts_json, AccountRecord};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use tracing::info;

use crate::config::Config;

pub fn credit_cards_url(base_url: &str) -> String {
    format!("{}/financial/credit-cards/", base_url.trim_end_matches('/'))
}

pub async fn fetch_account_records(cfg: &Config) -> Result<Vec<AccountRecord>> {
    let url = credit_cards_url(&cfg.api.base_url);

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(token) = cfg.api_token() {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
    }

    info!(%url, "fetching credit cards");
    let resp = reqwest::Client::new()
        .get(&url)
        .headers(headers)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;

    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        bail!("API rejected the token ({status}); set {} or api.token", crate::config::TOKEN_ENV);
    }
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("API error: {status} {txt}");
    }

    let body = resp.text().await.context("read credit card response")?;
    parse_accounts_json(&body).context("parse credit card response")
}
