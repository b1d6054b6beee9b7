use crate::prelude::*;

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct StatsResponse {
    stats: RawSample,
}

/// HTTP client for the stats API of the Xtend indoor unit.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    url: String,
}

impl Client {
    pub fn new(unit: &config::Unit, catalog: &Catalog) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(unit.timeout()))
            .build()?;

        // one request covers every catalog field
        let url = format!(
            "{}/api/stats/values?fields={}",
            unit.host().trim_end_matches('/'),
            catalog.query_fields()
        );

        Ok(Self { http, url })
    }

    /// Fetch one sample of every catalog field.
    ///
    /// Any transport problem (timeout, non-2xx status, malformed payload)
    /// fails the whole fetch; callers abandon the cycle and retry on the
    /// next tick.
    pub async fn fetch(&self) -> Result<RawSample> {
        trace!("GET {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|err| file_error_with_source!(err, "request to indoor unit failed"))?;

        if !response.status().is_success() {
            bail!("indoor unit returned HTTP {}", response.status());
        }

        let parsed: StatsResponse = response
            .json()
            .await
            .map_err(|err| file_error_with_source!(err, "malformed stats payload"))?;

        Ok(parsed.stats)
    }
}
