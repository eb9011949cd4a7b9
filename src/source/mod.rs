// src/source/mod.rs — Trip plan document source (Google Sheets CSV export)

use crate::infra::errors::TabijiError;

pub struct SheetClient {
    client: reqwest::Client,
    base_url: String,
}

impl SheetClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://docs.google.com/spreadsheets/d".into(),
        }
    }

    /// Override the endpoint; used by tests against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the CSV export of a sheet.
    ///
    /// 404 means the sheet does not exist or was never shared publicly —
    /// reported as such. Any other non-success status surfaces the status
    /// text.
    pub async fn fetch_csv(&self, sheet_id: &str) -> Result<String, TabijiError> {
        let url = format!("{}/{}/export?format=csv", self.base_url, sheet_id);

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| TabijiError::SourceUnavailable {
                    message: e.to_string(),
                })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TabijiError::SourceUnavailable {
                message: "Sheet not found. Check the ID and ensure it is public.".into(),
            });
        }
        if !status.is_success() {
            return Err(TabijiError::SourceUnavailable {
                message: format!(
                    "Failed to fetch sheet: {}",
                    status.canonical_reason().unwrap_or(status.as_str())
                ),
            });
        }

        response
            .text()
            .await
            .map_err(|e| TabijiError::SourceUnavailable {
                message: e.to_string(),
            })
    }
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new()
    }
}
