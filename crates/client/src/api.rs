//! HTTP bindings for the order/catalog API.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use atelier_auth::{Permission, Session, authorize};
use atelier_catalog::{Catalog, ComponentKind, Pillow, PillowDraft, PricedComponent};
use atelier_core::SaleId;
use atelier_sales::{Sale, SaleDraft};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Client for the remote API.
///
/// Reads are anonymous; every write checks the session's role locally and
/// sends its bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET /item`, `/material`, `/case` or `/service`; each record is tagged
    /// with the kind it was fetched as.
    pub async fn list_components(
        &self,
        kind: ComponentKind,
    ) -> Result<Vec<PricedComponent>, ClientError> {
        let components: Vec<PricedComponent> = self.get_records(kind.endpoint()).await?;
        Ok(components
            .into_iter()
            .map(|component| component.with_kind(kind))
            .collect())
    }

    /// All four component collections.
    pub async fn catalog(&self) -> Result<Catalog, ClientError> {
        let mut catalog = Catalog::default();
        for kind in ComponentKind::ALL {
            catalog.set_kind(kind, self.list_components(kind).await?);
        }
        Ok(catalog)
    }

    /// `GET /pillow`.
    pub async fn list_pillows(&self) -> Result<Vec<Pillow>, ClientError> {
        self.get_records("pillow").await
    }

    /// `POST /pillow`: create, or update when the draft carries an id.
    pub async fn save_pillow(
        &self,
        session: &Session,
        draft: &PillowDraft,
    ) -> Result<Pillow, ClientError> {
        authorize(session, &Permission::CATALOG_WRITE)?;
        draft.validate()?;

        tracing::info!(
            name = %draft.name,
            update = draft.is_update(),
            "saving finished-goods entry"
        );
        let resp = self
            .http
            .post(self.config.url("pillow"))
            .bearer_auth(session.token())
            .json(draft)
            .send()
            .await?;
        let resp = Self::ensure_success(resp).await?;
        Self::decode(resp).await
    }

    /// `GET /sale`: full order history.
    pub async fn list_sales(&self) -> Result<Vec<Sale>, ClientError> {
        self.get_records("sale").await
    }

    /// `GET /sale/debts`: sales the API considers not fully paid.
    pub async fn list_debts(&self) -> Result<Vec<Sale>, ClientError> {
        self.get_records("sale/debts").await
    }

    /// `POST /sale`.
    ///
    /// Returns the recorded sale when the API echoes one back.
    pub async fn create_sale(
        &self,
        session: &Session,
        draft: &SaleDraft,
    ) -> Result<Option<Sale>, ClientError> {
        authorize(session, &Permission::SALES_CREATE)?;
        draft.validate()?;

        tracing::info!(
            client = %draft.client,
            lines = draft.orders.len(),
            total = draft.total,
            received = draft.received,
            "recording sale"
        );
        let resp = self
            .http
            .post(self.config.url("sale"))
            .bearer_auth(session.token())
            .json(draft)
            .send()
            .await?;
        let resp = Self::ensure_success(resp).await?;
        let body = resp.text().await?;
        Ok(serde_json::from_str::<Sale>(&body).ok())
    }

    /// `DELETE /sale?_id=...` (admin only).
    pub async fn delete_sale(&self, session: &Session, id: &SaleId) -> Result<(), ClientError> {
        authorize(session, &Permission::SALES_DELETE)?;

        tracing::info!(sale_id = %id, "deleting sale");
        let resp = self
            .http
            .delete(self.config.url("sale"))
            .query(&[("_id", id.as_str())])
            .bearer_auth(session.token())
            .send()
            .await?;
        Self::ensure_success(resp).await?;
        Ok(())
    }

    /// Fetch a collection. The body must be a JSON array; a record that does
    /// not decode is logged and skipped so one bad row cannot hide the rest.
    async fn get_records<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let url = self.config.url(path);
        tracing::debug!(%url, "fetching");
        let resp = self.http.get(&url).send().await?;
        let resp = Self::ensure_success(resp).await?;
        let rows: Vec<serde_json::Value> = Self::decode(resp).await?;
        Ok(decode_rows(path, rows))
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn ensure_success(resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "API request failed");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized(
                format!("API refused the request ({}): {}", status.as_u16(), body),
            )),
            _ => Err(ClientError::Api(status.as_u16(), body)),
        }
    }
}

fn decode_rows<T: DeserializeOwned>(path: &str, rows: Vec<serde_json::Value>) -> Vec<T> {
    let total = rows.len();
    let records: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(path, index, error = %err, "skipping malformed record");
                None
            }
        })
        .collect();
    if records.len() < total {
        tracing::warn!(path, skipped = total - records.len(), total, "some records were skipped");
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_rows_are_skipped() {
        let rows = vec![
            json!({"name": "Dana", "createdAt": "2024-01-03T08:00:00Z", "total": 500}),
            json!({"name": "No date", "total": 100}),
            json!({"name": "Bad date", "createdAt": "yesterday"}),
        ];
        let sales: Vec<Sale> = decode_rows("sale", rows);
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].name, "Dana");
    }
}
