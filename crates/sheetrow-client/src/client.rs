//! Row store client over reqwest

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, RowClientError};

const USER_AGENT: &str = "stockroom/0.1 (sheetrow-client)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for one row collection.
///
/// Mutating calls return the row the store reports back, so callers can
/// apply a targeted cache update instead of re-listing the collection.
#[derive(Debug, Clone)]
pub struct RowClient {
    client: Client,
    base_url: Url,
}

impl RowClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|_| RowClientError::InvalidUrl {
            url: base_url.to_string(),
        })?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Fetch the full collection.
    ///
    /// A non-array body counts as an empty collection, and rows that do
    /// not decode into `T` are skipped, not fatal; the sheet has no schema
    /// and a half-filled row must not take the whole view down.
    pub async fn list<T>(&self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        debug!(url = %self.base_url, "listing rows");
        let response = self.client.get(self.base_url.clone()).send().await?;
        let body = read_json_body(response).await?;
        Ok(decode_rows(body))
    }

    /// Append one row. Returns the stored row as the service reports it,
    /// falling back to an echo of the sent row when the body is empty.
    pub async fn insert<T>(&self, row: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        debug!(url = %self.base_url, "inserting row");
        let response = self
            .client
            .post(self.base_url.clone())
            .json(row)
            .send()
            .await?;
        let body = read_json_body(response).await?;
        Ok(decode_returned_row(body).unwrap_or_else(|| row.clone()))
    }

    /// Replace the row(s) where `key_field` equals `key_value` with the
    /// given full record. Same return contract as [`insert`](Self::insert).
    pub async fn replace<T>(&self, key_field: &str, key_value: &str, row: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let url = self.keyed_url(key_field, key_value)?;
        debug!(%url, "replacing row");
        let response = self.client.put(url).json(row).send().await?;
        let body = read_json_body(response).await?;
        Ok(decode_returned_row(body).unwrap_or_else(|| row.clone()))
    }

    /// Delete the row(s) where `key_field` equals `key_value`.
    pub async fn delete(&self, key_field: &str, key_value: &str) -> Result<()> {
        let url = self.keyed_url(key_field, key_value)?;
        debug!(%url, "deleting row");
        let response = self.client.delete(url).send().await?;
        read_json_body(response).await.map(|_| ())
    }

    /// `{base}/{key_field}/{key_value}`, with both segments percent-encoded.
    fn keyed_url(&self, key_field: &str, key_value: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RowClientError::InvalidUrl {
                url: self.base_url.to_string(),
            })?
            .push(key_field)
            .push(key_value);
        Ok(url)
    }
}

/// Check the status and parse the body as JSON. An empty body is `Null`.
async fn read_json_body(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(RowClientError::Status {
            code: status.as_u16(),
        });
    }

    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| RowClientError::Parse {
        message: e.to_string(),
    })
}

/// Decode a list body. Non-arrays are an empty collection.
fn decode_rows<T>(body: Value) -> Vec<T>
where
    T: DeserializeOwned,
{
    let Value::Array(rows) = body else {
        return Vec::new();
    };

    let total = rows.len();
    let decoded: Vec<T> = rows
        .into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect();

    if decoded.len() < total {
        warn!(
            skipped = total - decoded.len(),
            total, "skipped rows that did not match the record shape"
        );
    }
    decoded
}

/// Decode the row a mutating call reports back. The service answers with
/// either the stored object or a one-element array wrapping it.
fn decode_returned_row<T>(body: Value) -> Option<T>
where
    T: DeserializeOwned,
{
    match body {
        Value::Object(_) => serde_json::from_value(body).ok(),
        Value::Array(mut rows) if rows.len() == 1 => {
            serde_json::from_value(rows.remove(0)).ok()
        }
        _ => None,
    }
}
