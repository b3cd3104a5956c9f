//! HTTP clients for the admin API.

use async_trait::async_trait;
use gloo_net::http::Request;
use log::{debug, warn};
use serde::Deserialize;

use common::error::{CategoryFetchError, SaveError};
use common::form::{CategoryDirectory, RecordStore};
use common::model::category::Category;
use common::model::kind::RecordKind;
use common::model::payload::CreatePayload;

/// Creates stories and categories with a JSON `POST`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRecordStore {
    api_base: String,
}

impl HttpRecordStore {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }

    fn endpoint(&self, kind: RecordKind) -> String {
        match kind {
            RecordKind::Story => format!("{}/verhalen", self.api_base),
            RecordKind::Category => format!("{}/categories", self.api_base),
        }
    }
}

#[async_trait(?Send)]
impl RecordStore for HttpRecordStore {
    async fn save(&self, payload: &CreatePayload) -> Result<(), SaveError> {
        let url = self.endpoint(payload.kind());
        let response = Request::post(&url)
            .json(payload)
            .map_err(|e| SaveError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| SaveError::Transport(e.to_string()))?;

        if response.ok() {
            debug!("POST {url} answered {}", response.status());
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!("POST {url} answered {status}");
        Err(rejection(status, &body))
    }
}

/// Lists categories with `GET {base}/categories`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpCategoryDirectory {
    api_base: String,
}

impl HttpCategoryDirectory {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }
}

#[async_trait(?Send)]
impl CategoryDirectory for HttpCategoryDirectory {
    async fn list_all(&self) -> Result<Vec<Category>, CategoryFetchError> {
        let url = format!("{}/categories", self.api_base);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| CategoryFetchError(e.to_string()))?;

        if !response.ok() {
            return Err(CategoryFetchError(format!(
                "GET {url} answered {}",
                response.status()
            )));
        }
        response
            .json::<Vec<Category>>()
            .await
            .map_err(|e| CategoryFetchError(e.to_string()))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Keeps the API's own explanation when the body carries one.
fn rejection(status: u16, body: &str) -> SaveError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error.or(body.message))
        .unwrap_or_default();
    SaveError::Rejected { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_per_kind() {
        let store = HttpRecordStore::new("/api/admin");
        assert_eq!(store.endpoint(RecordKind::Story), "/api/admin/verhalen");
        assert_eq!(store.endpoint(RecordKind::Category), "/api/admin/categories");
    }

    #[test]
    fn error_body_message_is_kept() {
        let err = rejection(409, r#"{"error":"Titel bestaat al"}"#);
        assert_eq!(err.user_message(), Some("Titel bestaat al"));
    }

    #[test]
    fn non_json_error_body_falls_back_to_generic() {
        let err = rejection(502, "<html>Bad Gateway</html>");
        assert_eq!(
            err,
            SaveError::Rejected {
                status: 502,
                message: String::new()
            }
        );
        assert_eq!(err.user_message(), None);
    }
}
