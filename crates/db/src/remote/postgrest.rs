//! reqwest client for the PostgREST interface of the hosted database.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{RemoteError, RemoteStore, SelectQuery};

const REST_PATH: &str = "rest/v1/";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Error body PostgREST returns on failed requests.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

#[derive(Debug)]
pub struct PostgrestClient {
    http: Client,
    base_url: Url,
    api_key: SecretString,
}

impl PostgrestClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(
        base_url: Url,
        api_key: SecretString,
        timeout: Option<Duration>,
    ) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(timeout.unwrap_or(Self::DEFAULT_TIMEOUT))
            .user_agent(concat!("shiftdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    /// URL of `table` under the REST root, with the select and order parameters applied.
    pub fn table_url(&self, table: &str, query: &SelectQuery) -> Result<Url, RemoteError> {
        let mut root = self.base_url.clone();
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        let mut url = root
            .join(REST_PATH)
            .and_then(|rest| rest.join(table))
            .map_err(|e| RemoteError::Transport(format!("invalid table url: {e}")))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", &query.columns);
            if !query.order.is_empty() {
                let order = query
                    .order
                    .iter()
                    .map(|o| {
                        format!("{}.{}", o.column, if o.ascending { "asc" } else { "desc" })
                    })
                    .collect::<Vec<_>>()
                    .join(",");
                pairs.append_pair("order", &order);
            }
        }

        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.api_key.expose_secret();
        request
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(res: Response) -> Result<T, RemoteError> {
        let status = res.status();
        if status.is_success() {
            return res
                .json::<T>()
                .await
                .map_err(|e| RemoteError::Decode(e.to_string()));
        }

        let body = res.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }
}

#[async_trait]
impl RemoteStore for PostgrestClient {
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, RemoteError> {
        let url = self.table_url(table, query)?;
        let res = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        debug!(table, status = res.status().as_u16(), "select");
        Self::read_json(res).await
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError> {
        let url = self.table_url(table, &SelectQuery::all())?;
        let res = self
            .authorized(self.http.post(url))
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(&row)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        debug!(table, status = res.status().as_u16(), "insert");
        Self::read_json(res).await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout
    } else {
        RemoteError::Transport(e.to_string())
    }
}

fn error_from_response(status: StatusCode, body: &str) -> RemoteError {
    if let Ok(err) = serde_json::from_str::<PostgrestErrorBody>(body) {
        warn!(
            status = status.as_u16(),
            code = ?err.code,
            details = ?err.details,
            hint = ?err.hint,
            "service rejected request: {}",
            err.message
        );
        return RemoteError::Api {
            status: status.as_u16(),
            code: err.code,
            message: err.message,
        };
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Unauthorized,
        s => RemoteError::Http {
            status: s.as_u16(),
            body: body.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PostgrestClient {
        PostgrestClient::new(
            Url::parse(base).unwrap(),
            SecretString::from("anon-key".to_string()),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_table_url_with_order() {
        let url = client("https://example.supabase.co")
            .table_url("officers", &SelectQuery::all().order_by("name", true))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.supabase.co/rest/v1/officers?select=*&order=name.asc"
        );
    }

    #[test]
    fn test_table_url_keeps_base_path() {
        let url = client("https://gateway.local/db")
            .table_url(
                "shifts",
                &SelectQuery::all()
                    .order_by("start_time", false)
                    .order_by("id", true),
            )
            .unwrap();
        assert_eq!(url.path(), "/db/rest/v1/shifts");
        assert_eq!(
            url.query(),
            Some("select=*&order=start_time.desc%2Cid.asc")
        );
    }

    #[test]
    fn test_error_body_maps_to_api_error() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint \"officers_badge_key\"","details":null,"hint":null}"#;
        let err = error_from_response(StatusCode::CONFLICT, body);
        assert_eq!(
            err,
            RemoteError::Api {
                status: 409,
                code: Some("23505".to_string()),
                message: "duplicate key value violates unique constraint \"officers_badge_key\""
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_unauthorized_without_body() {
        let err = error_from_response(StatusCode::UNAUTHORIZED, "");
        assert_eq!(err, RemoteError::Unauthorized);
    }

    #[test]
    fn test_unrecognized_body_keeps_status() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(
            err,
            RemoteError::Http {
                status: 502,
                body: "upstream down".to_string()
            }
        );
    }
}
