// Hand-crafted async HTTP client for the Storefront GraphQL API.
//
// Endpoint: {shop}/api/{version}/graphql.json
// Auth: X-Shopify-Storefront-Access-Token header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use super::types::{GraphQlRequest, GraphQlResponse};
use crate::Error;
use crate::transport::TransportConfig;

/// Header carrying the public storefront token.
pub const TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

// ── Error body shape ─────────────────────────────────────────────────

/// Non-200 responses carry `{"errors": "..."}` or `{"errors": [{message}]}`.
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Value,
}

// ── Localization ─────────────────────────────────────────────────────

/// Buyer context forwarded through `@inContext`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InContext {
    /// ISO 3166-1 alpha-2 country code, e.g. `US`.
    pub country: Option<String>,
    /// Language code, e.g. `EN`.
    pub language: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Storefront GraphQL API.
///
/// Every call is a single `POST` of `{ query, variables }`. Catalog queries
/// live in `catalog.rs`, cart queries and mutations in `cart.rs`; this
/// module only deals with transport and the `{ data, errors }` envelope.
pub struct StorefrontClient {
    http: reqwest::Client,
    endpoint: Url,
    context: InContext,
    timeout_secs: u64,
}

impl StorefrontClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a storefront access token and transport config.
    ///
    /// Injects the token header on every request, marked sensitive so it
    /// never shows up in debug output.
    pub fn from_token(
        shop_url: &str,
        api_version: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut token_value =
            HeaderValue::from_str(token.expose_secret()).map_err(|e| Error::MalformedToken {
                message: format!("invalid header value: {e}"),
            })?;
        token_value.set_sensitive(true);
        headers.insert(TOKEN_HEADER, token_value);

        let http = transport.build_client_with_headers(headers)?;
        let endpoint = Self::normalize_endpoint(shop_url, api_version)?;

        Ok(Self {
            http,
            endpoint,
            context: InContext::default(),
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(
        http: reqwest::Client,
        shop_url: &str,
        api_version: &str,
    ) -> Result<Self, Error> {
        let endpoint = Self::normalize_endpoint(shop_url, api_version)?;
        Ok(Self {
            http,
            endpoint,
            context: InContext::default(),
            timeout_secs: TransportConfig::default().timeout_secs(),
        })
    }

    /// Attach a buyer context to every subsequent request.
    pub fn with_context(mut self, context: InContext) -> Self {
        self.context = context;
        self
    }

    /// Resolved GraphQL endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build `{shop}/api/{version}/graphql.json`.
    ///
    /// A URL that already points at `graphql.json` is taken verbatim.
    fn normalize_endpoint(raw: &str, api_version: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if !path.ends_with("/graphql.json") {
            url.set_path(&format!("{path}/api/{api_version}/graphql.json"));
        }

        Ok(url)
    }

    // ── GraphQL transport ────────────────────────────────────────────

    /// Run one GraphQL document and deserialize its `data`.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        mut variables: Value,
    ) -> Result<T, Error> {
        if let Some(vars) = variables.as_object_mut() {
            vars.insert("country".into(), self.context.country.clone().into());
            vars.insert("language".into(), self.context.language.clone().into());
        }

        debug!("POST {} ({operation})", self.endpoint);
        trace!(%variables, "graphql variables");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.handle_response(resp).await
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Unwrap the `{ data, errors }` envelope.
    ///
    /// `errors[]` wins over `data`: a partial response is treated as a
    /// failure, since every query here needs its whole payload.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await.map_err(|e| self.map_send_error(e))?;
        let envelope: GraphQlResponse<Value> =
            serde_json::from_str(&body).map_err(|e| deserialization(&e, &body))?;

        if !envelope.errors.is_empty() {
            return Err(Error::GraphQl {
                messages: envelope.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        let Some(data) = envelope.data else {
            return Err(Error::Deserialization {
                message: "response carried neither data nor errors".into(),
                body,
            });
        };

        serde_json::from_value(data).map_err(|e| deserialization(&e, &body))
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                return Error::InvalidToken {
                    status: status.as_u16(),
                };
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = resp
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .unwrap_or(1);
                return Error::RateLimited { retry_after_secs };
            }
            _ => {}
        }

        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|b| error_message(&b.errors))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    preview(&raw)
                }
            });

        Error::Http {
            status: status.as_u16(),
            message,
        }
    }
}

fn deserialization(err: &serde_json::Error, body: &str) -> Error {
    Error::Deserialization {
        message: format!("{err} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    }
}

/// First 200 characters, cut on a char boundary.
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

fn error_message(errors: &Value) -> Option<String> {
    match errors {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("message").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_api_version() {
        let url = StorefrontClient::normalize_endpoint("https://shop.example.com", "2025-01").unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example.com/api/2025-01/graphql.json"
        );
    }

    #[test]
    fn endpoint_keeps_explicit_graphql_path() {
        let url = StorefrontClient::normalize_endpoint(
            "https://shop.example.com/api/2024-10/graphql.json",
            "2025-01",
        )
        .unwrap();
        assert_eq!(url.path(), "/api/2024-10/graphql.json");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let url = StorefrontClient::normalize_endpoint("http://127.0.0.1:9000/", "2025-01").unwrap();
        assert_eq!(url.path(), "/api/2025-01/graphql.json");
    }

    #[test]
    fn error_message_accepts_string_and_list() {
        assert_eq!(
            error_message(&serde_json::json!("Not Found")).as_deref(),
            Some("Not Found")
        );
        assert_eq!(
            error_message(&serde_json::json!([{ "message": "a" }, { "message": "b" }])).as_deref(),
            Some("a; b")
        );
        assert_eq!(error_message(&serde_json::json!([])), None);
    }
}
