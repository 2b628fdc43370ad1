//! Blocking client for the hosting API
//!
//! Wraps a `reqwest` blocking client with the two call shapes the commands
//! need: a GraphQL query and a REST request with a JSON body. Non-success
//! statuses become [`RepoKitError::Api`] with the server's `message` field.

use crate::error::{RepoKitError, Result};
use crate::models::{normalize_host, DEFAULT_HOST, DEFAULT_TIMEOUT_SECS};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const USER_AGENT: &str = concat!("repokit/", env!("CARGO_PKG_VERSION"));

/// Where and how to reach the API for one host
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    /// Hostname the settings were derived for
    pub host: String,
    /// REST base URL, without trailing slash
    pub rest_url: String,
    /// GraphQL endpoint
    pub graphql_url: String,
    /// Bearer token, if one is known
    pub token: Option<String>,
    /// Timeout applied to every request
    pub timeout: Duration,
}

impl ClientSettings {
    /// Settings with the endpoints a host serves by default.
    ///
    /// `github.com` is served from `api.github.com`; any other host is
    /// treated as an enterprise server with `/api/v3` and `/api/graphql`.
    pub fn for_host(host: &str) -> Self {
        let host = normalize_host(host);
        let (rest_url, graphql_url) = if host == DEFAULT_HOST {
            (
                "https://api.github.com".to_string(),
                "https://api.github.com/graphql".to_string(),
            )
        } else {
            (
                format!("https://{}/api/v3", host),
                format!("https://{}/api/graphql", host),
            )
        };

        Self {
            host,
            rest_url,
            graphql_url,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point both endpoints at a single base URL (GraphQL at `{base}/graphql`)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.rest_url = base.to_string();
        self.graphql_url = format!("{}/graphql", base);
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorItem>,
}

#[derive(Deserialize)]
struct GraphQlErrorItem {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    message: String,
}

#[derive(Deserialize)]
struct RestErrorBody {
    message: Option<String>,
}

/// HTTP client bound to one host's API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    settings: ClientSettings,
}

impl ApiClient {
    /// Build a client. No request is made.
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { http, settings })
    }

    /// Run a GraphQL query and decode its `data` member.
    ///
    /// Entries in the `errors` array fail the call even when `data` is
    /// partially present.
    pub fn graphql<V, T>(&self, query: &str, variables: V) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        tracing::trace!(query = query_name(query), "graphql query");

        let request = self
            .http
            .post(&self.settings.graphql_url)
            .json(&GraphQlRequest { query, variables });
        let response = self.send(request)?;

        let body: GraphQlResponse<T> = response.json()?;
        if !body.errors.is_empty() {
            let messages: Vec<String> = body
                .errors
                .into_iter()
                .map(|e| match e.kind {
                    Some(kind) if kind != "NOT_FOUND" => format!("{} ({})", e.message, kind),
                    _ => e.message,
                })
                .collect();
            return Err(RepoKitError::GraphQl(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| RepoKitError::GraphQl("response contained no data".to_string()))
    }

    /// Send a REST request with a JSON body to `path` under the REST base URL.
    ///
    /// Any 2xx status is accepted; the response is returned for callers that
    /// want the body.
    pub fn rest<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let url = format!(
            "{}/{}",
            self.settings.rest_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self.send(self.http.request(method, url).json(body))
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match &self.settings.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let request = request.build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.http.execute(request)?;
        tracing::debug!(status = %response.status(), "received response");

        ensure_success(response)
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<RestErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    Err(RepoKitError::Api {
        status: status.as_u16(),
        message,
        url,
    })
}

/// Operation name of a GraphQL document (`query Name(...)` -> `Name`)
fn query_name(query: &str) -> &str {
    query
        .split_whitespace()
        .nth(1)
        .and_then(|word| word.split(['(', '{']).next())
        .unwrap_or("anonymous")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::Server) -> ApiClient {
        let settings = ClientSettings::for_host("github.com")
            .with_base_url(&server.url())
            .with_token(Some("secret".to_string()));
        ApiClient::new(settings).unwrap()
    }

    #[test]
    fn test_settings_for_github() {
        let settings = ClientSettings::for_host("github.com");
        assert_eq!(settings.rest_url, "https://api.github.com");
        assert_eq!(settings.graphql_url, "https://api.github.com/graphql");
        assert!(settings.token.is_none());
    }

    #[test]
    fn test_settings_for_enterprise() {
        let settings = ClientSettings::for_host("GHE.local");
        assert_eq!(settings.host, "ghe.local");
        assert_eq!(settings.rest_url, "https://ghe.local/api/v3");
        assert_eq!(settings.graphql_url, "https://ghe.local/api/graphql");
    }

    #[test]
    fn test_settings_base_url_override() {
        let settings =
            ClientSettings::for_host("github.com").with_base_url("http://localhost:1234/");
        assert_eq!(settings.rest_url, "http://localhost:1234");
        assert_eq!(settings.graphql_url, "http://localhost:1234/graphql");
    }

    #[test]
    fn test_empty_token_is_dropped() {
        let settings = ClientSettings::for_host("github.com").with_token(Some(String::new()));
        assert!(settings.token.is_none());
    }

    #[test]
    fn test_query_name() {
        assert_eq!(
            query_name("query RepositoryInfo($owner: String!) { x }"),
            "RepositoryInfo"
        );
        assert_eq!(query_name("query Viewer{ viewer { login } }"), "Viewer");
        assert_eq!(query_name("{ viewer }"), "viewer");
    }

    #[test]
    fn test_graphql_sends_auth_and_decodes_data() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/graphql")
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::PartialJson(json!({"variables": {"login": "me"}})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"viewer":{"login":"me"}}}"#)
            .create();

        let client = client_for(&server);
        let data: serde_json::Value = client
            .graphql("query Viewer { viewer { login } }", json!({"login": "me"}))
            .unwrap();

        mock.assert();
        assert_eq!(data["viewer"]["login"], "me");
    }

    #[test]
    fn test_graphql_errors_fail_the_call() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(
                r#"{"data":null,"errors":[{"type":"FORBIDDEN","message":"Resource not accessible"}]}"#,
            )
            .create();

        let client = client_for(&server);
        let err = client
            .graphql::<_, serde_json::Value>("query X { x }", json!({}))
            .unwrap_err();

        assert!(matches!(err, RepoKitError::GraphQl(_)));
        assert_eq!(err.to_string(), "GraphQL: Resource not accessible (FORBIDDEN)");
    }

    #[test]
    fn test_rest_error_uses_message_field() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("PATCH", "/repos/o/r")
            .with_status(422)
            .with_body(r#"{"message":"Validation Failed"}"#)
            .create();

        let client = client_for(&server);
        let err = client
            .rest(Method::PATCH, "repos/o/r", &json!({"name": "x"}))
            .unwrap_err();

        match err {
            RepoKitError::Api {
                status,
                message,
                url,
            } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Validation Failed");
                assert!(url.ends_with("/repos/o/r"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rest_error_without_json_body() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("PATCH", "/repos/o/r").with_status(502).create();

        let client = client_for(&server);
        let err = client
            .rest(Method::PATCH, "/repos/o/r", &json!({}))
            .unwrap_err();

        assert_eq!(err.status(), Some(502));
        assert!(err.to_string().starts_with("HTTP 502: Bad Gateway"));
    }
}
