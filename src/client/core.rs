// File: src/client/core.rs
use crate::client::middleware::{DefaultHeadersLayer, DefaultHeadersService};
use crate::model::RemoteArticle;

use http::header::{ACCEPT, LINK, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method, Request, StatusCode, Uri};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::auth::AddAuthorization;

type HttpsClient = AddAuthorization<
    DefaultHeadersService<
        Client<
            hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
            String,
        >,
    >,
>;

/// Fatal failures of the remote fetch phase.
///
/// Any of these aborts the whole run: the catalog must be complete and
/// authoritative, a partial one would fabricate ORPHANED verdicts.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("protocol error for {url}: {message}")]
    Protocol { url: String, message: String },
}

/// Token-authenticated client for the remote article catalog.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    service: HttpsClient,
    base_url: String,
    timeout: Duration,
}

impl CatalogClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, FetchError> {
        // Fail fast on a malformed endpoint instead of at the first page.
        base_url
            .parse::<Uri>()
            .map_err(|e| FetchError::Protocol {
                url: base_url.to_string(),
                message: format!("invalid api url: {}", e),
            })?;

        if HeaderValue::from_str(&format!("Bearer {}", token)).is_err() {
            return Err(FetchError::Auth(
                "token contains characters that are not valid in an Authorization header"
                    .to_string(),
            ));
        }

        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() {
            // Plain-http endpoints still work; TLS handshakes will fail later.
            log::warn!("no usable system certificates found");
        }
        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http_client = Client::builder(TokioExecutor::new()).build(https_connector);
        let decorated = ServiceBuilder::new()
            .layer(DefaultHeadersLayer::new(vec![
                (
                    USER_AGENT,
                    HeaderValue::from_static(concat!("pubcheck/", env!("CARGO_PKG_VERSION"))),
                ),
                (ACCEPT, HeaderValue::from_static("application/json")),
            ]))
            .service(http_client);
        let service = AddAuthorization::bearer(decorated, token);

        Ok(Self {
            service,
            base_url: base_url.to_string(),
            timeout,
        })
    }

    /// Retrieve the complete remote catalog, following the `Link` header's
    /// `rel="next"` URL until the service stops providing one. An empty
    /// page also terminates the walk.
    pub async fn fetch_catalog(&self) -> Result<Vec<RemoteArticle>, FetchError> {
        let mut articles = Vec::new();
        let mut next = Some(self.base_url.clone());

        while let Some(url) = next.take() {
            log::info!("GET {}", url);
            let (parts, body) = self.get(&url).await?;

            match parts.status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    return Err(FetchError::Auth(format!(
                        "remote service returned {} for {}",
                        parts.status, url
                    )));
                }
                status if !status.is_success() => {
                    return Err(FetchError::Protocol {
                        url,
                        message: format!("unexpected status {}", status),
                    });
                }
                _ => {}
            }

            let page: Vec<RemoteArticle> =
                serde_json::from_slice(&body).map_err(|e| FetchError::Protocol {
                    url: url.clone(),
                    message: format!("undecodable catalog page: {}", e),
                })?;

            if let Some(n) = next_page_url(&parts.headers) {
                // A page pointing at itself would never terminate.
                if n == url {
                    return Err(FetchError::Protocol {
                        url,
                        message: "pagination loop: page links to itself".to_string(),
                    });
                }
                next = Some(n);
            }

            if page.is_empty() {
                break;
            }
            articles.extend(page);
        }

        Ok(articles)
    }

    /// One GET with the overall request timeout applied to the full
    /// request-and-read cycle. Timeouts are transport failures.
    async fn get(&self, url: &str) -> Result<(http::response::Parts, Vec<u8>), FetchError> {
        let uri: Uri = url.parse().map_err(|e| FetchError::Protocol {
            url: url.to_string(),
            message: format!("invalid page url: {}", e),
        })?;
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(String::new())
            .map_err(|e| FetchError::Protocol {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let owned_url = url.to_string();
        let service = self.service.clone();
        let fetch = async move {
            let response = service
                .oneshot(request)
                .await
                .map_err(|e| FetchError::Transport {
                    url: owned_url.clone(),
                    message: e.to_string(),
                })?;
            let (parts, body) = response.into_parts();
            let bytes = body
                .collect()
                .await
                .map_err(|e| FetchError::Transport {
                    url: owned_url.clone(),
                    message: format!("failed reading response body: {}", e),
                })?
                .to_bytes();
            Ok((parts, bytes.to_vec()))
        };

        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Transport {
                url: url.to_string(),
                message: format!("request timed out after {}s", self.timeout.as_secs()),
            }),
        }
    }
}

/// Extract the `rel="next"` URL from a `Link` response header, if any.
///
/// The header looks like:
///   <https://host/items?page=1>; rel="first",
///   <https://host/items?page=2>; rel="next",
///   <https://host/items?page=4>; rel="last"
fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    for part in link.split(',') {
        if part.contains("rel=\"next\"") {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            if start < end {
                return Some(part[start..end].to_string());
            }
        }
    }
    None
}
