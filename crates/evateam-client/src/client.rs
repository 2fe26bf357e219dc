//! Main client implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{
    CommentsApi, DocumentsApi, EpicsApi, ListsApi, PersonsApi, ProjectsApi, StatsApi,
    StatusHistoryApi, TaskLinksApi, TasksApi, TimeLogsApi,
};
use crate::config::ClientConfig;
use crate::entity::{Entity, FieldDefaults, Projection};
use crate::error::{Error, Result};
use crate::hooks::{Logger, Metrics, TracingLogger};
use crate::query::{Kwargs, QueryBuilder};
use crate::rpc::{RpcRequest, RpcResponse, decode_response};

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// EVA Team API client.
///
/// Cheap to clone; clones share the HTTP connection pool and hooks.
///
/// # Example
///
/// ```no_run
/// use evateam_client::{Entity, EvaClient, Predicate, QueryBuilder};
///
/// # async fn example() -> evateam_client::Result<()> {
/// let client = EvaClient::builder()
///     .base_url("https://eva.example.com")
///     .api_token("secret")
///     .build()?;
///
/// let open = QueryBuilder::new()
///     .from(Entity::Task)
///     .filter(Predicate::eq("cache_status_type", "OPEN"))
///     .order_by(["-priority"])
///     .limit(50);
/// let tasks = client.tasks().list(open).await?;
/// println!("{} open tasks", tasks.result.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EvaClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
struct ClientInner {
    http: reqwest::Client,
    /// `<base_url>/api/`
    endpoint: Url,
    /// Host label reported to metrics.
    host: String,
    timeout: Duration,
    debug: bool,
    logger: Option<Arc<dyn Logger>>,
    metrics: Option<Arc<dyn Metrics>>,
    defaults: FieldDefaults,
}

/// What was exchanged on the wire, kept for the hooks.
#[derive(Default)]
struct Exchange {
    status: u16,
    request_body: Vec<u8>,
    response_body: Vec<u8>,
}

impl EvaClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client from `EVA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        ClientConfig::from_env()?.builder().build()
    }

    /// RPC endpoint all calls are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Whether debug logging is on.
    pub fn is_debug(&self) -> bool {
        self.inner.debug
    }

    /// Default projections used by the façades.
    pub fn field_defaults(&self) -> &FieldDefaults {
        &self.inner.defaults
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entity façades
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the tasks API.
    pub fn tasks(&self) -> TasksApi {
        TasksApi::new(self.clone())
    }

    /// Access the projects API.
    pub fn projects(&self) -> ProjectsApi {
        ProjectsApi::new(self.clone())
    }

    /// Access the persons API.
    pub fn persons(&self) -> PersonsApi {
        PersonsApi::new(self.clone())
    }

    /// Access the documents API.
    pub fn documents(&self) -> DocumentsApi {
        DocumentsApi::new(self.clone())
    }

    /// Access the comments API.
    pub fn comments(&self) -> CommentsApi {
        CommentsApi::new(self.clone())
    }

    /// Access the sprints and releases API.
    pub fn lists(&self) -> ListsApi {
        ListsApi::new(self.clone())
    }

    /// Access the epics API.
    pub fn epics(&self) -> EpicsApi {
        EpicsApi::new(self.clone())
    }

    /// Access the time logs API.
    pub fn time_logs(&self) -> TimeLogsApi {
        TimeLogsApi::new(self.clone())
    }

    /// Access the status history API.
    pub fn status_history(&self) -> StatusHistoryApi {
        StatusHistoryApi::new(self.clone())
    }

    /// Access the task links API.
    pub fn task_links(&self) -> TaskLinksApi {
        TaskLinksApi::new(self.clone())
    }

    /// Access the statistics API.
    pub fn stats(&self) -> StatsApi {
        StatsApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Call `method` with `kwargs` and decode the result as `T`.
    ///
    /// `call_site` labels the caller in metrics and debug logs.
    pub async fn call<T: DeserializeOwned>(
        &self,
        call_site: &str,
        method: impl Into<String>,
        kwargs: Kwargs,
    ) -> Result<RpcResponse<T>> {
        self.send(call_site, &RpcRequest::new(method, kwargs)).await
    }

    /// Run a list query built with [`QueryBuilder`].
    pub async fn query<T: DeserializeOwned>(
        &self,
        call_site: &str,
        query: &QueryBuilder,
    ) -> Result<RpcResponse<T>> {
        let method = query.to_method()?;
        self.call(call_site, method, query.to_kwargs()).await
    }

    /// Send a prepared request.
    ///
    /// Exactly one HTTP request is made. Metrics are recorded whatever the
    /// outcome; the logger only sees the call in debug mode.
    pub async fn send<T: DeserializeOwned>(
        &self,
        call_site: &str,
        request: &RpcRequest,
    ) -> Result<RpcResponse<T>> {
        let start = Instant::now();
        let mut exchange = Exchange::default();

        let result = self.exchange(request, &mut exchange).await;

        self.observe(call_site, request, &exchange, start.elapsed(), result.as_ref().err());
        result
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        request: &RpcRequest,
        exchange: &mut Exchange,
    ) -> Result<RpcResponse<T>> {
        exchange.request_body = request.to_bytes()?;

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .body(exchange.request_body.clone())
            .timeout(self.inner.timeout)
            .send()
            .await?;

        let status = response.status();
        exchange.status = status.as_u16();
        exchange.response_body = response.bytes().await?.to_vec();

        if !status.is_success() {
            return Err(Error::Status {
                status: exchange.status,
                body: String::from_utf8_lossy(&exchange.response_body).into_owned(),
            });
        }

        decode_response(&exchange.response_body)
    }

    fn observe(
        &self,
        call_site: &str,
        request: &RpcRequest,
        exchange: &Exchange,
        elapsed: Duration,
        error: Option<&Error>,
    ) {
        tracing::trace!(
            method = %request.method,
            callid = %request.callid,
            status = exchange.status,
            elapsed_ms = elapsed.as_millis() as u64,
            "rpc call finished"
        );

        if let Some(metrics) = &self.inner.metrics {
            metrics.record_request_duration(
                exchange.status,
                &request.method,
                &self.inner.host,
                call_site,
                elapsed.as_secs_f64(),
            );
        }

        if !self.inner.debug {
            return;
        }
        if let Some(logger) = &self.inner.logger {
            logger.debug(
                "Request",
                &[
                    ("method", request.method.clone()),
                    ("url", self.inner.endpoint.to_string()),
                    ("func", call_site.to_string()),
                    (
                        "requestBody",
                        String::from_utf8_lossy(&exchange.request_body).into_owned(),
                    ),
                    (
                        "responseBody",
                        String::from_utf8_lossy(&exchange.response_body).into_owned(),
                    ),
                    ("responseStatus", exchange.status.to_string()),
                    ("duration", format!("{:?}", elapsed)),
                    (
                        "error",
                        error.map(ToString::to_string).unwrap_or_default(),
                    ),
                ],
            );
        }
    }
}

impl std::fmt::Debug for EvaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("timeout", &self.inner.timeout)
            .field("debug", &self.inner.debug)
            .finish_non_exhaustive()
    }
}

/// Builder for creating an [`EvaClient`].
pub struct ClientBuilder {
    base_url: Option<String>,
    api_token: Option<String>,
    timeout: Duration,
    debug: bool,
    user_agent: Option<String>,
    logger: Option<Arc<dyn Logger>>,
    metrics: Option<Arc<dyn Metrics>>,
    defaults: FieldDefaults,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
            debug: false,
            user_agent: None,
            logger: None,
            metrics: None,
            defaults: FieldDefaults::builtin(),
        }
    }

    /// Set the server URL (scheme and host, optionally a path prefix).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bearer token.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the per-call timeout. Zero means [`DEFAULT_TIMEOUT`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Log every request and response body through the logger.
    ///
    /// Without an explicit [`logger`](Self::logger), [`TracingLogger`] is used.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the logger.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Set the metrics sink.
    pub fn metrics(mut self, metrics: Arc<dyn Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Override the default projection the façades use for `entity`.
    pub fn default_fields<I, S>(mut self, entity: Entity, projection: Projection, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults
            .set(entity, projection, fields.into_iter().map(Into::into).collect());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<EvaClient> {
        let base_url = self
            .base_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;
        let api_token = self
            .api_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Config("api_token is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        let endpoint = base_url.join("api/")?;

        let host = match (base_url.host_str(), base_url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_token))
            .map_err(|_| Error::Config("Invalid api_token".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("evateam-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        let timeout = if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        };

        let logger = match (self.logger, self.debug) {
            (Some(logger), _) => Some(logger),
            (None, true) => Some(Arc::new(TracingLogger) as Arc<dyn Logger>),
            (None, false) => None,
        };

        Ok(EvaClient {
            inner: Arc::new(ClientInner {
                http,
                endpoint,
                host,
                timeout,
                debug: self.debug,
                logger,
                metrics: self.metrics,
                defaults: self.defaults,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
