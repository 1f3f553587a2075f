//! The injection seam.
//!
//! Injection is the only suspension point in the subsystem: fetching a
//! plugin body and evaluating it in the host. There is deliberately no
//! retract or unload counterpart on either trait: the host cannot
//! unload code once it has been evaluated.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::descriptor::PluginSource;
use crate::error::{PluginError, PluginResult};

/// Performs one plugin injection.
#[async_trait]
pub trait PluginInjector: Send + Sync {
    /// Inject the plugin at `source`, attaching `instance_id` (when
    /// given) to its execution context so plugin-originated calls can
    /// later be correlated with the server generation that supplied them.
    async fn inject(&self, source: &PluginSource, instance_id: Option<&str>) -> PluginResult<()>;
}

/// Evaluates fetched plugin code in the host.
#[async_trait]
pub trait ScriptEvaluator: Send + Sync {
    /// Evaluate `body` as the plugin fetched from `source`.
    async fn evaluate(
        &self,
        source: &PluginSource,
        body: &str,
        instance_id: Option<&str>,
    ) -> PluginResult<()>;
}

/// Injector that fetches plugin bodies over HTTP and hands them to a
/// [`ScriptEvaluator`].
pub struct HttpInjector<E> {
    client: reqwest::Client,
    evaluator: E,
}

impl<E: ScriptEvaluator> HttpInjector<E> {
    /// Create an injector with a default HTTP client.
    #[must_use]
    pub fn new(evaluator: E) -> Self {
        Self {
            client: reqwest::Client::new(),
            evaluator,
        }
    }

    /// Create an injector with a preconfigured HTTP client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, evaluator: E) -> Self {
        Self { client, evaluator }
    }
}

#[async_trait]
impl<E: ScriptEvaluator> PluginInjector for HttpInjector<E> {
    async fn inject(&self, source: &PluginSource, instance_id: Option<&str>) -> PluginResult<()> {
        let url = Url::parse(&source.url).map_err(|e| PluginError::Fetch {
            url: source.url.clone(),
            message: e.to_string(),
        })?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PluginError::Fetch {
                url: source.url.clone(),
                message: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(PluginError::HttpStatus {
                url: source.url.clone(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(|e| PluginError::Fetch {
            url: source.url.clone(),
            message: e.to_string(),
        })?;
        debug!(url = %source.url, bytes = body.len(), "fetched plugin body");
        self.evaluator.evaluate(source, &body, instance_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopEvaluator;

    #[async_trait]
    impl ScriptEvaluator for NoopEvaluator {
        async fn evaluate(
            &self,
            _source: &PluginSource,
            _body: &str,
            _instance_id: Option<&str>,
        ) -> PluginResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn relative_url_fails_as_fetch_error() {
        let injector = HttpInjector::new(NoopEvaluator);
        let source = PluginSource::script("plugins/a.js");
        let err = injector.inject(&source, None).await.unwrap_err();
        assert!(matches!(err, PluginError::Fetch { .. }));
    }
}
