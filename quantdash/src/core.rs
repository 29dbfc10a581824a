use std::sync::Arc;

use quantdash_core::{Capability, DashConfig, DashError, IndicatorConfig, QuantConnector, Symbol};

/// Orchestrator that routes dataset requests across registered providers.
pub struct Dashboard {
    pub(crate) connectors: Vec<Arc<dyn QuantConnector>>,
    pub(crate) cfg: DashConfig,
}

/// Builder for constructing a `Dashboard` with custom configuration.
pub struct DashboardBuilder {
    connectors: Vec<Arc<dyn QuantConnector>>,
    cfg: DashConfig,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardBuilder {
    /// Create a new builder with default configuration and no connectors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: DashConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is the routing priority: earlier connectors are tried
    /// first and later ones only serve as fallback.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn QuantConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set the moving-average and volatility windows.
    #[must_use]
    pub const fn indicators(mut self, indicators: IndicatorConfig) -> Self {
        self.cfg.indicators = indicators;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: DashConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Dashboard`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via [`with_connector`],
    /// or if the indicator windows are inconsistent.
    ///
    /// [`with_connector`]: DashboardBuilder::with_connector
    pub fn build(self) -> Result<Dashboard, DashError> {
        if self.connectors.is_empty() {
            return Err(DashError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        self.cfg.indicators.validate()?;
        Ok(Dashboard {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

/// Attach the connector name to errors that do not already carry one.
pub fn tag_err(connector: &str, e: DashError) -> DashError {
    match e {
        e @ (DashError::NotFound { .. }
        | DashError::ProviderTimeout { .. }
        | DashError::Connector { .. }
        | DashError::AllProvidersTimedOut { .. }
        | DashError::AllProvidersFailed(_)) => e,
        other => DashError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

impl Dashboard {
    /// Start building a new `Dashboard`.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use quantdash::Dashboard;
    /// use quantdash_yahoo::YahooConnector;
    ///
    /// let yahoo = Arc::new(YahooConnector::new_default(Duration::from_secs(10))?);
    /// let dash = Dashboard::builder()
    ///     .with_connector(yahoo)
    ///     .provider_timeout(Duration::from_secs(5))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &DashConfig {
        &self.cfg
    }

    /// Names of the registered connectors, in routing order.
    #[must_use]
    pub fn connector_names(&self) -> Vec<&'static str> {
        self.connectors.iter().map(|c| c.name()).collect()
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quantdash::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, DashError>
    where
        Fut: core::future::Future<Output = Result<T, DashError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(DashError::provider_timeout(connector_name, capability)))
    }

    /// Single-item fetch with priority and fallback.
    ///
    /// - Tries connectors in registration order, each bounded by the provider timeout.
    /// - Returns the first success.
    /// - `NotFound` from every attempted provider collapses into one `NotFound`;
    ///   all timeouts collapse into `AllProvidersTimedOut`; anything else is
    ///   returned as `AllProvidersFailed`.
    /// - When no connector offers the capability, returns `Unsupported`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quantdash::core::fetch_single",
            skip(self, call),
            fields(symbol = %symbol, capability = %capability),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        symbol: &Symbol,
        capability: Capability,
        call: F,
    ) -> Result<T, DashError>
    where
        T: Send,
        F: Fn(Arc<dyn QuantConnector>, Symbol) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, DashError>> + Send,
    {
        let label = capability.as_str();
        let mut attempted_any = false;
        let mut errors: Vec<DashError> = Vec::new();

        for c in &self.connectors {
            if let Some(fut) = call(Arc::clone(c), symbol.clone()) {
                attempted_any = true;
                match Self::provider_call_with_timeout(
                    c.name(),
                    label,
                    self.cfg.provider_timeout,
                    fut,
                )
                .await
                {
                    Ok(v) => return Ok(v),
                    Err(e @ (DashError::NotFound { .. } | DashError::ProviderTimeout { .. })) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(target: "quantdash::core", connector = c.name(), error = %e, "provider miss");
                        errors.push(e);
                    }
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(target: "quantdash::core", connector = c.name(), error = %e, "provider failed");
                        errors.push(tag_err(c.name(), e));
                    }
                }
            }
        }

        if !attempted_any {
            return Err(DashError::unsupported(label));
        }

        if errors
            .iter()
            .all(|e| matches!(e, DashError::NotFound { .. }))
        {
            return Err(DashError::not_found(format!("{label} for {symbol}")));
        }

        if errors
            .iter()
            .all(|e| matches!(e, DashError::ProviderTimeout { .. }))
        {
            Err(DashError::AllProvidersTimedOut { capability: label })
        } else {
            Err(DashError::AllProvidersFailed(errors))
        }
    }
}
