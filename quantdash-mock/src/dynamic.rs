use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use quantdash_core::connector::{
    HistoryProvider, InfoProvider, OptionsExpirationsProvider, QuantConnector,
};
use quantdash_core::{Capability, DashError, HistoryRequest, Info, PriceHistory, Symbol};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(DashError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    history_rules: HashMap<Symbol, MockBehavior<PriceHistory>>,
    info_rules: HashMap<Symbol, MockBehavior<Info>>,
    expiration_rules: HashMap<Symbol, MockBehavior<Vec<i64>>>,
    calls: Vec<(Capability, Symbol)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `history` calls for a specific symbol.
    pub async fn set_history_behavior(&self, symbol: Symbol, behavior: MockBehavior<PriceHistory>) {
        let mut guard = self.state.lock().await;
        guard.history_rules.insert(symbol, behavior);
    }

    /// Set the behavior for `info` calls for a specific symbol.
    pub async fn set_info_behavior(&self, symbol: Symbol, behavior: MockBehavior<Info>) {
        let mut guard = self.state.lock().await;
        guard.info_rules.insert(symbol, behavior);
    }

    /// Set the behavior for `options_expirations` calls for a specific symbol.
    pub async fn set_expirations_behavior(&self, symbol: Symbol, behavior: MockBehavior<Vec<i64>>) {
        let mut guard = self.state.lock().await;
        guard.expiration_rules.insert(symbol, behavior);
    }

    /// Every call received so far, in arrival order.
    pub async fn calls(&self) -> Vec<(Capability, Symbol)> {
        self.state.lock().await.calls.clone()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.history_rules.clear();
        guard.info_rules.clear();
        guard.expiration_rules.clear();
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Symbols without a rule are reported as not found.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn QuantConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn QuantConnector>, controller)
    }

    /// Log the call and snapshot its rule without holding the lock across await points.
    async fn take_rule<T: Clone>(
        &self,
        capability: Capability,
        symbol: &Symbol,
        rules: impl FnOnce(&InternalState) -> Option<&MockBehavior<T>>,
    ) -> Option<MockBehavior<T>> {
        let mut guard = self.state.lock().await;
        guard.calls.push((capability, symbol.clone()));
        rules(&*guard).cloned()
    }

    async fn play<T>(
        behavior: Option<MockBehavior<T>>,
        capability: Capability,
        symbol: &Symbol,
    ) -> Result<T, DashError> {
        match behavior {
            Some(MockBehavior::Return(v)) => Ok(v),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(DashError::not_found(format!("{capability} for {symbol}"))),
        }
    }
}

impl QuantConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }

    fn as_info_provider(&self) -> Option<&dyn InfoProvider> {
        Some(self as &dyn InfoProvider)
    }

    fn as_options_expirations_provider(&self) -> Option<&dyn OptionsExpirationsProvider> {
        Some(self as &dyn OptionsExpirationsProvider)
    }
}

#[async_trait]
impl HistoryProvider for DynamicMockConnector {
    async fn history(
        &self,
        symbol: &Symbol,
        req: HistoryRequest,
    ) -> Result<PriceHistory, DashError> {
        let rule = self
            .take_rule(Capability::History, symbol, |s| s.history_rules.get(symbol))
            .await;
        let mut h = Self::play(rule, Capability::History, symbol).await?;
        h.bars.retain(|b| req.contains(b.date));
        Ok(h)
    }
}

#[async_trait]
impl InfoProvider for DynamicMockConnector {
    async fn info(&self, symbol: &Symbol) -> Result<Info, DashError> {
        let rule = self
            .take_rule(Capability::Info, symbol, |s| s.info_rules.get(symbol))
            .await;
        Self::play(rule, Capability::Info, symbol).await
    }
}

#[async_trait]
impl OptionsExpirationsProvider for DynamicMockConnector {
    async fn options_expirations(&self, symbol: &Symbol) -> Result<Vec<i64>, DashError> {
        let rule = self
            .take_rule(Capability::OptionsExpirations, symbol, |s| {
                s.expiration_rules.get(symbol)
            })
            .await;
        Self::play(rule, Capability::OptionsExpirations, symbol).await
    }
}
