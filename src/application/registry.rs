//! Orderer lookup by exchange name.

use std::collections::HashMap;
use std::sync::Arc;

use crate::port::Orderer;

/// Orderers keyed by the exchange name used in order configuration and
/// queue attributes.
///
/// Built once per invocation and passed to whichever use case needs it.
#[derive(Default, Clone)]
pub struct OrdererRegistry {
    orderers: HashMap<String, Arc<dyn Orderer>>,
}

impl OrdererRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an orderer under `exchange`, replacing any previous one.
    pub fn register(&mut self, exchange: impl Into<String>, orderer: Arc<dyn Orderer>) {
        self.orderers.insert(exchange.into(), orderer);
    }

    /// Look up the orderer for an exchange. Names match exactly.
    #[must_use]
    pub fn get(&self, exchange: &str) -> Option<&Arc<dyn Orderer>> {
        self.orderers.get(exchange)
    }

    /// Registered exchange names, sorted.
    #[must_use]
    pub fn exchanges(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.orderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orderers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orderers.is_empty()
    }
}

impl std::fmt::Debug for OrdererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdererRegistry")
            .field("exchanges", &self.exchanges())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::simulated::SimulatedOrderer;

    #[test]
    fn lookup_is_exact() {
        let mut registry = OrdererRegistry::new();
        registry.register("kraken", Arc::new(SimulatedOrderer::new()));

        assert!(registry.get("kraken").is_some());
        assert!(registry.get("Kraken").is_none());
        assert!(registry.get("binance").is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.exchanges(), vec!["kraken"]);
    }

    #[test]
    fn empty_registry() {
        let registry = OrdererRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(format!("{registry:?}"), "OrdererRegistry { exchanges: [] }");
    }
}
