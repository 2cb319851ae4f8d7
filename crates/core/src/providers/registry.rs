use super::binance::BinanceProvider;
use super::frankfurter::FrankfurterProvider;
use super::traits::RateProvider;

/// Registry of all available rate providers.
///
/// Routes a logical target id to the first provider that handles it.
/// New sources can be added without modifying existing code.
pub struct RateProviderRegistry {
    providers: Vec<Box<dyn RateProvider>>,
}

impl RateProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the default providers pre-configured.
    pub fn new_with_defaults() -> Self {
        let mut registry = Self::new();

        // Binance — crypto candles and spot prices, no API key needed
        registry.register(Box::new(BinanceProvider::new()));

        // Frankfurter — fiat exchange rates (ECB data), no API key needed
        registry.register(Box::new(FrankfurterProvider::new()));

        registry
    }

    /// Register a new rate provider.
    pub fn register(&mut self, provider: Box<dyn RateProvider>) {
        self.providers.push(provider);
    }

    /// Find the first provider that handles the given target id.
    pub fn provider_for(&self, target: &str) -> Option<&dyn RateProvider> {
        self.providers
            .iter()
            .find(|p| p.handles(target))
            .map(|p| p.as_ref())
    }
}

impl Default for RateProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
