//! Logical asset identifier → exchange-native symbol resolution.
//!
//! The comparison UI works with a small fixed set of logical crypto ids
//! ("bitcoin", "ethereum", "dogecoin"). Everything else is treated as a
//! fiat currency code and upper-cased. Both fetchers and the downsampling
//! key derivation go through these functions so the same logical id always
//! maps to the same canonical key across the pipeline.

/// The fixed set of recognized crypto ids and their exchange tickers.
const CRYPTO_SYMBOLS: [(&str, &str); 3] = [
    ("bitcoin", "BTC"),
    ("ethereum", "ETH"),
    ("dogecoin", "DOGE"),
];

/// Resolve a logical asset id to its canonical key.
///
/// Recognized crypto ids map to their exchange ticker; anything else is
/// treated as a fiat currency code and upper-cased. Total and pure:
/// every input yields a defined output, and resolving an already-resolved
/// symbol returns it unchanged.
#[must_use]
pub fn resolve(id: &str) -> String {
    let lower = id.trim().to_lowercase();
    CRYPTO_SYMBOLS
        .iter()
        .find(|(name, _)| *name == lower)
        .map_or_else(|| id.trim().to_uppercase(), |(_, sym)| (*sym).to_string())
}

/// Whether a logical id belongs to the recognized crypto set.
#[must_use]
pub fn is_crypto(id: &str) -> bool {
    let lower = id.trim().to_lowercase();
    CRYPTO_SYMBOLS.iter().any(|(name, _)| *name == lower)
}
