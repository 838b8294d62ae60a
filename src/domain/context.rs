//! Per-request catalog context.

use super::primitives::{LanguageId, StoreId, TimeMs};

/// Language, store and clock for one catalog request.
///
/// Every repository and catalog operation takes this explicitly; `now` decides
/// which specials are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogContext {
    pub language_id: LanguageId,
    pub store_id: StoreId,
    pub now: TimeMs,
}

impl CatalogContext {
    pub fn new(language_id: LanguageId, store_id: StoreId, now: TimeMs) -> Self {
        Self {
            language_id,
            store_id,
            now,
        }
    }

    /// Context pinned to the current wall-clock time.
    pub fn at_now(language_id: LanguageId, store_id: StoreId) -> Self {
        Self::new(language_id, store_id, TimeMs::now())
    }
}
