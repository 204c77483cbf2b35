//! Cart module — the portal's shopping-cart state.
//!
//! One cart per store, persisted as a single JSON array. Lines are unique
//! by product id and quantities never exceed the product's available stock.

pub mod model;
pub mod service;
pub mod api;

use std::sync::Arc;

use axum::Router;

use agroportal_core::Module;
use agroportal_kv::KVStore;

use crate::service::CartService;

/// Cart module implementing the Module trait.
pub struct CartModule {
    service: Arc<CartService>,
}

impl CartModule {
    /// Create a new CartModule over the given store.
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            service: CartService::new(kv),
        }
    }

    /// Get a reference to the underlying CartService.
    pub fn service(&self) -> &Arc<CartService> {
        &self.service
    }
}

impl Module for CartModule {
    fn name(&self) -> &str {
        "cart"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
