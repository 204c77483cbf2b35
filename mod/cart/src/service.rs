use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use agroportal_kv::KVStore;

use crate::model::{AddItem, CartItem};

/// Storage key the cart is persisted under (one cart per store).
pub const CART_KEY: &str = "cart_items";

/// Cart service error type.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("storage: {0}")]
    Storage(String),
}

impl From<CartError> for agroportal_core::ServiceError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::NotFound(m) => agroportal_core::ServiceError::NotFound(m),
            CartError::Validation(m) => agroportal_core::ServiceError::Validation(m),
            CartError::Storage(m) => agroportal_core::ServiceError::Storage(m),
        }
    }
}

/// The cart service. Keeps the whole cart as one JSON array in the store.
pub struct CartService {
    store: Arc<dyn KVStore>,
}

impl CartService {
    pub fn new(store: Arc<dyn KVStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }

    /// Current cart lines. Missing or unreadable state is an empty cart.
    pub fn items(&self) -> Vec<CartItem> {
        let bytes = match self.store.get(CART_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                debug!("cart: read failed: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(e) => {
                debug!("cart: stored state unreadable, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    fn persist(&self, items: &[CartItem]) -> Result<(), CartError> {
        let json = serde_json::to_vec(items).map_err(|e| CartError::Storage(e.to_string()))?;
        self.store
            .set(CART_KEY, &json)
            .map_err(|e| CartError::Storage(e.to_string()))
    }

    /// Add a product to the cart.
    ///
    /// Lines are unique by product id: adding an existing product merges the
    /// quantities, clamped to the line's available stock.
    pub fn add(&self, req: AddItem) -> Result<CartItem, CartError> {
        if req.product_id.is_empty() {
            return Err(CartError::Validation("product_id is required".into()));
        }
        if req.quantity == 0 {
            return Err(CartError::Validation("quantity must be at least 1".into()));
        }
        if req.in_stock == 0 {
            return Err(CartError::Validation(format!(
                "product '{}' is out of stock",
                req.product_id
            )));
        }

        let mut items = self.items();
        let line = match items.iter_mut().find(|i| i.product_id == req.product_id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(req.quantity).min(line.in_stock);
                line.clone()
            }
            None => {
                let line = CartItem {
                    product_id: req.product_id,
                    name: req.name,
                    code: req.code,
                    unit: req.unit,
                    quantity: req.quantity.min(req.in_stock),
                    in_stock: req.in_stock,
                    image: req.image,
                };
                items.push(line.clone());
                line
            }
        };
        self.persist(&items)?;
        Ok(line)
    }

    /// Set a line's quantity. Must be between 1 and the line's stock.
    pub fn set_quantity(&self, product_id: &str, quantity: u32) -> Result<CartItem, CartError> {
        if quantity == 0 {
            return Err(CartError::Validation("quantity must be at least 1".into()));
        }

        let mut items = self.items();
        let Some(line) = items.iter_mut().find(|i| i.product_id == product_id) else {
            return Err(CartError::NotFound(format!(
                "product '{}' is not in the cart",
                product_id
            )));
        };
        if quantity > line.in_stock {
            return Err(CartError::Validation(format!(
                "quantity {} exceeds available stock {}",
                quantity, line.in_stock
            )));
        }
        line.quantity = quantity;

        let updated = line.clone();
        self.persist(&items)?;
        Ok(updated)
    }

    /// Remove a line from the cart.
    pub fn remove(&self, product_id: &str) -> Result<(), CartError> {
        let mut items = self.items();
        let before = items.len();
        items.retain(|i| i.product_id != product_id);
        if items.len() == before {
            return Err(CartError::NotFound(format!(
                "product '{}' is not in the cart",
                product_id
            )));
        }
        self.persist(&items)
    }

    /// Empty the cart.
    pub fn clear(&self) -> Result<(), CartError> {
        self.store
            .delete(CART_KEY)
            .map_err(|e| CartError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use agroportal_kv::{KVStore as _, MemoryStore};

    use super::*;

    fn test_service() -> Arc<CartService> {
        CartService::new(Arc::new(MemoryStore::new()))
    }

    fn herbicide(quantity: u32) -> AddItem {
        AddItem {
            product_id: "p-herb-20".to_string(),
            name: "Herbicide 20L".to_string(),
            code: "HRB-20".to_string(),
            unit: "L".to_string(),
            quantity,
            in_stock: 5,
            image: None,
        }
    }

    #[test]
    fn add_and_list() {
        let svc = test_service();
        let line = svc.add(herbicide(2)).unwrap();
        assert_eq!(line.quantity, 2);

        let items = svc.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, "p-herb-20");
    }

    #[test]
    fn adding_same_product_merges_lines() {
        let svc = test_service();
        svc.add(herbicide(2)).unwrap();
        let line = svc.add(herbicide(1)).unwrap();

        assert_eq!(line.quantity, 3);
        assert_eq!(svc.items().len(), 1);
    }

    #[test]
    fn merged_quantity_clamps_to_stock() {
        let svc = test_service();
        svc.add(herbicide(4)).unwrap();
        let line = svc.add(herbicide(4)).unwrap();
        assert_eq!(line.quantity, 5); // stock is 5
    }

    #[test]
    fn add_validates_input() {
        let svc = test_service();
        assert!(matches!(
            svc.add(herbicide(0)),
            Err(CartError::Validation(_))
        ));

        let mut sold_out = herbicide(1);
        sold_out.in_stock = 0;
        assert!(matches!(svc.add(sold_out), Err(CartError::Validation(_))));

        let mut no_id = herbicide(1);
        no_id.product_id.clear();
        assert!(matches!(svc.add(no_id), Err(CartError::Validation(_))));
    }

    #[test]
    fn set_quantity_bounds() {
        let svc = test_service();
        svc.add(herbicide(1)).unwrap();

        let line = svc.set_quantity("p-herb-20", 5).unwrap();
        assert_eq!(line.quantity, 5);

        assert!(matches!(
            svc.set_quantity("p-herb-20", 6),
            Err(CartError::Validation(_))
        ));
        assert!(matches!(
            svc.set_quantity("p-herb-20", 0),
            Err(CartError::Validation(_))
        ));
        assert!(matches!(
            svc.set_quantity("p-missing", 1),
            Err(CartError::NotFound(_))
        ));
    }

    #[test]
    fn remove_and_clear() {
        let svc = test_service();
        svc.add(herbicide(1)).unwrap();

        svc.remove("p-herb-20").unwrap();
        assert!(svc.items().is_empty());
        assert!(matches!(
            svc.remove("p-herb-20"),
            Err(CartError::NotFound(_))
        ));

        svc.add(herbicide(1)).unwrap();
        svc.clear().unwrap();
        assert!(svc.items().is_empty());
    }

    #[test]
    fn corrupt_state_reads_as_empty_cart() {
        let store = Arc::new(MemoryStore::new());
        store.set(CART_KEY, b"{{{ not json").unwrap();

        let svc = CartService::new(store);
        assert!(svc.items().is_empty());

        // And the cart is usable again after the next write.
        svc.add(herbicide(2)).unwrap();
        assert_eq!(svc.items().len(), 1);
    }
}
