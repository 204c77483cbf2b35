use serde::{Deserialize, Serialize};

/// A line in the shopping cart. One line per product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to.
    pub product_id: String,

    /// Product display name.
    pub name: String,

    /// Product code (SKU).
    #[serde(default)]
    pub code: String,

    /// Sales unit, e.g. "L" or "kg".
    #[serde(default)]
    pub unit: String,

    /// Requested quantity. Always between 1 and `in_stock`.
    pub quantity: u32,

    /// Stock available when the product was added.
    pub in_stock: u32,

    /// Product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Request body for adding a product to the cart.
#[derive(Debug, Clone, Deserialize)]
pub struct AddItem {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub unit: String,
    /// Quantity to add (default 1).
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub in_stock: u32,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

/// Request body for changing a line's quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuantity {
    pub quantity: u32,
}
