use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use agroportal_core::ServiceError;

use crate::model::{AddItem, CartItem, UpdateQuantity};
use crate::service::CartService;

/// Shared application state.
pub type AppState = Arc<CartService>;

/// Build the cart API router.
///
/// Routes are rooted at `/cart`; the caller merges them into the app.
pub fn build_router(svc: Arc<CartService>) -> Router {
    Router::new().nest("/cart", routes()).with_state(svc)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(add_item).delete(clear))
        .route(
            "/items/{product_id}",
            put(update_quantity).delete(remove_item),
        )
}

/// GET /cart/items — all cart lines.
async fn list_items(State(svc): State<AppState>) -> Json<serde_json::Value> {
    let items = svc.items();
    Json(serde_json::json!({"items": items}))
}

/// POST /cart/items — add a product (merges with an existing line).
async fn add_item(
    State(svc): State<AppState>,
    Json(req): Json<AddItem>,
) -> Result<Json<CartItem>, ServiceError> {
    svc.add(req).map(Json).map_err(ServiceError::from)
}

/// PUT /cart/items/{product_id} — set a line's quantity.
async fn update_quantity(
    State(svc): State<AppState>,
    Path(product_id): Path<String>,
    Json(req): Json<UpdateQuantity>,
) -> Result<Json<CartItem>, ServiceError> {
    svc.set_quantity(&product_id, req.quantity)
        .map(Json)
        .map_err(ServiceError::from)
}

/// DELETE /cart/items/{product_id} — remove a line.
async fn remove_item(
    State(svc): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.remove(&product_id).map_err(ServiceError::from)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /cart/items — empty the cart.
async fn clear(State(svc): State<AppState>) -> Result<StatusCode, ServiceError> {
    svc.clear().map_err(ServiceError::from)?;
    Ok(StatusCode::NO_CONTENT)
}
