use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::cart::{Cart, LineItem};
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LineItemResponse {
    pub id: i64,
    pub title: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "179.90"
    pub price: String,
    pub image: String,
    pub amount: u32,
}

impl From<&LineItem> for LineItemResponse {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            price: item.price.to_string(),
            image: item.image.clone(),
            amount: item.amount,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAmountRequest {
    /// Zero or negative amounts are ignored.
    pub amount: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationsResponse {
    pub messages: Vec<String>,
}

fn cart_response(cart: &Cart) -> HttpResponse {
    let items: Vec<LineItemResponse> = cart.items().iter().map(LineItemResponse::from).collect();
    HttpResponse::Ok().json(items)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /cart
#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Current cart, in insertion order", body = [LineItemResponse]),
    ),
    tag = "cart"
)]
pub async fn get_cart(state: web::Data<AppState>) -> HttpResponse {
    cart_response(&state.cart.cart().await)
}

/// GET /cart/items/{id}
#[utoipa::path(
    get,
    path = "/cart/items/{id}",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Line item found", body = LineItemResponse),
        (status = 404, description = "Product is not in the cart"),
    ),
    tag = "cart"
)]
pub async fn get_item(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let cart = state.cart.cart().await;

    match cart.get(product_id) {
        Some(item) => Ok(HttpResponse::Ok().json(LineItemResponse::from(item))),
        None => Err(AppError::NotFound(product_id)),
    }
}

/// POST /cart/items/{id}
///
/// Adds one unit of the product. Rejections are reported on the
/// notification feed; the response is always the resulting cart.
#[utoipa::path(
    post,
    path = "/cart/items/{id}",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Cart after the operation", body = [LineItemResponse]),
    ),
    tag = "cart"
)]
pub async fn add_item(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    state.cart.add_item(path.into_inner()).await;
    cart_response(&state.cart.cart().await)
}

/// PUT /cart/items/{id}
#[utoipa::path(
    put,
    path = "/cart/items/{id}",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    request_body = UpdateAmountRequest,
    responses(
        (status = 200, description = "Cart after the operation", body = [LineItemResponse]),
    ),
    tag = "cart"
)]
pub async fn update_amount(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateAmountRequest>,
) -> HttpResponse {
    state
        .cart
        .update_amount(path.into_inner(), body.into_inner().amount)
        .await;
    cart_response(&state.cart.cart().await)
}

/// DELETE /cart/items/{id}
#[utoipa::path(
    delete,
    path = "/cart/items/{id}",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Cart after the operation", body = [LineItemResponse]),
    ),
    tag = "cart"
)]
pub async fn remove_item(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    state.cart.remove_item(path.into_inner()).await;
    cart_response(&state.cart.cart().await)
}

/// GET /cart/notifications
///
/// Returns and clears the pending error messages.
#[utoipa::path(
    get,
    path = "/cart/notifications",
    responses(
        (status = 200, description = "Pending messages, oldest first", body = NotificationsResponse),
    ),
    tag = "cart"
)]
pub async fn drain_notifications(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(NotificationsResponse {
        messages: state.notifications.drain(),
    })
}
