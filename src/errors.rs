use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::cart::ProductId;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Product {0} is not in the cart")]
    NotFound(ProductId),
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound(_) => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
        }
    }
}
