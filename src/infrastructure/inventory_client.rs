use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::domain::cart::{Product, ProductId, Stock};
use crate::domain::errors::CartError;
use crate::domain::ports::InventoryClient;

impl From<reqwest::Error> for CartError {
    fn from(e: reqwest::Error) -> Self {
        CartError::Inventory(e.to_string())
    }
}

/// Inventory lookups over HTTP: `GET {base}/products/{id}` and
/// `GET {base}/stock/{id}`. Non-2xx statuses, transport failures and
/// undecodable bodies all surface as [`CartError::Inventory`].
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CartError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CartError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

impl InventoryClient for HttpInventoryClient {
    async fn product(&self, id: ProductId) -> Result<Product, CartError> {
        self.get_json(&format!("/products/{}", id)).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, CartError> {
        self.get_json(&format!("/stock/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpInventoryClient {
        HttpInventoryClient::new(server.uri(), Duration::from_secs(2)).expect("client")
    }

    #[tokio::test]
    async fn product_decodes_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "title": "Tênis Adidas Duramo Lite 2.0",
                "price": 219.9,
                "image": "https://cdn.example.com/3.jpg"
            })))
            .mount(&server)
            .await;

        let product = client_for(&server).product(3).await.expect("product");

        assert_eq!(product.id, 3);
        assert_eq!(product.title, "Tênis Adidas Duramo Lite 2.0");
        assert_eq!(product.image, "https://cdn.example.com/3.jpg");
        assert_eq!(product.price.to_string(), "219.9");
    }

    #[tokio::test]
    async fn stock_decodes_amount_and_ignores_extra_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "amount": 7
            })))
            .mount(&server)
            .await;

        let stock = client_for(&server).stock(3).await.expect("stock");

        assert_eq!(stock, Stock { amount: 7 });
    }

    #[tokio::test]
    async fn not_found_is_an_inventory_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client_for(&server).product(99).await;

        assert!(matches!(result, Err(CartError::Inventory(_))));
    }

    #[tokio::test]
    async fn server_error_is_an_inventory_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/1"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(matches!(
            client_for(&server).stock(1).await,
            Err(CartError::Inventory(_))
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_an_inventory_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "quantity": 4 })))
            .mount(&server)
            .await;

        assert!(matches!(
            client_for(&server).stock(1).await,
            Err(CartError::Inventory(_))
        ));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "amount": 1 }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;
        let client =
            HttpInventoryClient::new(server.uri(), Duration::from_millis(50)).expect("client");

        assert!(matches!(
            client.stock(1).await,
            Err(CartError::Inventory(_))
        ));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "amount": 2 })))
            .mount(&server)
            .await;
        let client = HttpInventoryClient::new(format!("{}/", server.uri()), Duration::from_secs(2))
            .expect("client");

        assert_eq!(client.stock(2).await.expect("stock").amount, 2);
    }
}
