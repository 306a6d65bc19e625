use std::collections::HashSet;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::errors::CartError;

pub type ProductId = i64;

/// Product metadata as reported by the inventory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: BigDecimal,
    pub image: String,
}

/// Available quantity for a product as reported by the inventory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub amount: i64,
}

impl Stock {
    pub fn ensure_covers(&self, requested: i64) -> Result<(), CartError> {
        if requested > self.amount {
            return Err(CartError::StockExceeded {
                requested,
                available: self.amount,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub price: BigDecimal,
    pub image: String,
    pub amount: u32,
}

impl LineItem {
    /// Builds a line item for `id` from freshly fetched metadata.
    pub fn from_product(id: ProductId, product: Product, amount: u32) -> Self {
        Self {
            id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }
}

/// Ordered line items, at most one per product id, every amount at least 1.
///
/// The mutators never touch `self`; they hand back the next cart so the
/// caller can persist it before making it current.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Current amount for `id`, 0 when the product is not in the cart.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, |item| item.amount)
    }

    /// Drops any line with the same id and appends `item` at the end.
    pub fn with_item_last(&self, item: LineItem) -> Cart {
        let mut items: Vec<LineItem> = self
            .items
            .iter()
            .filter(|existing| existing.id != item.id)
            .cloned()
            .collect();
        items.push(item);
        Cart { items }
    }

    /// `None` when `id` is not in the cart.
    pub fn without(&self, id: ProductId) -> Option<Cart> {
        self.get(id)?;
        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        Some(Cart { items })
    }

    /// Sets the amount in place, keeping the line's position. `None` when
    /// `id` is not in the cart.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Option<Cart> {
        let position = self.items.iter().position(|item| item.id == id)?;
        let mut items = self.items.clone();
        items[position].amount = amount;
        Some(Cart { items })
    }

    pub fn to_snapshot(&self) -> Result<String, CartError> {
        serde_json::to_string(self).map_err(|e| CartError::Storage(e.to_string()))
    }

    /// Parses a persisted snapshot, rejecting duplicate ids and zero amounts.
    pub fn from_snapshot(raw: &str) -> Result<Cart, CartError> {
        let cart: Cart =
            serde_json::from_str(raw).map_err(|e| CartError::CorruptSnapshot(e.to_string()))?;

        let mut seen = HashSet::with_capacity(cart.items.len());
        for item in &cart.items {
            if item.amount == 0 {
                return Err(CartError::CorruptSnapshot(format!(
                    "product {} has amount 0",
                    item.id
                )));
            }
            if !seen.insert(item.id) {
                return Err(CartError::CorruptSnapshot(format!(
                    "product {} appears more than once",
                    item.id
                )));
            }
        }
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: ProductId, amount: u32) -> LineItem {
        LineItem {
            id,
            title: format!("Sneaker {id}"),
            price: BigDecimal::from(id * 100),
            image: format!("https://cdn.example.com/{id}.jpg"),
            amount,
        }
    }

    fn cart_of(items: Vec<LineItem>) -> Cart {
        Cart { items }
    }

    #[test]
    fn amount_of_missing_product_is_zero() {
        let cart = cart_of(vec![item(1, 3)]);
        assert_eq!(cart.amount_of(1), 3);
        assert_eq!(cart.amount_of(2), 0);
    }

    #[test]
    fn with_item_last_moves_replaced_line_to_the_end() {
        let cart = cart_of(vec![item(1, 1), item(2, 1), item(3, 1)]);

        let next = cart.with_item_last(item(1, 2));

        let ids: Vec<ProductId> = next.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(next.amount_of(1), 2);
        assert_eq!(cart.amount_of(1), 1, "original cart must be untouched");
    }

    #[test]
    fn without_removes_only_the_matching_line() {
        let cart = cart_of(vec![item(1, 1), item(2, 4)]);

        let next = cart.without(1).expect("product 1 is in the cart");

        assert_eq!(next.items(), &[item(2, 4)]);
    }

    #[test]
    fn without_missing_product_is_none() {
        assert!(cart_of(vec![item(1, 1)]).without(9).is_none());
        assert!(Cart::default().without(1).is_none());
    }

    #[test]
    fn with_amount_keeps_position() {
        let cart = cart_of(vec![item(1, 1), item(2, 1), item(3, 1)]);

        let next = cart.with_amount(2, 7).expect("product 2 is in the cart");

        let ids: Vec<ProductId> = next.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(next.amount_of(2), 7);
    }

    #[test]
    fn with_amount_missing_product_is_none() {
        assert!(cart_of(vec![item(1, 1)]).with_amount(2, 5).is_none());
    }

    #[test]
    fn snapshot_is_a_plain_json_array() {
        let cart = cart_of(vec![item(1, 2)]);

        let raw = cart.to_snapshot().expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

        assert!(value.is_array());
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["amount"], 2);
        assert_eq!(value[0]["title"], "Sneaker 1");
    }

    #[test]
    fn snapshot_reload_reproduces_the_cart() {
        let cart = cart_of(vec![item(3, 1), item(1, 2), item(2, 5)]);

        let reloaded = Cart::from_snapshot(&cart.to_snapshot().expect("serialize"))
            .expect("deserialize");

        assert_eq!(reloaded, cart);
    }

    #[test]
    fn snapshot_accepts_numeric_prices() {
        let raw = r#"[{"id":1,"title":"Tênis","price":139.9,"image":"a.jpg","amount":1}]"#;

        let cart = Cart::from_snapshot(raw).expect("numeric price should parse");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(1).map(|i| i.title.as_str()), Some("Tênis"));
        assert_eq!(
            cart.get(1).map(|i| i.price.to_string()).as_deref(),
            Some("139.9")
        );

        let rewritten = cart.to_snapshot().expect("serialize");
        assert!(
            rewritten.contains("139.9") && !rewritten.contains("139.90000"),
            "price must keep its exact literal: {rewritten}"
        );
    }

    #[test]
    fn snapshot_with_duplicate_ids_is_corrupt() {
        let raw = r#"[
            {"id":1,"title":"a","price":"1","image":"a","amount":1},
            {"id":1,"title":"a","price":"1","image":"a","amount":2}
        ]"#;

        assert!(matches!(
            Cart::from_snapshot(raw),
            Err(CartError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn snapshot_with_zero_amount_is_corrupt() {
        let raw = r#"[{"id":1,"title":"a","price":"1","image":"a","amount":0}]"#;

        assert!(matches!(
            Cart::from_snapshot(raw),
            Err(CartError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn snapshot_that_is_not_json_is_corrupt() {
        assert!(matches!(
            Cart::from_snapshot("not json"),
            Err(CartError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn stock_covers_up_to_and_including_available() {
        let stock = Stock { amount: 5 };
        assert!(stock.ensure_covers(5).is_ok());
        assert!(matches!(
            stock.ensure_covers(6),
            Err(CartError::StockExceeded {
                requested: 6,
                available: 5
            })
        ));
    }
}
