use tokio::sync::Mutex;

use crate::domain::cart::{Cart, LineItem, ProductId};
use crate::domain::errors::{CartError, CartOperation};
use crate::domain::ports::{InventoryClient, NotificationSink, SnapshotStorage};

/// The cart plus its collaborators.
///
/// Every mutation runs its whole read-modify-write sequence, remote reads
/// included, under one lock, so concurrent calls are applied one after the
/// other. A mutation either persists and then swaps in the new cart, or
/// leaves both storage and memory as they were and emits exactly one
/// notification. Nothing is returned to the caller.
pub struct CartStore<I, S, N> {
    inventory: I,
    storage: S,
    notifier: N,
    storage_key: String,
    cart: Mutex<Cart>,
}

impl<I, S, N> CartStore<I, S, N>
where
    I: InventoryClient,
    S: SnapshotStorage,
    N: NotificationSink,
{
    /// Seeds the cart from the snapshot stored under `storage_key`, or starts
    /// empty when there is none.
    pub fn load(
        inventory: I,
        storage: S,
        notifier: N,
        storage_key: impl Into<String>,
    ) -> Result<Self, CartError> {
        let storage_key = storage_key.into();
        let cart = match storage.read(&storage_key)? {
            Some(raw) => Cart::from_snapshot(&raw)?,
            None => Cart::default(),
        };
        log::info!(
            "Loaded cart '{}' with {} line item(s)",
            storage_key,
            cart.len()
        );

        Ok(Self {
            inventory,
            storage,
            notifier,
            storage_key,
            cart: Mutex::new(cart),
        })
    }

    /// Copy of the current cart.
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    pub async fn add_item(&self, product_id: ProductId) {
        let mut cart = self.cart.lock().await;
        match self.try_add(&cart, product_id).await {
            Ok(next) => {
                log::debug!(
                    "Product {} now has amount {}",
                    product_id,
                    next.amount_of(product_id)
                );
                *cart = next;
            }
            Err(e) => self.reject(CartOperation::AddItem, product_id, &e),
        }
    }

    pub async fn remove_item(&self, product_id: ProductId) {
        let mut cart = self.cart.lock().await;
        match self.try_remove(&cart, product_id) {
            Ok(next) => {
                log::debug!("Removed product {} from the cart", product_id);
                *cart = next;
            }
            Err(e) => self.reject(CartOperation::RemoveItem, product_id, &e),
        }
    }

    /// Non-positive amounts are ignored, as are products not in the cart.
    pub async fn update_amount(&self, product_id: ProductId, amount: i64) {
        if amount <= 0 {
            return;
        }

        let mut cart = self.cart.lock().await;
        match self.try_update(&cart, product_id, amount).await {
            Ok(Some(next)) => {
                log::debug!("Product {} set to amount {}", product_id, amount);
                *cart = next;
            }
            Ok(None) => {
                log::debug!(
                    "Ignoring amount change for product {} which is not in the cart",
                    product_id
                );
            }
            Err(e) => self.reject(CartOperation::UpdateAmount, product_id, &e),
        }
    }

    async fn try_add(&self, cart: &Cart, product_id: ProductId) -> Result<Cart, CartError> {
        let (product, stock) = tokio::try_join!(
            self.inventory.product(product_id),
            self.inventory.stock(product_id)
        )?;

        let desired = i64::from(cart.amount_of(product_id)) + 1;
        stock.ensure_covers(desired)?;

        let desired = u32::try_from(desired).map_err(|_| CartError::StockExceeded {
            requested: desired,
            available: stock.amount,
        })?;
        let next = cart.with_item_last(LineItem::from_product(product_id, product, desired));
        self.persist(&next)?;
        Ok(next)
    }

    fn try_remove(&self, cart: &Cart, product_id: ProductId) -> Result<Cart, CartError> {
        let next = cart
            .without(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        self.persist(&next)?;
        Ok(next)
    }

    async fn try_update(
        &self,
        cart: &Cart,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Option<Cart>, CartError> {
        let stock = self.inventory.stock(product_id).await?;
        stock.ensure_covers(amount)?;

        let amount = u32::try_from(amount).map_err(|_| CartError::StockExceeded {
            requested: amount,
            available: stock.amount,
        })?;
        let Some(next) = cart.with_amount(product_id, amount) else {
            return Ok(None);
        };
        self.persist(&next)?;
        Ok(Some(next))
    }

    fn persist(&self, cart: &Cart) -> Result<(), CartError> {
        let snapshot = cart.to_snapshot()?;
        self.storage.write(&self.storage_key, &snapshot)
    }

    fn reject(&self, operation: CartOperation, product_id: ProductId, error: &CartError) {
        log::warn!("{:?} rejected for product {}: {}", operation, product_id, error);
        self.notifier.emit_error(error.user_message(operation));
    }
}
