use std::future::Future;
use std::sync::Arc;

use super::cart::{Product, ProductId, Stock};
use super::errors::CartError;

/// Read-only product lookups against the remote inventory.
pub trait InventoryClient: Send + Sync + 'static {
    fn product(&self, id: ProductId) -> impl Future<Output = Result<Product, CartError>> + Send;
    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CartError>> + Send;
}

/// Durable key-value storage holding the serialized cart.
pub trait SnapshotStorage: Send + Sync + 'static {
    fn read(&self, key: &str) -> Result<Option<String>, CartError>;
    fn write(&self, key: &str, value: &str) -> Result<(), CartError>;
}

/// Fire-and-forget user-facing error messages.
pub trait NotificationSink: Send + Sync + 'static {
    fn emit_error(&self, message: &str);
}

impl<T: InventoryClient> InventoryClient for Arc<T> {
    fn product(&self, id: ProductId) -> impl Future<Output = Result<Product, CartError>> + Send {
        (**self).product(id)
    }

    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, CartError>> + Send {
        (**self).stock(id)
    }
}

impl<T: SnapshotStorage + ?Sized> SnapshotStorage for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>, CartError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CartError> {
        (**self).write(key, value)
    }
}

impl<T: SnapshotStorage + ?Sized> SnapshotStorage for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, CartError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CartError> {
        (**self).write(key, value)
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn emit_error(&self, message: &str) {
        (**self).emit_error(message)
    }
}
