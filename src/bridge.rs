//! The call seam between the typed façade and the native host

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::op::Operation;

/// Component identifier the native side registers under
pub const PLUGIN_NAME: &str = "ThermalPrinter";

/// The opaque native call seam
///
/// One handler serves all eight operations. `call` forwards the method
/// and its single argument object, and resolves exactly once: `Ok` with
/// the success payload (possibly `Null` for operations without one) or
/// `Err` with whatever the host put on the error channel.
///
/// Implementations own the real device work. This crate ships one:
/// [`HandlerBridge`](crate::HandlerBridge), which routes to an
/// in-process [`ThermalPrinterHandler`](crate::ThermalPrinterHandler).
#[async_trait]
pub trait NativeBridge: Send + Sync {
    async fn call(&self, method: Operation, args: Value) -> Result<Value, Value>;
}

#[async_trait]
impl<T: NativeBridge + ?Sized> NativeBridge for Arc<T> {
    async fn call(&self, method: Operation, args: Value) -> Result<Value, Value> {
        (**self).call(method, args).await
    }
}
