//! Host-side dispatch: wire calls onto a typed handler

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::bridge::NativeBridge;
use crate::error::ErrorResult;
use crate::op::Operation;
use crate::types::{
    BitmapRequest, DiscoveredPrinter, EncodingResult, ListPrintersRequest, PermissionResult,
    PrintRequest, PrinterTarget,
};

/// Typed interface a native host implements
///
/// The Rust face of the platform code that owns device enumeration,
/// session management, permission prompts and raster conversion. Every
/// failure is reported as the wire [`ErrorResult`] shape; there is no
/// richer taxonomy at this boundary.
#[async_trait]
pub trait ThermalPrinterHandler: Send + Sync {
    async fn list_printers(
        &self,
        request: ListPrintersRequest,
    ) -> Result<Vec<DiscoveredPrinter>, ErrorResult>;

    async fn print_formatted_text(&self, request: PrintRequest) -> Result<(), ErrorResult>;

    async fn print_formatted_text_and_cut(&self, request: PrintRequest)
    -> Result<(), ErrorResult>;

    async fn get_encoding(
        &self,
        target: PrinterTarget,
    ) -> Result<Option<EncodingResult>, ErrorResult>;

    async fn disconnect_printer(&self, target: PrinterTarget) -> Result<(), ErrorResult>;

    async fn request_permissions(
        &self,
        target: PrinterTarget,
    ) -> Result<PermissionResult, ErrorResult>;

    async fn request_bt_permissions(
        &self,
        target: PrinterTarget,
    ) -> Result<PermissionResult, ErrorResult>;

    async fn bitmap_to_hexadecimal_string(
        &self,
        request: BitmapRequest,
    ) -> Result<String, ErrorResult>;
}

/// Adapts a [`ThermalPrinterHandler`] into a [`NativeBridge`]
///
/// The registration point of the plugin: decodes each method's argument
/// object, dispatches exhaustively over [`Operation`] and encodes the
/// outcome back onto the success or error channel. A request that does
/// not decode becomes an error outcome, never a panic.
#[derive(Debug, Clone)]
pub struct HandlerBridge<H> {
    handler: H,
}

impl<H> HandlerBridge<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn into_inner(self) -> H {
        self.handler
    }
}

#[async_trait]
impl<H: ThermalPrinterHandler> NativeBridge for HandlerBridge<H> {
    #[instrument(skip_all, fields(method = %method))]
    async fn call(&self, method: Operation, args: Value) -> Result<Value, Value> {
        debug!("dispatching to handler");

        match method {
            Operation::ListPrinters => {
                encode(self.handler.list_printers(decode(args)?).await)
            }
            Operation::PrintFormattedText => {
                encode(self.handler.print_formatted_text(decode(args)?).await)
            }
            Operation::PrintFormattedTextAndCut => encode(
                self.handler
                    .print_formatted_text_and_cut(decode(args)?)
                    .await,
            ),
            Operation::GetEncoding => encode(self.handler.get_encoding(decode(args)?).await),
            Operation::DisconnectPrinter => {
                encode(self.handler.disconnect_printer(decode(args)?).await)
            }
            Operation::RequestPermissions => {
                encode(self.handler.request_permissions(decode(args)?).await)
            }
            Operation::RequestBtPermissions => {
                encode(self.handler.request_bt_permissions(decode(args)?).await)
            }
            Operation::BitmapToHexadecimalString => encode(
                self.handler
                    .bitmap_to_hexadecimal_string(decode(args)?)
                    .await,
            ),
        }
    }
}

/// A request that fails to decode is answered on the error channel,
/// never with a panic
fn decode<T: DeserializeOwned>(args: Value) -> Result<T, Value> {
    serde_json::from_value(args).map_err(|e| error_value(ErrorResult::message(e.to_string())))
}

fn encode<T: Serialize>(outcome: Result<T, ErrorResult>) -> Result<Value, Value> {
    match outcome {
        Ok(payload) => {
            serde_json::to_value(payload).map_err(|e| error_value(ErrorResult::message(e.to_string())))
        }
        Err(err) => Err(error_value(err)),
    }
}

fn error_value(err: ErrorResult) -> Value {
    serde_json::to_value(err).unwrap_or(Value::Null)
}
