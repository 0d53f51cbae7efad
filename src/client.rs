//! Caller-side façade over the bridge

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::bridge::NativeBridge;
use crate::error::{BridgeError, BridgeResult, ErrorResult};
use crate::op::Operation;
use crate::types::{
    BitmapRequest, DiscoveredPrinter, EncodingResult, ListPrintersRequest, PermissionResult,
    PrintRequest, PrinterTarget,
};

/// Typed façade over a [`NativeBridge`]
///
/// Each operation serializes its request, forwards it verbatim and
/// decodes the single response. The façade validates nothing, retries
/// nothing and enforces no timeout; the host manages any per-printer
/// session state, and serializing concurrent calls against one physical
/// printer is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct ThermalPrinter<B> {
    bridge: B,
}

impl<B: NativeBridge> ThermalPrinter<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// List paired Bluetooth printers or attached USB printers
    pub async fn list_printers(
        &self,
        request: &ListPrintersRequest,
    ) -> BridgeResult<Vec<DiscoveredPrinter>> {
        self.invoke(Operation::ListPrinters, request).await
    }

    /// Print formatted text and feed paper, without cutting
    pub async fn print_formatted_text(&self, request: &PrintRequest) -> BridgeResult<()> {
        self.invoke_unit(Operation::PrintFormattedText, request).await
    }

    /// Print formatted text, feed paper and cut
    pub async fn print_formatted_text_and_cut(&self, request: &PrintRequest) -> BridgeResult<()> {
        self.invoke_unit(Operation::PrintFormattedTextAndCut, request)
            .await
    }

    /// Query the text encoding the printer reports
    ///
    /// Returns `None` when the host does not expose an encoding for the
    /// target printer.
    pub async fn get_encoding(
        &self,
        target: &PrinterTarget,
    ) -> BridgeResult<Option<EncodingResult>> {
        let value = self.forward(Operation::GetEncoding, target).await?;
        decode_encoding(value)
    }

    /// Release the host's connection to the printer
    pub async fn disconnect_printer(&self, target: &PrinterTarget) -> BridgeResult<()> {
        self.invoke_unit(Operation::DisconnectPrinter, target).await
    }

    /// Prompt for the OS permissions the target's transport needs
    pub async fn request_permissions(
        &self,
        target: &PrinterTarget,
    ) -> BridgeResult<PermissionResult> {
        self.invoke(Operation::RequestPermissions, target).await
    }

    /// Prompt for Bluetooth permissions specifically
    pub async fn request_bt_permissions(
        &self,
        target: &PrinterTarget,
    ) -> BridgeResult<PermissionResult> {
        self.invoke(Operation::RequestBtPermissions, target).await
    }

    /// Convert a base64 image into the printer-native raster bytes,
    /// rendered as a hexadecimal string
    pub async fn bitmap_to_hexadecimal_string(
        &self,
        request: &BitmapRequest,
    ) -> BridgeResult<String> {
        self.invoke(Operation::BitmapToHexadecimalString, request)
            .await
    }

    /// Forward one call and relay the raw outcome
    #[instrument(skip_all, fields(method = %op))]
    async fn forward<R: Serialize>(&self, op: Operation, request: &R) -> BridgeResult<Value> {
        let args = serde_json::to_value(request)?;
        debug!("forwarding to native handler");

        match self.bridge.call(op, args).await {
            Ok(payload) => Ok(payload),
            Err(raw) => {
                let err = ErrorResult::from_value(raw);
                warn!(error = %err, "native handler reported an error");
                Err(BridgeError::Native(err))
            }
        }
    }

    async fn invoke<R: Serialize, T: DeserializeOwned>(
        &self,
        op: Operation,
        request: &R,
    ) -> BridgeResult<T> {
        let value = self.forward(op, request).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn invoke_unit<R: Serialize>(&self, op: Operation, request: &R) -> BridgeResult<()> {
        self.forward(op, request).await?;
        Ok(())
    }
}

/// Hosts answer the literal string `"null"` (or nothing) when the
/// printer reports no encoding
fn decode_encoding(value: Value) -> BridgeResult<Option<EncodingResult>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s == "null" => Ok(None),
        other => Ok(Some(serde_json::from_value(other)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_encoding_null_sentinel() {
        assert_eq!(decode_encoding(Value::Null).unwrap(), None);
        assert_eq!(decode_encoding(json!("null")).unwrap(), None);

        let reported = decode_encoding(json!({
            "name": "windows-1252",
            "command": ["0x1B", "0x74", "0x10"]
        }))
        .unwrap();
        assert_eq!(reported.unwrap().name, "windows-1252");
    }
}
