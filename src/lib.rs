//! # thermal-printer-bridge
//!
//! Cross-platform contract for ESC/POS thermal receipt printers reached
//! over Bluetooth, USB or TCP.
//!
//! ## Scope
//!
//! This crate owns the bridge, not the printer:
//! - wire-exact request and result shapes
//! - the closed [`Operation`] set
//! - [`ThermalPrinter`], the caller-side façade
//! - [`ThermalPrinterHandler`] and [`HandlerBridge`], the host-side seam
//!
//! Device enumeration, session handling, permission prompts, ESC/POS
//! command encoding and image rasterization all live behind the handler
//! seam in platform code. Each call is a single request/response pair
//! with no retries, timeouts, cancellation or connection pooling.
//!
//! ## Example
//!
//! ```ignore
//! use thermal_printer_bridge::{PrintRequest, PrinterTarget, ThermalPrinter};
//!
//! let printer = ThermalPrinter::new(bridge);
//!
//! let request = PrintRequest::new(
//!     PrinterTarget::tcp("192.168.1.50", 9100),
//!     "[C]<b>Hello</b>\n[L]Table 12\n",
//! );
//! printer.print_formatted_text_and_cut(&request).await?;
//! printer.disconnect_printer(&request.target).await?;
//! ```

mod bridge;
mod client;
mod dispatch;
mod error;
mod op;
mod types;

// Re-exports
pub use bridge::{NativeBridge, PLUGIN_NAME};
pub use client::ThermalPrinter;
pub use dispatch::{HandlerBridge, ThermalPrinterHandler};
pub use error::{BridgeError, BridgeResult, ErrorResult};
pub use op::Operation;
pub use types::{
    BitmapRequest, CharsetEncoding, ConnectionKind, DiscoveredPrinter, DiscoveryKind,
    EncodingResult, ListPrintersRequest, PermissionResult, PrintRequest, PrinterId, PrinterTarget,
};
