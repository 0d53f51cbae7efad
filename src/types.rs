//! Wire data shapes shared by both sides of the printer bridge
//!
//! Field names and optionality are fixed by the existing native
//! counterparts and must survive serialization exactly. Optional fields
//! are omitted from the serialized object when `None`, never emitted as
//! `null` keys.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Transport used to reach a printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Bluetooth,
    Usb,
    Tcp,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bluetooth => write!(f, "bluetooth"),
            Self::Usb => write!(f, "usb"),
            Self::Tcp => write!(f, "tcp"),
        }
    }
}

/// Transports that support device enumeration
///
/// TCP printers are addressed directly and cannot be listed, so the
/// discovery request is restricted to these two kinds at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryKind {
    Bluetooth,
    Usb,
}

/// Printer identifier
///
/// Bluetooth printers are addressed by MAC address or device name, USB
/// printers by numeric device id. The special value `"first"` selects
/// the first paired Bluetooth printer on hosts that support it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrinterId {
    Text(String),
    Number(u64),
}

impl From<&str> for PrinterId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PrinterId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for PrinterId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for PrinterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Character-set selection forwarded to the host
///
/// Hosts that receive no selection fall back to `windows-1252` with
/// charset id 16.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharsetEncoding {
    pub charset_name: String,
    pub charset_id: u8,
}

/// Selects the physical printer a call addresses
///
/// Only `kind` is always meaningful. The remaining fields tune the
/// host-side session and fall back to host defaults when omitted; this
/// crate never injects those defaults into the forwarded request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterTarget {
    /// Transport kind
    #[serde(rename = "type")]
    pub kind: ConnectionKind,

    /// Printer id (Bluetooth: address or name, USB: device id, tcp: unused)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PrinterId>,

    /// Printer IP address, tcp only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Printer TCP port, host default 9100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Paper feed distance after printing, in millimeters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mm_feed_paper: Option<f64>,

    /// Paper feed distance after printing, in printer dots (host default 20)
    ///
    /// Ignored when `mm_feed_paper` is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dots_feed_paper: Option<u32>,

    /// Print head resolution, host default 203
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printer_dpi: Option<u32>,

    /// Printable paper width in millimeters, host default 48
    #[serde(rename = "printerWidthMM", skip_serializing_if = "Option::is_none")]
    pub printer_width_mm: Option<f64>,

    /// Characters per line, host default 32
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printer_nbr_characters_per_line: Option<u32>,

    /// Character set the host selects on the printer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset_encoding: Option<CharsetEncoding>,
}

impl PrinterTarget {
    fn with_kind(kind: ConnectionKind) -> Self {
        Self {
            kind,
            id: None,
            address: None,
            port: None,
            mm_feed_paper: None,
            dots_feed_paper: None,
            printer_dpi: None,
            printer_width_mm: None,
            printer_nbr_characters_per_line: None,
            charset_encoding: None,
        }
    }

    /// Target a Bluetooth printer by address or name
    pub fn bluetooth(id: impl Into<PrinterId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::with_kind(ConnectionKind::Bluetooth)
        }
    }

    /// Target a USB printer by device id or product name
    pub fn usb(id: impl Into<PrinterId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::with_kind(ConnectionKind::Usb)
        }
    }

    /// Target a network printer by address and port
    pub fn tcp(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: Some(address.into()),
            port: Some(port),
            ..Self::with_kind(ConnectionKind::Tcp)
        }
    }

    /// Select a character set for the session
    pub fn with_charset(mut self, name: impl Into<String>, id: u8) -> Self {
        self.charset_encoding = Some(CharsetEncoding {
            charset_name: name.into(),
            charset_id: id,
        });
        self
    }
}

/// Request for [`Operation::ListPrinters`](crate::Operation::ListPrinters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListPrintersRequest {
    /// Which transport to enumerate
    #[serde(rename = "type")]
    pub kind: DiscoveryKind,
}

/// A print job: target printer plus formatted-text markup
///
/// The markup syntax (`[C]`, `[L]`, `<b>`, ...) belongs to the host's
/// renderer and is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintRequest {
    #[serde(flatten)]
    pub target: PrinterTarget,
    pub text: String,
}

impl PrintRequest {
    pub fn new(target: PrinterTarget, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
        }
    }
}

/// A bitmap conversion job: target printer plus base64 image payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitmapRequest {
    #[serde(flatten)]
    pub target: PrinterTarget,
    /// Base64 encoded picture, optionally carrying a `data:...;base64,`
    /// prefix. Hosts reject images taller than 255px.
    pub base64: String,
}

impl BitmapRequest {
    pub fn new(target: PrinterTarget, base64: impl Into<String>) -> Self {
        Self {
            target,
            base64: base64.into(),
        }
    }

    /// Decode the image payload, tolerating a data-URL prefix
    ///
    /// The payload itself is forwarded verbatim; this helper exists for
    /// host implementations that need the raw bytes.
    pub fn image_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let raw = match self.base64.split_once(',') {
            Some((_, rest)) => rest,
            None => self.base64.as_str(),
        };
        STANDARD.decode(raw)
    }
}

/// A printer found by [`Operation::ListPrinters`](crate::Operation::ListPrinters)
///
/// Which subset is populated depends on the discovery kind: Bluetooth
/// entries carry address, bond state, name, device type and advertised
/// features (plus device class when the host exposes it); USB entries
/// carry product, manufacturer, device, serial and vendor data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredPrinter {
    // Bluetooth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bond_state: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Bluetooth device type (classic, LE or dual-mode)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<i32>,
    /// Service UUIDs advertised by the device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_class: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_device_class: Option<i32>,

    // USB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<u32>,
}

impl DiscoveredPrinter {
    /// Whether this entry came from Bluetooth discovery
    pub fn is_bluetooth(&self) -> bool {
        self.address.is_some()
    }

    /// Whether this entry came from USB discovery
    pub fn is_usb(&self) -> bool {
        self.device_id.is_some() || self.vendor_id.is_some()
    }
}

/// Outcome of a permission request
///
/// `granted` is the overall verdict. Hosts may attach a per-permission
/// breakdown (`BLUETOOTH`, `BLUETOOTH_ADMIN`, `BLUETOOTH_CONNECT`,
/// `BLUETOOTH_SCAN`, ...) which is preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionResult {
    pub granted: bool,
    #[serde(flatten)]
    pub permissions: BTreeMap<String, bool>,
}

/// Printer text encoding as reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingResult {
    /// Charset name, e.g. `windows-1252`
    pub name: String,
    /// ESC/POS command tokens that select this encoding, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_target_wire_names() {
        let target = PrinterTarget {
            mm_feed_paper: Some(10.0),
            dots_feed_paper: Some(20),
            printer_dpi: Some(203),
            printer_width_mm: Some(48.0),
            printer_nbr_characters_per_line: Some(32),
            charset_encoding: Some(CharsetEncoding {
                charset_name: "windows-1252".to_string(),
                charset_id: 16,
            }),
            ..PrinterTarget::tcp("192.168.1.50", 9100)
        };

        let value = serde_json::to_value(&target).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "tcp",
                "address": "192.168.1.50",
                "port": 9100,
                "mmFeedPaper": 10.0,
                "dotsFeedPaper": 20,
                "printerDpi": 203,
                "printerWidthMM": 48.0,
                "printerNbrCharactersPerLine": 32,
                "charsetEncoding": {
                    "charsetName": "windows-1252",
                    "charsetId": 16
                }
            })
        );
    }

    #[test]
    fn test_omitted_fields_stay_omitted() {
        let target = PrinterTarget::bluetooth("00:11:22:33:44:55");
        let value = serde_json::to_value(&target).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("port"));
        assert!(!obj.contains_key("address"));
        assert!(!obj.contains_key("charsetEncoding"));
        assert_eq!(obj.get("type"), Some(&json!("bluetooth")));
    }

    #[test]
    fn test_printer_id_accepts_string_and_number() {
        let text: PrinterId = serde_json::from_value(json!("first")).unwrap();
        assert_eq!(text, PrinterId::Text("first".to_string()));

        let number: PrinterId = serde_json::from_value(json!(1002)).unwrap();
        assert_eq!(number, PrinterId::Number(1002));
    }

    #[test]
    fn test_print_request_is_flat() {
        let request = PrintRequest::new(PrinterTarget::usb(7u64), "[C]Hello");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value.get("type"), Some(&json!("usb")));
        assert_eq!(value.get("id"), Some(&json!(7)));
        assert_eq!(value.get("text"), Some(&json!("[C]Hello")));
        assert!(value.get("target").is_none());
    }

    #[test]
    fn test_discovered_printer_predicates() {
        let bt: DiscoveredPrinter = serde_json::from_value(json!({
            "address": "00:11:22:33:44:55",
            "bondState": 12,
            "name": "Inner Printer",
            "type": 1,
            "features": ["00001101-0000-1000-8000-00805f9b34fb"]
        }))
        .unwrap();
        assert!(bt.is_bluetooth());
        assert!(!bt.is_usb());
        assert_eq!(bt.device_type, Some(1));

        let usb: DiscoveredPrinter = serde_json::from_value(json!({
            "productName": "TM-T20",
            "manufacturerName": "EPSON",
            "deviceId": 1002,
            "vendorId": 1208
        }))
        .unwrap();
        assert!(usb.is_usb());
        assert!(!usb.is_bluetooth());
    }

    #[test]
    fn test_permission_breakdown_round_trip() {
        let value = json!({
            "granted": true,
            "BLUETOOTH": false,
            "BLUETOOTH_CONNECT": true
        });

        let result: PermissionResult = serde_json::from_value(value.clone()).unwrap();
        assert!(result.granted);
        assert_eq!(result.permissions.get("BLUETOOTH_CONNECT"), Some(&true));
        assert_eq!(serde_json::to_value(&result).unwrap(), value);
    }

    #[test]
    fn test_image_bytes_strips_data_url_prefix() {
        let target = PrinterTarget::bluetooth("first");
        let plain = BitmapRequest::new(target.clone(), "aGVsbG8=");
        assert_eq!(plain.image_bytes().unwrap(), b"hello");

        let prefixed = BitmapRequest::new(target, "data:image/png;base64,aGVsbG8=");
        assert_eq!(prefixed.image_bytes().unwrap(), b"hello");
    }

    #[test]
    fn test_image_bytes_rejects_invalid_base64() {
        let request = BitmapRequest::new(PrinterTarget::bluetooth("first"), "not base64!");
        assert!(request.image_bytes().is_err());
    }
}
