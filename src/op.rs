//! The fixed set of bridge operations

use std::fmt;
use std::str::FromStr;

use crate::error::BridgeError;

/// The eight operations the native handler understands
///
/// A closed enumeration rather than stringly-typed method names: a
/// misspelled method cannot compile, and dispatch over the set is
/// exhaustiveness-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListPrinters,
    PrintFormattedText,
    PrintFormattedTextAndCut,
    GetEncoding,
    DisconnectPrinter,
    RequestPermissions,
    RequestBtPermissions,
    BitmapToHexadecimalString,
}

impl Operation {
    /// All operations, in registration order
    pub const ALL: [Operation; 8] = [
        Operation::ListPrinters,
        Operation::PrintFormattedText,
        Operation::PrintFormattedTextAndCut,
        Operation::GetEncoding,
        Operation::DisconnectPrinter,
        Operation::RequestPermissions,
        Operation::RequestBtPermissions,
        Operation::BitmapToHexadecimalString,
    ];

    /// Wire method name, exactly as the native counterparts register it
    pub const fn name(self) -> &'static str {
        match self {
            Self::ListPrinters => "listPrinters",
            Self::PrintFormattedText => "printFormattedText",
            Self::PrintFormattedTextAndCut => "printFormattedTextAndCut",
            Self::GetEncoding => "getEncoding",
            Self::DisconnectPrinter => "disconnectPrinter",
            Self::RequestPermissions => "requestPermissions",
            Self::RequestBtPermissions => "requestBTPermissions",
            Self::BitmapToHexadecimalString => "bitmapToHexadecimalString",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| BridgeError::UnknownOperation(s.to_string()))
    }
}
