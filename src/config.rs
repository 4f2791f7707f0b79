/// How the code table is stored in a compressed artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Every entry carries its symbol, code length and the code bits.
    #[default]
    Explicit,
    /// Entries carry only symbol and code length; codes are reassigned
    /// canonically (by length, then symbol) on both sides.
    Canonical,
}

impl TableFormat {
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            TableFormat::Explicit => 0,
            TableFormat::Canonical => 1,
        }
    }

    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(TableFormat::Explicit),
            1 => Some(TableFormat::Canonical),
            _ => None,
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Default)]
pub struct CodecConfig {
    pub table_format: TableFormat,
}

impl CodecConfig {
    pub fn canonical() -> Self {
        CodecConfig {
            table_format: TableFormat::Canonical,
        }
    }
}
