//! Container sniffing by magic bytes

const ZIP_MAGIC: [u8; 2] = [0x50, 0x4b];
const OLE_MAGIC: [u8; 8] = [0xd0, 0xcf, 0x11, 0xe0, 0xa1, 0xb1, 0x1a, 0xe1];

/// Physical container of an input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// ZIP archive (xlsx, xlsm, xlsb, ods)
    Zip,
    /// OLE compound document (legacy xls)
    Ole,
    /// Anything else
    Unknown,
}

impl Container {
    /// Whether a workbook reader should be attempted
    pub fn is_workbook(&self) -> bool {
        matches!(self, Container::Zip | Container::Ole)
    }
}

/// Identify the container from the leading bytes
pub fn sniff(bytes: &[u8]) -> Container {
    if bytes.starts_with(&ZIP_MAGIC) {
        Container::Zip
    } else if bytes.starts_with(&OLE_MAGIC) {
        Container::Ole
    } else {
        Container::Unknown
    }
}
