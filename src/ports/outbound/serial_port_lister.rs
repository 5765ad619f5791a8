use crate::shared::Result;

/// A serial device as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialPortDescription {
    pub device: String,
    pub description: String,
}

/// SerialPortLister port for enumerating serial devices
pub trait SerialPortLister {
    fn list_ports(&self) -> Result<Vec<SerialPortDescription>>;
}
