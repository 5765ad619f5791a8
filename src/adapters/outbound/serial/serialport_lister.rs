use crate::ports::outbound::{SerialPortDescription, SerialPortLister};
use crate::shared::Result;
use anyhow::Context;
use serialport::{SerialPortInfo, SerialPortType, UsbPortInfo};

/// SerialPortEnumerator adapter listing ports through the serialport crate
pub struct SerialPortEnumerator;

impl SerialPortEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SerialPortEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_usb(info: &UsbPortInfo) -> String {
    let name = info
        .product
        .as_deref()
        .or(info.manufacturer.as_deref())
        .unwrap_or("USB serial device");
    format!("{} ({:04x}:{:04x})", name, info.vid, info.pid)
}

fn describe(port: &SerialPortInfo) -> SerialPortDescription {
    let description = match &port.port_type {
        SerialPortType::UsbPort(info) => describe_usb(info),
        SerialPortType::PciPort => "PCI serial port".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth serial port".to_string(),
        SerialPortType::Unknown => "n/a".to_string(),
    };
    SerialPortDescription {
        device: port.port_name.clone(),
        description,
    }
}

impl SerialPortLister for SerialPortEnumerator {
    fn list_ports(&self) -> Result<Vec<SerialPortDescription>> {
        let mut ports: Vec<SerialPortDescription> = serialport::available_ports()
            .context("Failed to enumerate serial ports")?
            .iter()
            .map(describe)
            .collect();
        ports.sort_by(|a, b| a.device.cmp(&b.device));
        log::debug!("found {} serial port(s)", ports.len());
        Ok(ports)
    }
}
