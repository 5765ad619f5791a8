/// Serial port adapters
mod serialport_lister;

pub use serialport_lister::SerialPortEnumerator;
