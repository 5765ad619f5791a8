/// Process adapters wrapping external tools
mod idf_flasher;

pub use idf_flasher::IdfPyFlasher;
