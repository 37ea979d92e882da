//! Display transport drivers

pub mod st7789;
pub mod transport;

pub use st7789::St7789Ext;
pub use transport::SpiDisplay;
