//! ST7789 command set
//!
//! Controller-level helpers layered over any [`DisplaySink`]. They only
//! build command sequences; all bus discipline stays in the transport.

use embedded_hal::delay::DelayNs;
use sipwell_core::traits::DisplaySink;

/// ST7789 commands
pub mod command {
    pub const NOP: u8 = 0x00;
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A; // Column address set
    pub const RASET: u8 = 0x2B; // Row address set
    pub const RAMWR: u8 = 0x2C; // Memory write
    pub const MADCTL: u8 = 0x36; // Memory access control
    pub const COLMOD: u8 = 0x3A; // Interface pixel format
}

/// COLMOD: 16 bits per pixel (RGB565)
pub const COLMOD_RGB565: u8 = 0x55;

/// MADCTL: portrait, top-left origin, RGB order
pub const MADCTL_PORTRAIT: u8 = 0x00;

/// Controller busy after a software reset
const SWRESET_WAIT_MS: u32 = 150;

/// Controller busy after leaving sleep
const SLPOUT_WAIT_MS: u32 = 120;

/// ST7789 operations over a display sink
pub trait St7789Ext: DisplaySink {
    /// Set the inclusive drawing window for the next memory write
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Self::Error> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        self.send_command(&[command::CASET], Some(&[x0h, x0l, x1h, x1l]))?;

        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.send_command(&[command::RASET], Some(&[y0h, y0l, y1h, y1l]))
    }

    /// Write RGB565 pixels (two bytes each, high byte first) into the window
    fn write_pixels(&mut self, pixels: &[u8]) -> Result<(), Self::Error> {
        self.send_data(&[command::RAMWR], pixels)
    }

    /// Bring the controller from reset to display-on in RGB565 portrait
    fn init_sequence<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        self.send_command(&[command::SWRESET], None)?;
        delay.delay_ms(SWRESET_WAIT_MS);
        self.send_command(&[command::SLPOUT], None)?;
        delay.delay_ms(SLPOUT_WAIT_MS);

        self.send_command(&[command::COLMOD], Some(&[COLMOD_RGB565]))?;
        self.send_command(&[command::MADCTL], Some(&[MADCTL_PORTRAIT]))?;
        // IPS panels need inversion on for correct colors
        self.send_command(&[command::INVON], None)?;
        self.send_command(&[command::NORON], None)?;
        self.send_command(&[command::DISPON], None)
    }

    /// Turn the panel output on or off without touching display memory
    fn set_display_on(&mut self, on: bool) -> Result<(), Self::Error> {
        let cmd = if on { command::DISPON } else { command::DISPOFF };
        self.send_command(&[cmd], None)
    }
}

impl<T: DisplaySink + ?Sized> St7789Ext for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Command(u8, Option<Vec<u8, 4>>),
        Data(u8, usize),
    }

    /// Sink that records calls instead of driving a bus
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call, 16>,
    }

    impl DisplaySink for Recorder {
        type Error = ();

        fn send_command(&mut self, cmd: &[u8], params: Option<&[u8]>) -> Result<(), ()> {
            let params = params.map(|p| Vec::from_slice(p).unwrap());
            self.calls.push(Call::Command(cmd[0], params)).unwrap();
            Ok(())
        }

        fn send_data(&mut self, cmd: &[u8], params: &[u8]) -> Result<(), ()> {
            self.calls.push(Call::Data(cmd[0], params.len())).unwrap();
            Ok(())
        }
    }

    struct RecordingDelay<'r> {
        calls: &'r mut Vec<u32, 4>,
    }

    impl DelayNs for RecordingDelay<'_> {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.calls.push(ms).unwrap();
        }
    }

    fn params(bytes: &[u8]) -> Option<Vec<u8, 4>> {
        Some(Vec::from_slice(bytes).unwrap())
    }

    #[test]
    fn test_set_window_big_endian() {
        let mut sink = Recorder::default();
        sink.set_window(0, 16, 239, 319).unwrap();
        assert_eq!(
            sink.calls.as_slice(),
            &[
                Call::Command(command::CASET, params(&[0x00, 0x00, 0x00, 0xEF])),
                Call::Command(command::RASET, params(&[0x00, 0x10, 0x01, 0x3F])),
            ]
        );
    }

    #[test]
    fn test_write_pixels_is_memory_write() {
        let mut sink = Recorder::default();
        sink.write_pixels(&[0u8; 480]).unwrap();
        assert_eq!(sink.calls.as_slice(), &[Call::Data(command::RAMWR, 480)]);
    }

    #[test]
    fn test_init_sequence() {
        let mut sink = Recorder::default();
        let mut delays = Vec::new();
        sink.init_sequence(&mut RecordingDelay { calls: &mut delays })
            .unwrap();

        assert_eq!(delays.as_slice(), &[SWRESET_WAIT_MS, SLPOUT_WAIT_MS]);
        assert_eq!(
            sink.calls.as_slice(),
            &[
                Call::Command(command::SWRESET, None),
                Call::Command(command::SLPOUT, None),
                Call::Command(command::COLMOD, params(&[COLMOD_RGB565])),
                Call::Command(command::MADCTL, params(&[MADCTL_PORTRAIT])),
                Call::Command(command::INVON, None),
                Call::Command(command::NORON, None),
                Call::Command(command::DISPON, None),
            ]
        );
    }

    #[test]
    fn test_display_on_off() {
        let mut sink = Recorder::default();
        sink.set_display_on(false).unwrap();
        sink.set_display_on(true).unwrap();
        assert_eq!(
            sink.calls.as_slice(),
            &[
                Call::Command(command::DISPOFF, None),
                Call::Command(command::DISPON, None),
            ]
        );
    }
}
