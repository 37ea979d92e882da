//! Adapters from `embedded-hal` 1.0 onto the Sipwell traits
//!
//! Lets a board crate hand chip HAL types (embassy-rp `Output`, blocking
//! `Spi`, ...) straight to the drivers.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin as EhOutputPin;
use embedded_hal::spi::SpiBus as EhSpiBus;

use crate::gpio::OutputPin;
use crate::spi::{FrameFormat, FramedSpiBus, SpiBus};

/// Bytes staged per bus write when expanding 16-bit words
const WORD_CHUNK_BYTES: usize = 64;

/// Output line backed by an infallible embedded-hal pin
///
/// The driven level is tracked locally so reading it back never touches
/// the hardware.
#[derive(Debug)]
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P> EhOutput<P>
where
    P: EhOutputPin<Error = Infallible>,
{
    /// Wrap `pin`, driving it to `initial_high`
    pub fn new(pin: P, initial_high: bool) -> Self {
        let mut out = Self {
            pin,
            high: initial_high,
        };
        out.set_state(initial_high);
        out
    }

    /// Return the wrapped pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: EhOutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.high = true,
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.high = false,
            Err(never) => match never {},
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// SPI bus backed by an embedded-hal 8-bit bus
///
/// Controllers reachable only through an 8-bit embedded-hal bus cannot
/// change their frame width. In 16-bit mode each word is sent as two 8-bit
/// frames, high byte first, which is bit-identical on the wire while
/// chip-select stays asserted.
#[derive(Debug)]
pub struct EhSpi<B> {
    bus: B,
    format: FrameFormat,
}

impl<B: EhSpiBus<u8>> EhSpi<B> {
    /// Wrap `bus`, starting in 8-bit frame format
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            format: FrameFormat::Bits8,
        }
    }

    /// Return the wrapped bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: EhSpiBus<u8>> SpiBus for EhSpi<B> {
    type Error = B::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)?;
        self.bus.flush()
    }

    fn read(&mut self, fill: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        buf.fill(fill);
        self.bus.transfer_in_place(buf)?;
        self.bus.flush()
    }
}

impl<B: EhSpiBus<u8>> FramedSpiBus for EhSpi<B> {
    fn set_frame_format(&mut self, format: FrameFormat) -> Result<(), Self::Error> {
        self.format = format;
        Ok(())
    }

    fn frame_format(&self) -> FrameFormat {
        self.format
    }

    fn write_words(&mut self, words: &[u16]) -> Result<(), Self::Error> {
        let mut staged = [0u8; WORD_CHUNK_BYTES];
        for chunk in words.chunks(WORD_CHUNK_BYTES / 2) {
            for (slot, word) in staged.chunks_exact_mut(2).zip(chunk) {
                slot.copy_from_slice(&word.to_be_bytes());
            }
            self.bus.write(&staged[..chunk.len() * 2])?;
        }
        self.bus.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal::spi::ErrorType as SpiErrorType;

    #[derive(Default)]
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl PinErrorType for MockPin {
        type Error = Infallible;
    }

    impl EhOutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    /// Records every byte written, answers reads with an incrementing count
    struct MockBus {
        sent: [u8; 256],
        len: usize,
        writes: u32,
        flushes: u32,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                sent: [0; 256],
                len: 0,
                writes: 0,
                flushes: 0,
            }
        }

        fn sent(&self) -> &[u8] {
            &self.sent[..self.len]
        }

        fn record(&mut self, data: &[u8]) {
            self.sent[self.len..self.len + data.len()].copy_from_slice(data);
            self.len += data.len();
        }
    }

    impl SpiErrorType for MockBus {
        type Error = Infallible;
    }

    impl EhSpiBus<u8> for MockBus {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Infallible> {
            for (i, word) in words.iter_mut().enumerate() {
                *word = i as u8;
            }
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
            self.writes += 1;
            self.record(words);
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Infallible> {
            self.record(write);
            self.read(read)
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Infallible> {
            let mut sent = [0u8; 16];
            sent[..words.len()].copy_from_slice(words);
            self.record(&sent[..words.len()]);
            self.read(words)
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_output_tracks_level() {
        let mut out = EhOutput::new(MockPin::default(), true);
        assert!(out.is_set_high());

        out.set_low();
        assert!(out.is_set_low());

        let pin = out.release();
        assert!(!pin.high);
        assert_eq!(pin.writes, 2);
    }

    #[test]
    fn test_read_clocks_out_fill_byte() {
        let mut spi = EhSpi::new(MockBus::new());
        let mut buf = [0xAA; 2];
        spi.read(0x00, &mut buf).unwrap();

        assert_eq!(buf, [0, 1]);
        let bus = spi.release();
        assert_eq!(bus.sent(), &[0x00, 0x00]);
        assert_eq!(bus.flushes, 1);
    }

    #[test]
    fn test_words_sent_high_byte_first() {
        let mut spi = EhSpi::new(MockBus::new());
        spi.set_frame_format(FrameFormat::Bits16).unwrap();
        assert_eq!(spi.frame_format(), FrameFormat::Bits16);

        spi.write_words(&[0x1234, 0xABCD]).unwrap();
        assert_eq!(spi.release().sent(), &[0x12, 0x34, 0xAB, 0xCD]);
    }

    #[test]
    fn test_long_word_run_is_chunked() {
        let mut spi = EhSpi::new(MockBus::new());
        spi.set_frame_format(FrameFormat::Bits16).unwrap();

        let words = [0xF800u16; 40];
        spi.write_words(&words).unwrap();

        let bus = spi.release();
        assert_eq!(bus.writes, 2);
        assert_eq!(bus.sent().len(), 80);
        assert!(bus.sent().chunks_exact(2).all(|pair| pair == [0xF8, 0x00]));
        assert_eq!(bus.flushes, 1);
    }
}
