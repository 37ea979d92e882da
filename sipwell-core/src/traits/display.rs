//! Display sink trait used by the renderer

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::signal::Signal;

use crate::bus::BusBusy;

/// Errors that can occur pushing a transfer to the display controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferError<E> {
    /// The bus reported an error mid-transfer
    Bus(E),
    /// Another transfer stayed pending past the wait limit
    BusBusy,
}

impl<E> From<BusBusy> for TransferError<E> {
    fn from(_: BusBusy) -> Self {
        TransferError::BusBusy
    }
}

/// Low-level flush primitives of a display controller
///
/// The renderer builds controller command sequences and pixel buffers; a
/// transport carries them. An empty `cmd` is a no-op, not an error.
pub trait DisplaySink {
    /// Transport error type
    type Error;

    /// Send a command with optional 8-bit parameters
    ///
    /// Always synchronous: returns once the last byte is on the wire.
    fn send_command(&mut self, cmd: &[u8], params: Option<&[u8]>) -> Result<(), Self::Error>;

    /// Send a command followed by a pixel payload
    ///
    /// The payload goes out as 16-bit MSB-first words (`params.len() / 2`
    /// of them). Completion is reported through the transport's
    /// [`FlushReady`] exactly once per transfer.
    fn send_data(&mut self, cmd: &[u8], params: &[u8]) -> Result<(), Self::Error>;
}

/// Receiver of the "pixel buffer free again" notification
pub trait FlushReady {
    /// The last data transfer completed; its source buffer may be reused
    fn flush_ready(&mut self);
}

impl<F: FnMut()> FlushReady for F {
    fn flush_ready(&mut self) {
        self()
    }
}

/// Flush-ready signal a renderer can poll from its own loop
///
/// Raised by the transport on completion; the renderer clears it with
/// `try_take`.
pub type FlushSignal = Signal<CriticalSectionRawMutex, ()>;

/// [`FlushReady`] that raises an embassy-sync [`Signal`]
pub struct SignalFlush<'a, M: RawMutex>(pub &'a Signal<M, ()>);

impl<M: RawMutex> FlushReady for SignalFlush<'_, M> {
    fn flush_ready(&mut self) {
        self.0.signal(());
    }
}
