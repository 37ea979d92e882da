//! XPT2046 resistive touch digitizer
//!
//! The digitizer pulls its PENIRQ line low when the panel is pressed. The
//! edge interrupt only records that a sample is wanted; the bus work
//! happens in [`Xpt2046::tick`], called from the main loop. While a touch
//! stays valid the driver resamples it every `debounce_ms` from a one-shot
//! alarm instead of the edge, and re-arms the edge once a sample reads as
//! released.
//!
//! Each axis is read with a single control byte followed by two dummy
//! bytes. The 12-bit conversion arrives MSB first in the top bits of the
//! two response bytes.

use sipwell_core::config::TouchConfig;
use sipwell_core::touch::{raw_reading, AcquisitionState, TouchShared};
use sipwell_core::traits::TouchPoint;
use sipwell_hal::spi::{Mode, SpiConfig};
use sipwell_hal::{EdgeInterrupt, OneShotAlarm, OutputPin, SpiBus};

use crate::line::Asserted;

/// Start bit, Y channel, 12-bit differential, power down between samples
pub const READ_Y: u8 = 0b1001_0000;

/// Start bit, X channel, 12-bit differential, power down between samples
pub const READ_X: u8 = 0b1101_0000;

/// Byte clocked out while the conversion result is read
const DUMMY: u8 = 0x00;

/// Touch driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError<E> {
    /// The digitizer bus failed mid-sample
    Spi(E),
}

/// Acquisition counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchStats {
    /// Samples started by a pen-down edge
    pub edge_samples: u32,
    /// Samples started by the debounce alarm
    pub resamples: u32,
    /// Samples published as a valid touch
    pub valid_samples: u32,
    /// Samples published as a release
    pub releases: u32,
    /// Axis readings outside the calibration window
    pub clipped_readings: u32,
    /// Samples abandoned on a bus error
    pub bus_errors: u32,
    /// Edges whose first sample read as "not pressed"
    pub spurious_edges: u32,
    /// Edges ignored because a sample was already in progress
    pub ignored_edges: u32,
}

/// Bus setup the digitizer expects: mode 0 at the configured clock
pub const fn bus_config(config: &TouchConfig) -> SpiConfig {
    SpiConfig::new(config.spi_frequency_hz, Mode::Mode0)
}

/// Pen-down edge interrupt handler
///
/// Acknowledges and disarms the edge, then flags a sample for the next
/// [`Xpt2046::tick`]. Returns `false` if the edge arrived while a sample
/// or debounce was already in progress.
pub fn on_pen_edge<I: EdgeInterrupt + ?Sized>(shared: &TouchShared, irq: &I) -> bool {
    irq.acknowledge();
    irq.set_armed(false);
    shared.enter_sampling_from_edge()
}

/// Debounce alarm callback
///
/// Flags a resample of a touch that was valid at the last sample.
pub fn on_debounce_alarm(shared: &TouchShared) -> bool {
    shared.on_debounce_elapsed()
}

/// XPT2046 driver
pub struct Xpt2046<'a, SPI, CS, IRQ, ALARM> {
    spi: SPI,
    cs: CS,
    irq: IRQ,
    alarm: ALARM,
    shared: &'a TouchShared,
    config: TouchConfig,
    stats: TouchStats,
    /// The pending sample was scheduled by the alarm, not an edge
    resampling: bool,
}

impl<'a, SPI, CS, IRQ, ALARM> Xpt2046<'a, SPI, CS, IRQ, ALARM>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: EdgeInterrupt,
    ALARM: OneShotAlarm,
{
    /// Create a new driver
    ///
    /// The bus must already be configured for the digitizer (mode 0,
    /// `config.spi_frequency_hz`). Call [`init`](Self::init) before the
    /// first [`tick`](Self::tick).
    pub fn new(
        spi: SPI,
        cs: CS,
        irq: IRQ,
        alarm: ALARM,
        shared: &'a TouchShared,
        config: TouchConfig,
    ) -> Self {
        Self {
            spi,
            cs,
            irq,
            alarm,
            shared,
            config,
            stats: TouchStats::default(),
            resampling: false,
        }
    }

    /// Release the chip select, clear any latched touch and arm the edge
    pub fn init(&mut self) {
        self.cs.set_high();
        self.shared.reset();
        self.resampling = false;
        self.irq.acknowledge();
        self.irq.set_armed(true);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "touch: digitizer armed, debounce {=u32}ms",
            self.config.debounce_ms
        );
    }

    /// Run one polled acquisition step
    ///
    /// Does nothing unless an edge or the debounce alarm flagged a sample.
    /// Otherwise reads both axes, publishes the result and returns it. A
    /// valid touch schedules a resample after `debounce_ms`; a release (or
    /// a bus error) re-arms the edge interrupt and returns to `Idle`.
    pub fn tick(&mut self) -> Result<Option<TouchPoint>, TouchError<SPI::Error>> {
        if !self.shared.sample_pending() {
            return Ok(None);
        }

        let resample = core::mem::take(&mut self.resampling);
        if resample {
            self.stats.resamples = self.stats.resamples.wrapping_add(1);
        } else {
            self.stats.edge_samples = self.stats.edge_samples.wrapping_add(1);
        }

        let (raw_x, raw_y) = match self.read_position() {
            Ok(raw) => raw,
            Err(e) => {
                self.stats.bus_errors = self.stats.bus_errors.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("touch: sample failed, re-arming");
                self.rearm();
                return Err(TouchError::Spi(e));
            }
        };

        for (window, raw) in [(&self.config.x, raw_x), (&self.config.y, raw_y)] {
            if window.clips(raw) {
                self.stats.clipped_readings = self.stats.clipped_readings.wrapping_add(1);
            }
        }

        let x = self.config.x.sanitise(raw_x);
        let y = self.config.y.sanitise(raw_y);

        // 0 on either axis reads as "not pressed"
        if x == 0 || y == 0 {
            self.shared.publish_release();
            self.stats.releases = self.stats.releases.wrapping_add(1);
            if !resample {
                self.stats.spurious_edges = self.stats.spurious_edges.wrapping_add(1);
            }
            self.rearm();

            #[cfg(feature = "defmt")]
            defmt::debug!("touch: released (raw {=u16}, {=u16})", raw_x, raw_y);
            return Ok(Some(self.shared.peek()));
        }

        let point = TouchPoint::touched(x, y);
        self.shared.publish(point);
        self.shared.enter_debounce();
        self.resampling = true;
        self.alarm.schedule_once(self.config.debounce_ms);
        self.stats.valid_samples = self.stats.valid_samples.wrapping_add(1);

        #[cfg(feature = "defmt")]
        defmt::debug!("touch: ({=u16}, {=u16})", x, y);
        Ok(Some(point))
    }

    /// Current acquisition state
    pub fn state(&self) -> AcquisitionState {
        self.shared.state()
    }

    /// Acquisition counters
    pub fn stats(&self) -> TouchStats {
        TouchStats {
            ignored_edges: self.shared.ignored_edges(),
            ..self.stats
        }
    }

    /// Release the peripherals
    pub fn release(self) -> (SPI, CS, IRQ, ALARM) {
        (self.spi, self.cs, self.irq, self.alarm)
    }

    /// Read both axes under one chip-select assertion, Y first
    fn read_position(&mut self) -> Result<(u16, u16), SPI::Error> {
        let _cs = Asserted::new(&mut self.cs);
        let y = read_channel(&mut self.spi, READ_Y)?;
        let x = read_channel(&mut self.spi, READ_X)?;
        Ok((x, y))
    }

    fn rearm(&mut self) {
        self.shared.begin_rearm();
        self.irq.set_armed(true);
        // An edge may already have moved us back to Sampling
        self.shared.finish_rearm();
    }
}

fn read_channel<SPI: SpiBus>(spi: &mut SPI, control: u8) -> Result<u16, SPI::Error> {
    let mut response = [0u8; 2];
    spi.write(&[control])?;
    spi.read(DUMMY, &mut response)?;
    Ok(raw_reading(response))
}
