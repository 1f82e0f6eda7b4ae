//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`ParallelInterface`]
//! struct for talking to the GC9106 over a bit-banged 8080-style parallel bus.
//!
//! ## Hardware Requirements
//!
//! The parallel bus requires 13 GPIO lines:
//! - **D[7..0]**: bidirectional data lines (output, input only while reading)
//! - **RD**: read strobe (output, active low)
//! - **WR**: write strobe (output, active low)
//! - **DC**: data/command select (output, low = command)
//! - **CS**: chip select (output, active low)
//! - **RST**: reset (output, active low)
//!
//! The data lines are abstracted by [`DataBus`]. [`PinBus`] implements it over
//! eight individual [`FlexPin`]s; boards that can write a whole GPIO port at
//! once can implement [`DataBus`] directly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use gc9106::{DataBus, DisplayInterface, ParallelInterface};
//! # use core::convert::Infallible;
//! # struct MockBus;
//! # impl DataBus for MockBus {
//! #     type Error = Infallible;
//! #     fn set_output(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_input(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn write_byte(&mut self, _byte: u8) -> Result<(), Infallible> { Ok(()) }
//! #     fn read_byte(&mut self) -> Result<u8, Infallible> { Ok(0) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // Create interface with the data bus and the five control pins
//! let mut interface = match ParallelInterface::new(MockBus, MockPin, MockPin, MockPin, MockPin, MockPin) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//!
//! // Hardware reset followed by software reset
//! let _ = interface.reset(true, true, &mut delay);
//!
//! // Read display status
//! let mut status = [0u8; 4];
//! let _ = interface.read_register(0x09, &mut status);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::command::SOFTWARE_RESET;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Time RST is held low during a hardware reset
pub const RESET_PULSE_MS: u32 = 5;

/// Time to wait after releasing RST before the next command
pub const RESET_SETTLE_MS: u32 = 15;

/// Time to wait after a software reset before the next command
pub const SOFTWARE_RESET_SETTLE_MS: u32 = 5;

/// A GPIO line whose direction can be switched at runtime
///
/// Needed for the data lines, which are read back during register reads.
/// Implement this for your HAL's flexible/open pin type.
pub trait FlexPin: OutputPin + InputPin {
    /// Reconfigure the pin as a floating input
    fn set_as_input(&mut self) -> Result<(), Self::Error>;

    /// Reconfigure the pin as a push-pull output
    fn set_as_output(&mut self) -> Result<(), Self::Error>;
}

/// An 8-bit bidirectional data bus (D[7..0])
pub trait DataBus {
    /// Error type for bus operations
    type Error: Debug;

    /// Drive all data lines (write direction)
    fn set_output(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Release all data lines (read direction)
    fn set_input(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Put `byte` on the data lines, D0 = LSB
    ///
    /// Only valid while the bus is in write direction.
    fn write_byte(&mut self, byte: u8) -> InterfaceResult<(), Self::Error>;

    /// Sample the data lines, D0 = LSB
    ///
    /// Only valid while the bus is in read direction.
    fn read_byte(&mut self) -> InterfaceResult<u8, Self::Error>;
}

/// [`DataBus`] built from eight individual [`FlexPin`]s
///
/// `pins[0]` is D0 (least significant bit), `pins[7]` is D7.
pub struct PinBus<P> {
    pins: [P; 8],
}

impl<P: FlexPin> PinBus<P> {
    /// Create a bus from D0..D7
    pub fn new(pins: [P; 8]) -> Self {
        Self { pins }
    }

    /// Give the pins back
    pub fn release(self) -> [P; 8] {
        self.pins
    }
}

impl<P: FlexPin> DataBus for PinBus<P> {
    type Error = P::Error;

    fn set_output(&mut self) -> InterfaceResult<(), Self::Error> {
        for pin in &mut self.pins {
            pin.set_as_output()?;
        }
        Ok(())
    }

    fn set_input(&mut self) -> InterfaceResult<(), Self::Error> {
        for pin in &mut self.pins {
            pin.set_as_input()?;
        }
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> InterfaceResult<(), Self::Error> {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            if byte & (1 << bit) != 0 {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }
        Ok(())
    }

    fn read_byte(&mut self) -> InterfaceResult<u8, Self::Error> {
        let mut byte = 0u8;
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            if pin.is_high()? {
                byte |= 1 << bit;
            }
        }
        Ok(byte)
    }
}

/// Trait for hardware interface to the GC9106 controller
///
/// This trait abstracts over the transport, allowing the
/// [`Display`](crate::display::Display) to be driven by the bit-banged
/// [`ParallelInterface`] or by a test double.
///
/// ## Implementing
///
/// Every call frames one complete command. Implementations must not return
/// with CS still asserted unless an error occurred, in which case the
/// controller has to be reset.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command with its parameters
    ///
    /// The implementation must:
    /// 1. Assert CS
    /// 2. Clock the opcode with DC low
    /// 3. Clock each parameter byte with DC high
    /// 4. Deassert CS
    ///
    /// `parameters` may be empty.
    fn write_command(&mut self, command: u8, parameters: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Read `buffer.len()` bytes from a register
    ///
    /// The implementation must clock the opcode like [`write_command`](Self::write_command),
    /// turn the data lines around, discard the first (dummy) read cycle and
    /// then fill `buffer` in order. The data lines are in write direction
    /// again when this returns.
    fn read_register(&mut self, command: u8, buffer: &mut [u8])
    -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// The implementation must:
    /// 1. Set RST low
    /// 2. Wait at least [`RESET_PULSE_MS`]
    /// 3. Set RST high
    /// 4. Wait at least [`RESET_SETTLE_MS`]
    fn hardware_reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Reset the controller
    ///
    /// A hardware reset always runs before the software reset when both are
    /// requested. The software reset waits [`SOFTWARE_RESET_SETTLE_MS`]
    /// before returning.
    fn reset<D: DelayNs>(
        &mut self,
        hardware: bool,
        software: bool,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error> {
        if hardware {
            self.hardware_reset(delay)?;
        }
        if software {
            self.write_command(SOFTWARE_RESET, &[])?;
            delay.delay_ms(SOFTWARE_RESET_SETTLE_MS);
        }
        Ok(())
    }
}

/// Errors that can occur at the interface level
///
/// Generic over data bus and control pin error types.
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// Data bus error
    Bus(BusErr),
    /// Control pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "Data bus error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// Bit-banged 8080 parallel interface
///
/// Implements [`DisplayInterface`] on top of a [`DataBus`] and five
/// embedded-hal output pins.
///
/// ## Type Parameters
///
/// * `BUS` - Data lines implementing [`DataBus`]
/// * `RD` - Read strobe implementing [`OutputPin`]
/// * `WR` - Write strobe implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `CS` - Chip select implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
///
/// No extra delays are inserted between strobe edges; GPIO toggling is slow
/// enough for the controller's 66ns write cycle on typical MCUs.
pub struct ParallelInterface<BUS, RD, WR, DC, CS, RST> {
    /// D[7..0]
    bus: BUS,
    /// Read strobe (active low)
    rd: RD,
    /// Write strobe (active low)
    wr: WR,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Chip select (active low)
    cs: CS,
    /// Reset pin (active low)
    rst: RST,
}

type ParallelError<BUS, PinErr> = InterfaceError<<BUS as DataBus>::Error, PinErr>;

impl<BUS, RD, WR, DC, CS, RST, PinErr> ParallelInterface<BUS, RD, WR, DC, CS, RST>
where
    BUS: DataBus,
    RD: OutputPin<Error = PinErr>,
    WR: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Create a new ParallelInterface
    ///
    /// Drives the idle levels: data lines as outputs, CS, DC, WR, RD and RST
    /// high. The controller is not reset.
    ///
    /// # Errors
    ///
    /// Returns an error if any pin cannot be driven.
    pub fn new(
        bus: BUS,
        rd: RD,
        wr: WR,
        dc: DC,
        cs: CS,
        rst: RST,
    ) -> InterfaceResult<Self, ParallelError<BUS, PinErr>> {
        let mut interface = Self {
            bus,
            rd,
            wr,
            dc,
            cs,
            rst,
        };
        interface.bus.set_output().map_err(InterfaceError::Bus)?;
        interface.cs.set_high().map_err(InterfaceError::Pin)?;
        interface.dc.set_high().map_err(InterfaceError::Pin)?;
        interface.wr.set_high().map_err(InterfaceError::Pin)?;
        interface.rd.set_high().map_err(InterfaceError::Pin)?;
        interface.rst.set_high().map_err(InterfaceError::Pin)?;
        Ok(interface)
    }

    /// Give the bus and pins back
    pub fn release(self) -> (BUS, RD, WR, DC, CS, RST) {
        (self.bus, self.rd, self.wr, self.dc, self.cs, self.rst)
    }

    /// Latch the byte on the data lines with one WR pulse
    fn strobe_write(&mut self) -> InterfaceResult<(), ParallelError<BUS, PinErr>> {
        self.wr.set_low().map_err(InterfaceError::Pin)?;
        self.wr.set_high().map_err(InterfaceError::Pin)
    }

    /// One RD pulse, sampling the bus while RD is low
    fn strobe_read(&mut self) -> InterfaceResult<u8, ParallelError<BUS, PinErr>> {
        self.rd.set_low().map_err(InterfaceError::Pin)?;
        let byte = self.bus.read_byte().map_err(InterfaceError::Bus)?;
        self.rd.set_high().map_err(InterfaceError::Pin)?;
        Ok(byte)
    }

    /// Assert CS and clock the opcode; leaves DC high and CS asserted
    fn command_phase(&mut self, command: u8) -> InterfaceResult<(), ParallelError<BUS, PinErr>> {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.bus.write_byte(command).map_err(InterfaceError::Bus)?;
        self.strobe_write()?;
        self.dc.set_high().map_err(InterfaceError::Pin)
    }
}

impl<BUS, RD, WR, DC, CS, RST, PinErr> DisplayInterface
    for ParallelInterface<BUS, RD, WR, DC, CS, RST>
where
    BUS: DataBus,
    RD: OutputPin<Error = PinErr>,
    WR: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = ParallelError<BUS, PinErr>;

    fn write_command(&mut self, command: u8, parameters: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.command_phase(command)?;
        for &parameter in parameters {
            self.bus.write_byte(parameter).map_err(InterfaceError::Bus)?;
            self.strobe_write()?;
        }
        self.cs.set_high().map_err(InterfaceError::Pin)
    }

    fn read_register(
        &mut self,
        command: u8,
        buffer: &mut [u8],
    ) -> InterfaceResult<(), Self::Error> {
        self.command_phase(command)?;
        self.bus.set_input().map_err(InterfaceError::Bus)?;

        // Dummy read cycle
        self.strobe_read()?;
        for byte in buffer.iter_mut() {
            *byte = self.strobe_read()?;
        }

        self.bus.set_output().map_err(InterfaceError::Bus)?;
        self.cs.set_high().map_err(InterfaceError::Pin)
    }

    fn hardware_reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        // Reset sequence: LOW -> wait 5ms -> HIGH -> wait 15ms
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Event {
        Pin(&'static str, bool),
        Data(u8),
        Input,
        Output,
        Sample,
        DelayMs(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct MockPin {
        name: &'static str,
        log: Log,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Pin(self.name, false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Pin(self.name, true));
            Ok(())
        }
    }

    struct MockBus {
        log: Log,
        responses: Vec<u8>,
    }

    impl DataBus for MockBus {
        type Error = Infallible;

        fn set_output(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push(Event::Output);
            Ok(())
        }
        fn set_input(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push(Event::Input);
            Ok(())
        }
        fn write_byte(&mut self, byte: u8) -> Result<(), Infallible> {
            self.log.borrow_mut().push(Event::Data(byte));
            Ok(())
        }
        fn read_byte(&mut self) -> Result<u8, Infallible> {
            self.log.borrow_mut().push(Event::Sample);
            if self.responses.is_empty() {
                Ok(0)
            } else {
                Ok(self.responses.remove(0))
            }
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::DelayMs(ms));
        }
    }

    type TestInterface = ParallelInterface<MockBus, MockPin, MockPin, MockPin, MockPin, MockPin>;

    fn pin(name: &'static str, log: &Log) -> MockPin {
        MockPin {
            name,
            log: log.clone(),
        }
    }

    fn test_interface(responses: &[u8]) -> (TestInterface, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let bus = MockBus {
            log: log.clone(),
            responses: responses.to_vec(),
        };
        let interface = ParallelInterface::new(
            bus,
            pin("rd", &log),
            pin("wr", &log),
            pin("dc", &log),
            pin("cs", &log),
            pin("rst", &log),
        )
        .unwrap();
        log.borrow_mut().clear();
        (interface, log)
    }

    fn wr_pulse() -> [Event; 2] {
        [Event::Pin("wr", false), Event::Pin("wr", true)]
    }

    #[test]
    fn test_new_drives_idle_levels() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let bus = MockBus {
            log: log.clone(),
            responses: Vec::new(),
        };
        let _interface = ParallelInterface::new(
            bus,
            pin("rd", &log),
            pin("wr", &log),
            pin("dc", &log),
            pin("cs", &log),
            pin("rst", &log),
        )
        .unwrap();
        let events = log.borrow();
        assert_eq!(events[0], Event::Output);
        for name in ["cs", "dc", "wr", "rd", "rst"] {
            assert!(events.contains(&Event::Pin(name, true)));
        }
        assert!(!events.iter().any(|e| matches!(e, Event::Pin(_, false))));
    }

    #[test]
    fn test_write_command_framing() {
        let (mut interface, log) = test_interface(&[]);
        interface.write_command(0x2A, &[0x00, 0x7F]).unwrap();

        let mut expected = Vec::new();
        expected.push(Event::Pin("cs", false));
        expected.push(Event::Pin("dc", false));
        expected.push(Event::Data(0x2A));
        expected.extend_from_slice(&wr_pulse());
        expected.push(Event::Pin("dc", true));
        expected.push(Event::Data(0x00));
        expected.extend_from_slice(&wr_pulse());
        expected.push(Event::Data(0x7F));
        expected.extend_from_slice(&wr_pulse());
        expected.push(Event::Pin("cs", true));

        assert_eq!(*log.borrow(), expected);
    }

    #[test]
    fn test_write_command_without_parameters() {
        let (mut interface, log) = test_interface(&[]);
        interface.write_command(0x29, &[]).unwrap();

        let events = log.borrow();
        let wr_lows = events
            .iter()
            .filter(|e| **e == Event::Pin("wr", false))
            .count();
        assert_eq!(wr_lows, 1);
        assert_eq!(events.first(), Some(&Event::Pin("cs", false)));
        assert_eq!(events.last(), Some(&Event::Pin("cs", true)));
    }

    #[test]
    fn test_read_register_discards_first_cycle() {
        let (mut interface, log) = test_interface(&[0xEE, 0x12, 0x34, 0x56]);
        let mut buffer = [0u8; 3];
        interface.read_register(0x04, &mut buffer).unwrap();
        assert_eq!(buffer, [0x12, 0x34, 0x56]);

        let events = log.borrow();
        let rd_lows = events
            .iter()
            .filter(|e| **e == Event::Pin("rd", false))
            .count();
        assert_eq!(rd_lows, 4);
        let wr_lows = events
            .iter()
            .filter(|e| **e == Event::Pin("wr", false))
            .count();
        assert_eq!(wr_lows, 1);
    }

    #[test]
    fn test_read_register_restores_output_direction() {
        let (mut interface, log) = test_interface(&[0x00, 0xAA]);
        let mut buffer = [0u8; 1];
        interface.read_register(0x09, &mut buffer).unwrap();

        let events = log.borrow();
        let input_at = events.iter().position(|e| *e == Event::Input).unwrap();
        let output_at = events.iter().rposition(|e| *e == Event::Output).unwrap();
        let first_sample = events.iter().position(|e| *e == Event::Sample).unwrap();
        let last_sample = events.iter().rposition(|e| *e == Event::Sample).unwrap();
        assert!(input_at < first_sample);
        assert!(last_sample < output_at);
        assert_eq!(events.last(), Some(&Event::Pin("cs", true)));
        // the opcode is clocked before turning the bus around
        let opcode_at = events.iter().position(|e| *e == Event::Data(0x09)).unwrap();
        assert!(opcode_at < input_at);
    }

    #[test]
    fn test_read_register_samples_while_rd_low() {
        let (mut interface, log) = test_interface(&[0x00, 0x01]);
        let mut buffer = [0u8; 1];
        interface.read_register(0x09, &mut buffer).unwrap();

        let events = log.borrow();
        for (index, event) in events.iter().enumerate() {
            if *event == Event::Sample {
                assert_eq!(events[index - 1], Event::Pin("rd", false));
                assert_eq!(events[index + 1], Event::Pin("rd", true));
            }
        }
    }

    #[test]
    fn test_read_register_empty_buffer_still_clocks_dummy() {
        let (mut interface, log) = test_interface(&[]);
        let mut buffer = [0u8; 0];
        interface.read_register(0x00, &mut buffer).unwrap();
        let samples = log
            .borrow()
            .iter()
            .filter(|e| **e == Event::Sample)
            .count();
        assert_eq!(samples, 1);
    }

    #[test]
    fn test_hardware_reset_timing() {
        let (mut interface, log) = test_interface(&[]);
        let mut delay = MockDelay { log: log.clone() };
        interface.reset(true, false, &mut delay).unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Pin("rst", false),
                Event::DelayMs(RESET_PULSE_MS),
                Event::Pin("rst", true),
                Event::DelayMs(RESET_SETTLE_MS),
            ]
        );
    }

    #[test]
    fn test_software_reset_sends_opcode_and_waits() {
        let (mut interface, log) = test_interface(&[]);
        let mut delay = MockDelay { log: log.clone() };
        interface.reset(false, true, &mut delay).unwrap();

        let events = log.borrow();
        assert!(!events.iter().any(|e| matches!(e, Event::Pin("rst", _))));
        assert!(events.contains(&Event::Data(SOFTWARE_RESET)));
        assert_eq!(events.last(), Some(&Event::DelayMs(SOFTWARE_RESET_SETTLE_MS)));
    }

    #[test]
    fn test_hardware_reset_precedes_software_reset() {
        let (mut interface, log) = test_interface(&[]);
        let mut delay = MockDelay { log: log.clone() };
        interface.reset(true, true, &mut delay).unwrap();

        let events = log.borrow();
        let rst_release = events
            .iter()
            .position(|e| *e == Event::Pin("rst", true))
            .unwrap();
        let opcode = events
            .iter()
            .position(|e| *e == Event::Data(SOFTWARE_RESET))
            .unwrap();
        assert!(rst_release < opcode);
    }

    struct MockFlexPin {
        index: u8,
        log: Rc<RefCell<Vec<(u8, bool)>>>,
        input_level: bool,
        is_output: bool,
    }

    impl ErrorType for MockFlexPin {
        type Error = Infallible;
    }

    impl OutputPin for MockFlexPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push((self.index, false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push((self.index, true));
            Ok(())
        }
    }

    impl InputPin for MockFlexPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.input_level)
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.input_level)
        }
    }

    impl FlexPin for MockFlexPin {
        fn set_as_input(&mut self) -> Result<(), Self::Error> {
            self.is_output = false;
            Ok(())
        }
        fn set_as_output(&mut self) -> Result<(), Self::Error> {
            self.is_output = true;
            Ok(())
        }
    }

    fn flex_pins(levels: u8, log: &Rc<RefCell<Vec<(u8, bool)>>>) -> [MockFlexPin; 8] {
        core::array::from_fn(|i| MockFlexPin {
            index: i as u8,
            log: log.clone(),
            input_level: levels & (1 << i) != 0,
            is_output: true,
        })
    }

    #[test]
    fn test_pin_bus_write_is_lsb_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = PinBus::new(flex_pins(0, &log));
        bus.write_byte(0b1000_0101).unwrap();
        let levels: Vec<(u8, bool)> = log.borrow().clone();
        assert_eq!(
            levels,
            [
                (0, true),
                (1, false),
                (2, true),
                (3, false),
                (4, false),
                (5, false),
                (6, false),
                (7, true),
            ]
        );
    }

    #[test]
    fn test_pin_bus_read_and_direction() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = PinBus::new(flex_pins(0xA6, &log));
        bus.set_input().unwrap();
        assert_eq!(bus.read_byte().unwrap(), 0xA6);
        bus.set_output().unwrap();
        let pins = bus.release();
        assert!(pins.iter().all(|p| p.is_output));
    }
}
