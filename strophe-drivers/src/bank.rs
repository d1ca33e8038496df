//! Actuator bank driver
//!
//! Maps the named output lines of [`strophe_core::traits::Actuators`] onto
//! concrete GPIO and PWM peripherals. Writes are cached: re-asserting the
//! level a line already holds touches no hardware, so the sequencer and the
//! safe-state sweep can write unconditionally.
//!
//! PWM duty is expressed in core units (0..=[`MAX_DUTY`]) and rescaled to
//! whatever resolution the underlying channel reports.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use strophe_core::traits::{Actuators, PwmLine, SwitchLine, MAX_DUTY};

/// The full bank of prop outputs
///
/// Four binary switches (LED strips, cane motor, clutch) and two PWM
/// retraction motor channels.
pub struct ActuatorBank<O, P> {
    led_strip1: O,
    led_strip2: O,
    cane_motor: O,
    clutch: O,
    retract1: P,
    retract2: P,
    /// Last written level per switch line, in [`SwitchLine::ALL`] order
    switch_cache: [Option<bool>; 4],
    /// Last written core-unit duty per PWM line, in [`PwmLine::ALL`] order
    duty_cache: [Option<u16>; 2],
}

fn switch_index(line: SwitchLine) -> usize {
    match line {
        SwitchLine::LedStrip1 => 0,
        SwitchLine::LedStrip2 => 1,
        SwitchLine::CaneMotor => 2,
        SwitchLine::Clutch => 3,
    }
}

fn pwm_index(line: PwmLine) -> usize {
    match line {
        PwmLine::RetractMotor1 => 0,
        PwmLine::RetractMotor2 => 1,
    }
}

impl<O: OutputPin, P: SetDutyCycle> ActuatorBank<O, P> {
    /// Create a bank from its pins and PWM channels
    ///
    /// No hardware write happens here; call
    /// [`strophe_core::safety::apply_safe_state`] after construction to
    /// establish a known output state.
    pub fn new(led_strip1: O, led_strip2: O, cane_motor: O, clutch: O, retract1: P, retract2: P) -> Self {
        Self {
            led_strip1,
            led_strip2,
            cane_motor,
            clutch,
            retract1,
            retract2,
            switch_cache: [None; 4],
            duty_cache: [None; 2],
        }
    }

    fn pin(&mut self, line: SwitchLine) -> &mut O {
        match line {
            SwitchLine::LedStrip1 => &mut self.led_strip1,
            SwitchLine::LedStrip2 => &mut self.led_strip2,
            SwitchLine::CaneMotor => &mut self.cane_motor,
            SwitchLine::Clutch => &mut self.clutch,
        }
    }

    fn channel(&mut self, line: PwmLine) -> &mut P {
        match line {
            PwmLine::RetractMotor1 => &mut self.retract1,
            PwmLine::RetractMotor2 => &mut self.retract2,
        }
    }
}

impl<O: OutputPin, P: SetDutyCycle> Actuators for ActuatorBank<O, P> {
    fn set_switch(&mut self, line: SwitchLine, on: bool) {
        if self.switch_cache[switch_index(line)] == Some(on) {
            return;
        }
        let pin = self.pin(line);
        let result = if on { pin.set_high() } else { pin.set_low() };
        if result.is_ok() {
            self.switch_cache[switch_index(line)] = Some(on);
        }
    }

    fn set_duty(&mut self, line: PwmLine, duty: u16) {
        if self.duty_cache[pwm_index(line)] == Some(duty) {
            return;
        }
        // Rescale core units to the channel's resolution; the fraction is
        // clamped to the channel max by construction
        if self.channel(line).set_duty_cycle_fraction(duty, MAX_DUTY).is_ok() {
            self.duty_cache[pwm_index(line)] = Some(duty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal::pwm::ErrorType as PwmErrorType;

    /// Counts writes so the caching can be observed
    #[derive(Debug, Default)]
    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl PinErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
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

    #[derive(Debug, Default)]
    struct MockPwm {
        duty: u16,
        writes: u32,
    }

    impl PwmErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            // Deliberately narrower than core units to exercise rescaling
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            self.writes += 1;
            Ok(())
        }
    }

    fn bank() -> ActuatorBank<MockPin, MockPwm> {
        ActuatorBank::new(
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPwm::default(),
            MockPwm::default(),
        )
    }

    #[test]
    fn test_switch_reaches_mapped_pin() {
        let mut bank = bank();
        bank.set_switch(SwitchLine::Clutch, true);
        assert!(bank.clutch.high);
        assert!(!bank.led_strip1.high);

        bank.set_switch(SwitchLine::Clutch, false);
        assert!(!bank.clutch.high);
    }

    #[test]
    fn test_repeated_switch_write_is_elided() {
        let mut bank = bank();
        bank.set_switch(SwitchLine::LedStrip1, true);
        bank.set_switch(SwitchLine::LedStrip1, true);
        bank.set_switch(SwitchLine::LedStrip1, true);
        assert_eq!(bank.led_strip1.writes, 1);

        bank.set_switch(SwitchLine::LedStrip1, false);
        assert_eq!(bank.led_strip1.writes, 2);
    }

    #[test]
    fn test_duty_rescaled_to_channel_resolution() {
        let mut bank = bank();
        bank.set_duty(PwmLine::RetractMotor1, MAX_DUTY);
        assert_eq!(bank.retract1.duty, 1000);

        // Fraction rounds down: 32767/65535 of 1000
        bank.set_duty(PwmLine::RetractMotor1, MAX_DUTY / 2);
        assert_eq!(bank.retract1.duty, 499);

        bank.set_duty(PwmLine::RetractMotor1, 0);
        assert_eq!(bank.retract1.duty, 0);
    }

    #[test]
    fn test_repeated_duty_write_is_elided() {
        let mut bank = bank();
        bank.set_duty(PwmLine::RetractMotor2, 32_700);
        bank.set_duty(PwmLine::RetractMotor2, 32_700);
        assert_eq!(bank.retract2.writes, 1);
        assert_eq!(bank.retract1.writes, 0);
    }

    #[test]
    fn test_safe_state_sweep_writes_every_line_once() {
        let mut bank = bank();
        strophe_core::safety::apply_safe_state(&mut bank);
        assert_eq!(bank.led_strip1.writes + bank.led_strip2.writes, 2);
        assert_eq!(bank.cane_motor.writes, 1);
        assert_eq!(bank.clutch.writes, 1);
        assert_eq!(bank.retract1.writes, 1);
        assert_eq!(bank.retract2.writes, 1);

        // A second sweep is a no-op
        strophe_core::safety::apply_safe_state(&mut bank);
        assert_eq!(bank.clutch.writes, 1);
        assert_eq!(bank.retract1.writes, 1);
    }
}
