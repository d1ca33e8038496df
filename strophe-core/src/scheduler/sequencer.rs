//! Activation/retraction sequencer
//!
//! The control core: consumes the rotation speed at a fixed evaluation
//! cadence and the current time every tick, drives the spin state machine,
//! and choreographs the actuator writes and delayed actions of the extend
//! and retract sequences.
//!
//! One `poll` per control-loop iteration. Due action slots are serviced
//! every iteration; the state machine itself is only re-evaluated once per
//! `sample_interval_ms` to reject transient noise in the rotation signal.

use super::actions::{ActionSlot, DelayedActions};
use crate::config::{ConfigError, DutyPair, SpinConfig};
use crate::safety;
use crate::state::{Event, SpinState};
use crate::traits::{Actuators, EffectSink, OffReason, PwmLine, SwitchLine};

/// Spin-driven actuator sequencer
///
/// Owns the spin state, the engagement flag and the delayed-action slots.
/// All hardware access goes through the [`Actuators`] and [`EffectSink`]
/// traits passed into [`Sequencer::poll`].
#[derive(Debug)]
pub struct Sequencer {
    config: SpinConfig,
    state: SpinState,
    /// Whether the physical/effect "on" state is active; gates the
    /// idempotency of activation and deactivation
    engaged: bool,
    actions: DelayedActions,
    /// Timestamp of the last state machine evaluation; `None` until the
    /// first poll
    last_eval_ms: Option<u64>,
    /// No activation before this time
    cooldown_until_ms: u64,
    /// No retraction before this time (rejects speed dips right after
    /// activation)
    min_spin_until_ms: u64,
}

impl Sequencer {
    /// Create a sequencer, validating the configuration
    pub fn new(config: SpinConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: SpinState::Stopped,
            engaged: false,
            actions: DelayedActions::new(),
            last_eval_ms: None,
            cooldown_until_ms: 0,
            min_spin_until_ms: 0,
        })
    }

    /// Current spin state
    pub fn state(&self) -> SpinState {
        self.state
    }

    /// Whether the prop is engaged (host-facing `IsOn` query)
    pub fn is_on(&self) -> bool {
        self.engaged
    }

    /// Active configuration
    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    /// One control-loop iteration
    ///
    /// Services every due delayed action, then (rate-limited) evaluates
    /// the state machine against `speed`.
    pub fn poll(
        &mut self,
        now_ms: u64,
        speed: f32,
        outputs: &mut impl Actuators,
        effects: &mut impl EffectSink,
    ) {
        while let Some(slot) = self.actions.take_due(now_ms) {
            self.fire(slot, now_ms, outputs, effects);
        }
        self.evaluate(now_ms, speed, outputs, effects);
    }

    fn fire(
        &mut self,
        slot: ActionSlot,
        now_ms: u64,
        outputs: &mut impl Actuators,
        effects: &mut impl EffectSink,
    ) {
        match slot {
            ActionSlot::Ignite => {
                effects.effect_on();
                outputs.set_switch(SwitchLine::LedStrip1, true);
                outputs.set_switch(SwitchLine::LedStrip2, true);
                // Clutch pulse releases the blade; return is scheduled,
                // not awaited
                outputs.set_switch(SwitchLine::Clutch, true);
                self.actions
                    .arm(ActionSlot::ClutchReturn, now_ms, self.config.clutch_pulse_ms);
            }
            ActionSlot::ClutchReturn => {
                outputs.set_switch(SwitchLine::Clutch, false);
                self.apply_duty(outputs, self.config.pretension_duty);
                self.actions
                    .arm(ActionSlot::Tighten, now_ms, self.config.tighten_delay_ms);
            }
            ActionSlot::Tighten => {
                self.apply_duty(outputs, self.config.tighten_duty);
                self.actions
                    .arm(ActionSlot::Tension, now_ms, self.config.tension_delay_ms);
            }
            ActionSlot::Tension => {
                self.apply_duty(outputs, self.config.tension_duty);
            }
            ActionSlot::EffectOff => {
                effects.effect_off(OffReason::Normal);
            }
            ActionSlot::FailsafeAbort => {
                self.state = self.state.transition(Event::FailsafeExpired);
                self.deactivate(outputs, effects, OffReason::Failsafe);
            }
        }
    }

    /// Rate-limited state machine evaluation
    fn evaluate(
        &mut self,
        now_ms: u64,
        speed: f32,
        outputs: &mut impl Actuators,
        effects: &mut impl EffectSink,
    ) {
        if let Some(last) = self.last_eval_ms {
            if now_ms.saturating_sub(last) < self.config.sample_interval_ms {
                return;
            }
        }
        self.last_eval_ms = Some(now_ms);

        match self.state {
            SpinState::Stopped => {
                if speed > self.config.activation_threshold_dps
                    && !self.engaged
                    && now_ms >= self.cooldown_until_ms
                {
                    self.activate(now_ms);
                }
            }
            SpinState::Spinning => {
                if speed < self.config.slow_threshold_dps && now_ms >= self.min_spin_until_ms {
                    self.begin_retraction(now_ms, outputs);
                }
            }
            SpinState::Slowing => {
                if let Some(stop) = self.config.stop_threshold_dps {
                    if speed < stop && self.engaged {
                        self.state = self.state.transition(Event::StopDetected);
                        self.deactivate(outputs, effects, OffReason::Normal);
                    }
                }
            }
        }
    }

    /// Mark engaged and arm the ignite step
    fn activate(&mut self, now_ms: u64) {
        if self.engaged {
            return;
        }
        self.engaged = true;
        self.state = self.state.transition(Event::SpinDetected);
        self.cooldown_until_ms = now_ms + self.config.cooldown_ms;
        self.min_spin_until_ms = now_ms + self.config.min_spin_ms;
        self.actions
            .arm(ActionSlot::Ignite, now_ms, self.config.ignite_delay_ms);
    }

    /// Start pulling the blade back in
    fn begin_retraction(&mut self, now_ms: u64, outputs: &mut impl Actuators) {
        outputs.set_switch(SwitchLine::CaneMotor, true);
        self.apply_duty(outputs, self.config.retraction_duty);
        self.actions
            .arm(ActionSlot::EffectOff, now_ms, self.config.effect_off_delay_ms);
        if let Some(failsafe_ms) = self.config.failsafe_ms {
            self.actions
                .arm(ActionSlot::FailsafeAbort, now_ms, failsafe_ms);
        }
        self.cooldown_until_ms = now_ms + self.config.retraction_cooldown_ms;

        // 3-state machines retract in a distinct Slowing state; 2-state
        // machines fold straight back to Stopped and let the failsafe
        // perform the terminal deactivation
        let event = if self.config.stop_threshold_dps.is_some() {
            Event::SlowdownDetected
        } else {
            Event::StopDetected
        };
        self.state = self.state.transition(event);
    }

    /// Terminal deactivation: safe state, disengage, clear the cycle
    ///
    /// Disarms every pending slot before writing outputs so a stale staged
    /// write can never land after the safe state within the same tick.
    fn deactivate(
        &mut self,
        outputs: &mut impl Actuators,
        effects: &mut impl EffectSink,
        reason: OffReason,
    ) {
        if !self.engaged {
            return;
        }
        self.engaged = false;
        let off_cue_pending = self.actions.disarm(ActionSlot::EffectOff);
        self.actions.disarm_all();
        safety::apply_safe_state(outputs);
        if off_cue_pending {
            effects.effect_off(reason);
        }
    }

    fn apply_duty(&self, outputs: &mut impl Actuators, duty: DutyPair) {
        outputs.set_duty(PwmLine::RetractMotor1, duty.motor1);
        outputs.set_duty(PwmLine::RetractMotor2, duty.motor2);
    }
}
