//! Delayed-action slots
//!
//! A small fixed set of independent "fire once at absolute deadline T"
//! timers. Each slot holds one deadline or nothing; there is no queue.
//! Arming a slot overwrites any prior deadline, and a due slot is cleared
//! before its handler runs so a re-arm performed inside the handler is
//! never clobbered.

/// The delayed actions the sequencer can arm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionSlot {
    /// Begin the extend sequence (effect cue, strips, clutch pulse)
    Ignite,
    /// Release the clutch and start pre-tensioning
    ClutchReturn,
    /// Blade tighten stage
    Tighten,
    /// Hold-tension stage
    Tension,
    /// Deactivation audio/visual cue
    EffectOff,
    /// Watchdog forcing the terminal safe state
    FailsafeAbort,
}

impl ActionSlot {
    /// Number of slots
    pub const COUNT: usize = 6;

    /// All slots in service order
    pub const ALL: [ActionSlot; ActionSlot::COUNT] = [
        ActionSlot::Ignite,
        ActionSlot::ClutchReturn,
        ActionSlot::Tighten,
        ActionSlot::Tension,
        ActionSlot::EffectOff,
        ActionSlot::FailsafeAbort,
    ];

    fn index(self) -> usize {
        match self {
            ActionSlot::Ignite => 0,
            ActionSlot::ClutchReturn => 1,
            ActionSlot::Tighten => 2,
            ActionSlot::Tension => 3,
            ActionSlot::EffectOff => 4,
            ActionSlot::FailsafeAbort => 5,
        }
    }
}

/// One absolute millisecond deadline per slot; `None` means not armed
#[derive(Debug, Clone, Default)]
pub struct DelayedActions {
    deadlines: [Option<u64>; ActionSlot::COUNT],
}

impl DelayedActions {
    /// Create with every slot disarmed
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a slot to fire at `now_ms + delay_ms`, replacing any pending
    /// deadline for that slot
    pub fn arm(&mut self, slot: ActionSlot, now_ms: u64, delay_ms: u64) {
        self.deadlines[slot.index()] = Some(now_ms.saturating_add(delay_ms));
    }

    /// Disarm a slot; returns whether it was armed
    pub fn disarm(&mut self, slot: ActionSlot) -> bool {
        self.deadlines[slot.index()].take().is_some()
    }

    /// Disarm every slot
    pub fn disarm_all(&mut self) {
        self.deadlines = [None; ActionSlot::COUNT];
    }

    /// Check whether a slot is armed
    pub fn is_armed(&self, slot: ActionSlot) -> bool {
        self.deadlines[slot.index()].is_some()
    }

    /// Pending deadline for a slot, if armed
    pub fn deadline(&self, slot: ActionSlot) -> Option<u64> {
        self.deadlines[slot.index()]
    }

    /// Take the next due slot, clearing it before returning
    ///
    /// Call in a loop each tick until it returns `None`. Each arming fires
    /// at most once; the slot is already cleared when the caller runs its
    /// handler, so handlers may re-arm freely.
    pub fn take_due(&mut self, now_ms: u64) -> Option<ActionSlot> {
        for slot in ActionSlot::ALL {
            if let Some(deadline) = self.deadlines[slot.index()] {
                if now_ms >= deadline {
                    self.deadlines[slot.index()] = None;
                    return Some(slot);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unarmed_never_fires() {
        let mut actions = DelayedActions::new();
        assert_eq!(actions.take_due(u64::MAX), None);
    }

    #[test]
    fn test_fires_once_at_deadline() {
        let mut actions = DelayedActions::new();
        actions.arm(ActionSlot::ClutchReturn, 1000, 350);

        assert_eq!(actions.take_due(1349), None);
        assert_eq!(actions.take_due(1350), Some(ActionSlot::ClutchReturn));
        // Cleared after firing: never fires twice per arming
        assert_eq!(actions.take_due(1350), None);
        assert_eq!(actions.take_due(5000), None);
    }

    #[test]
    fn test_rearm_replaces_pending_deadline() {
        let mut actions = DelayedActions::new();
        actions.arm(ActionSlot::EffectOff, 0, 100);
        actions.arm(ActionSlot::EffectOff, 50, 100);

        // Old deadline (100) no longer fires
        assert_eq!(actions.take_due(100), None);
        assert_eq!(actions.take_due(150), Some(ActionSlot::EffectOff));
        assert_eq!(actions.take_due(150), None);
    }

    #[test]
    fn test_disarm_prevents_fire() {
        let mut actions = DelayedActions::new();
        actions.arm(ActionSlot::FailsafeAbort, 0, 10);
        assert!(actions.disarm(ActionSlot::FailsafeAbort));
        assert!(!actions.disarm(ActionSlot::FailsafeAbort));
        assert_eq!(actions.take_due(1000), None);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut actions = DelayedActions::new();
        actions.arm(ActionSlot::Tighten, 0, 10);
        actions.arm(ActionSlot::Tension, 0, 20);

        assert_eq!(actions.take_due(15), Some(ActionSlot::Tighten));
        assert_eq!(actions.take_due(15), None);
        assert_eq!(actions.take_due(25), Some(ActionSlot::Tension));
        assert_eq!(actions.take_due(25), None);
    }

    #[test]
    fn test_multiple_due_each_fire_once() {
        let mut actions = DelayedActions::new();
        for slot in ActionSlot::ALL {
            actions.arm(slot, 0, 5);
        }

        let mut fired = heapless::Vec::<ActionSlot, { ActionSlot::COUNT }>::new();
        while let Some(slot) = actions.take_due(10) {
            assert!(!fired.contains(&slot));
            fired.push(slot).unwrap();
        }
        assert_eq!(fired.len(), ActionSlot::COUNT);
    }

    #[test]
    fn test_rearm_inside_handler_survives() {
        let mut actions = DelayedActions::new();
        actions.arm(ActionSlot::Ignite, 0, 10);

        let slot = actions.take_due(10).unwrap();
        assert_eq!(slot, ActionSlot::Ignite);
        // Handler re-arms the same slot; the clear-before-fire ordering
        // must not wipe this new deadline
        actions.arm(ActionSlot::Ignite, 10, 30);
        assert_eq!(actions.take_due(10), None);
        assert_eq!(actions.take_due(40), Some(ActionSlot::Ignite));
    }

    proptest! {
        /// Arming at T with delay D fires exactly once, at the first poll
        /// where now >= T+D, regardless of the polling cadence.
        #[test]
        fn prop_fires_exactly_once(
            start in 0u64..1_000_000,
            delay in 0u64..60_000,
            steps in proptest::collection::vec(1u64..500, 1..200),
        ) {
            let mut actions = DelayedActions::new();
            actions.arm(ActionSlot::FailsafeAbort, start, delay);
            let deadline = start + delay;

            let mut now = start;
            let mut fired_at = None;
            for step in steps {
                now += step;
                if let Some(slot) = actions.take_due(now) {
                    prop_assert_eq!(slot, ActionSlot::FailsafeAbort);
                    prop_assert!(fired_at.is_none(), "slot double-fired");
                    prop_assert!(now >= deadline, "fired before deadline");
                    fired_at = Some(now);
                }
            }
            if now >= deadline {
                prop_assert!(fired_at.is_some(), "due slot never fired");
            }
        }
    }
}
