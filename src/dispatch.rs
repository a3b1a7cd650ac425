//! Request channels.
//!
//! Each channel (moves, ticks, fresh-game loads) allows one outstanding
//! request. Commands arriving while the channel is awaiting a reply are
//! dropped rather than queued: the server is authoritative and the player can
//! simply press again.

use crate::model::MoveCommand;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestGate {
    #[default]
    Idle,
    Awaiting { seq: u64 },
}

impl RequestGate {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestGate::Idle)
    }

    /// Idle -> Awaiting. Returns false (and stays put) if already awaiting.
    pub fn begin(&mut self, seq: u64) -> bool {
        if !self.is_idle() {
            return false;
        }
        *self = RequestGate::Awaiting { seq };
        true
    }

    /// Awaiting -> Idle, only for the reply that opened the gate.
    pub fn finish(&mut self, seq: u64) -> bool {
        match *self {
            RequestGate::Awaiting { seq: open } if open == seq => {
                *self = RequestGate::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        *self = RequestGate::Idle;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    /// Game not running, or paused.
    Inactive,
    /// Another request on the channel is still outstanding; command dropped.
    Busy,
}

/// Admission control for player moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveDispatcher {
    gate: RequestGate,
    last_sent: Option<MoveCommand>,
}

impl MoveDispatcher {
    /// Decides whether `cmd` may go out as request `seq`.
    pub fn admit(
        &mut self,
        cmd: MoveCommand,
        seq: u64,
        active: bool,
        loading: bool,
    ) -> DispatchOutcome {
        if !active {
            return DispatchOutcome::Inactive;
        }
        if loading || !self.gate.begin(seq) {
            return DispatchOutcome::Busy;
        }
        self.last_sent = Some(cmd);
        DispatchOutcome::Sent
    }

    pub fn settle(&mut self, seq: u64) -> bool {
        self.gate.finish(seq)
    }

    pub fn reset(&mut self) {
        self.gate.reset();
        self.last_sent = None;
    }

    pub fn in_flight(&self) -> Option<MoveCommand> {
        if self.gate.is_idle() {
            None
        } else {
            self.last_sent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_only_opens_once() {
        let mut gate = RequestGate::default();
        assert!(gate.begin(1));
        assert!(!gate.begin(2));
        assert_eq!(gate, RequestGate::Awaiting { seq: 1 });
    }

    #[test]
    fn gate_ignores_foreign_replies() {
        let mut gate = RequestGate::default();
        gate.begin(7);
        assert!(!gate.finish(6));
        assert!(!gate.is_idle());
        assert!(gate.finish(7));
        assert!(gate.is_idle());
    }

    #[test]
    fn inactive_session_sends_nothing() {
        let mut dispatcher = MoveDispatcher::default();
        assert_eq!(
            dispatcher.admit(MoveCommand::Left, 1, false, false),
            DispatchOutcome::Inactive
        );
        assert_eq!(dispatcher.in_flight(), None);
    }

    #[test]
    fn second_move_is_dropped_while_first_is_outstanding() {
        let mut dispatcher = MoveDispatcher::default();
        assert_eq!(
            dispatcher.admit(MoveCommand::Left, 1, true, false),
            DispatchOutcome::Sent
        );
        assert_eq!(
            dispatcher.admit(MoveCommand::Right, 2, true, false),
            DispatchOutcome::Busy
        );
        assert_eq!(dispatcher.in_flight(), Some(MoveCommand::Left));
        assert!(dispatcher.settle(1));
        assert_eq!(
            dispatcher.admit(MoveCommand::Right, 3, true, false),
            DispatchOutcome::Sent
        );
    }

    #[test]
    fn moves_wait_for_fresh_game() {
        let mut dispatcher = MoveDispatcher::default();
        assert_eq!(
            dispatcher.admit(MoveCommand::Drop, 1, true, true),
            DispatchOutcome::Busy
        );
        assert_eq!(dispatcher.in_flight(), None);
    }
}
