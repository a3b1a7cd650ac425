//! Keyboard and press-and-hold controls -> move commands.
//!
//! The router holds no game state: it only maps events to commands and owns
//! one repeat timer per held control.

use yew::Callback;

use crate::model::MoveCommand;
use crate::scheduler::Ticker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRoute {
    Move(MoveCommand),
    TogglePause,
    Ignored,
}

impl KeyRoute {
    /// Only keys that map to a move swallow the browser's default action.
    pub fn suppresses_default(self) -> bool {
        matches!(self, KeyRoute::Move(_))
    }
}

/// Routes a `KeyboardEvent.key` value.
pub fn route_key(key: &str) -> KeyRoute {
    match key {
        "ArrowLeft" => KeyRoute::Move(MoveCommand::Left),
        "ArrowRight" => KeyRoute::Move(MoveCommand::Right),
        "ArrowDown" => KeyRoute::Move(MoveCommand::Down),
        "ArrowUp" => KeyRoute::Move(MoveCommand::Rotate),
        " " => KeyRoute::Move(MoveCommand::Drop),
        "p" | "P" => KeyRoute::TogglePause,
        _ => KeyRoute::Ignored,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlButton {
    Left,
    Right,
    Down,
    Up,
    Rotate,
    Drop,
}

impl ControlButton {
    pub const ALL: [ControlButton; 6] = [
        ControlButton::Left,
        ControlButton::Right,
        ControlButton::Down,
        ControlButton::Up,
        ControlButton::Rotate,
        ControlButton::Drop,
    ];

    pub fn command(self) -> MoveCommand {
        match self {
            ControlButton::Left => MoveCommand::Left,
            ControlButton::Right => MoveCommand::Right,
            ControlButton::Down => MoveCommand::Down,
            ControlButton::Up | ControlButton::Rotate => MoveCommand::Rotate,
            ControlButton::Drop => MoveCommand::Drop,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlButton::Left => "◀",
            ControlButton::Right => "▶",
            ControlButton::Down => "▼",
            ControlButton::Up => "▲",
            ControlButton::Rotate => "⟳",
            ControlButton::Drop => "⤓",
        }
    }

    fn slot(self) -> usize {
        match self {
            ControlButton::Left => 0,
            ControlButton::Right => 1,
            ControlButton::Down => 2,
            ControlButton::Up => 3,
            ControlButton::Rotate => 4,
            ControlButton::Drop => 5,
        }
    }
}

/// Repeat timer for a single control; dropping the handle cancels it.
pub struct HoldRepeat<H> {
    handle: Option<H>,
}

impl<H> Default for HoldRepeat<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> HoldRepeat<H> {
    /// Fires once now, then every `period_ms` until released. A second press
    /// replaces the running timer.
    pub fn press<K>(&mut self, ticker: &K, period_ms: u32, fire: Callback<()>)
    where
        K: Ticker<Handle = H>,
    {
        self.release();
        fire.emit(());
        self.handle = Some(ticker.every(period_ms, fire));
    }

    pub fn release(&mut self) -> bool {
        self.handle.take().is_some()
    }
}

/// On-screen control pad with independent repeat timers per button.
pub struct ControlPad<K: Ticker> {
    ticker: K,
    period_ms: u32,
    on_command: Callback<MoveCommand>,
    slots: [HoldRepeat<K::Handle>; 6],
}

impl<K: Ticker> ControlPad<K> {
    pub fn new(ticker: K, period_ms: u32, on_command: Callback<MoveCommand>) -> Self {
        Self {
            ticker,
            period_ms,
            on_command,
            slots: Default::default(),
        }
    }

    pub fn press(&mut self, button: ControlButton) {
        let cmd = button.command();
        let fire = self.on_command.reform(move |_| cmd);
        self.slots[button.slot()].press(&self.ticker, self.period_ms, fire);
    }

    pub fn release(&mut self, button: ControlButton) -> bool {
        self.slots[button.slot()].release()
    }

    /// Drops every repeat timer, e.g. on pause or game over.
    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.release();
        }
    }
}
