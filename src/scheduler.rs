//! Periodic timers.
//!
//! A [`Ticker`] hands out handles that cancel their timer when dropped, so
//! "at most one live timer" reduces to "at most one handle stored".

use gloo::timers::callback::Interval;
use yew::Callback;

pub trait Ticker {
    type Handle;

    /// Starts emitting `on_fire` every `period_ms` until the handle is dropped.
    fn every(&self, period_ms: u32, on_fire: Callback<()>) -> Self::Handle;
}

/// `setInterval`-backed ticker for the browser.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntervalTicker;

impl Ticker for IntervalTicker {
    type Handle = Interval;

    fn every(&self, period_ms: u32, on_fire: Callback<()>) -> Interval {
        Interval::new(period_ms, move || on_fire.emit(()))
    }
}

/// Owns the game's single tick timer.
pub struct TickScheduler<K: Ticker> {
    ticker: K,
    period_ms: u32,
    handle: Option<K::Handle>,
}

impl<K: Ticker> TickScheduler<K> {
    pub fn new(ticker: K, period_ms: u32) -> Self {
        Self {
            ticker,
            period_ms,
            handle: None,
        }
    }

    /// Replaces any armed timer; the old one is cancelled before the new one
    /// starts.
    pub fn arm(&mut self, on_fire: Callback<()>) {
        self.cancel();
        self.handle = Some(self.ticker.every(self.period_ms, on_fire));
    }

    pub fn cancel(&mut self) -> bool {
        self.handle.take().is_some()
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}
