//! Test doubles: a virtual clock standing in for `setInterval`, a transport
//! that records requests and answers on demand, and a queue playing the role
//! of the browser event loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use yew::Callback;

use crate::api::{ApiError, ApiRequest, ApiResult, Transport};
use crate::model::{GameSnapshot, PieceKind, BOARD_COLS, BOARD_ROWS};
use crate::scheduler::Ticker;
use crate::session::{ReplyDisposition, Session, SessionEvent};

struct Armed {
    id: u64,
    period: u64,
    next_due: u64,
    on_fire: Callback<()>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u64,
    timers: Vec<Armed>,
}

#[derive(Clone, Default)]
pub struct VirtualTicker {
    clock: Rc<RefCell<Clock>>,
}

pub struct VirtualHandle {
    id: u64,
    clock: Weak<RefCell<Clock>>,
}

impl Drop for VirtualHandle {
    fn drop(&mut self) {
        if let Some(clock) = self.clock.upgrade() {
            clock.borrow_mut().timers.retain(|t| t.id != self.id);
        }
    }
}

impl Ticker for VirtualTicker {
    type Handle = VirtualHandle;

    fn every(&self, period_ms: u32, on_fire: Callback<()>) -> VirtualHandle {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let period = u64::from(period_ms.max(1));
        let next_due = clock.now + period;
        clock.timers.push(Armed {
            id,
            period,
            next_due,
            on_fire,
        });
        VirtualHandle {
            id,
            clock: Rc::downgrade(&self.clock),
        }
    }
}

impl VirtualTicker {
    pub fn live_timers(&self) -> usize {
        self.clock.borrow().timers.len()
    }

    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Moves time forward, firing every due timer in deadline order. Callbacks
    /// run with the clock released so they may arm or drop timers.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            let due = {
                let mut clock = self.clock.borrow_mut();
                let next = clock
                    .timers
                    .iter_mut()
                    .filter(|t| t.next_due <= target)
                    .min_by_key(|t| (t.next_due, t.id));
                match next {
                    Some(timer) => {
                        let fired_at = timer.next_due;
                        timer.next_due += timer.period;
                        let cb = timer.on_fire.clone();
                        clock.now = fired_at;
                        Some(cb)
                    }
                    None => None,
                }
            };
            match due {
                Some(cb) => cb.emit(()),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }
}

struct Pending {
    request: ApiRequest,
    reply: Callback<ApiResult>,
}

#[derive(Clone, Default)]
pub struct FakeTransport {
    sent: Rc<RefCell<Vec<ApiRequest>>>,
    pending: Rc<RefCell<VecDeque<Pending>>>,
}

impl Transport for FakeTransport {
    fn send(&self, request: ApiRequest, reply: Callback<ApiResult>) {
        self.sent.borrow_mut().push(request);
        self.pending.borrow_mut().push_back(Pending { request, reply });
    }
}

impl FakeTransport {
    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Answers the `index`-th outstanding request. Returns false if none.
    pub fn answer(&self, index: usize, result: ApiResult) -> bool {
        let Some(pending) = self.pending.borrow_mut().remove(index) else {
            return false;
        };
        pending.reply.emit(result);
        true
    }
}

/// Session wired to virtual time and a recording transport.
pub struct Harness {
    pub session: Session<FakeTransport, VirtualTicker>,
    pub transport: FakeTransport,
    pub ticker: VirtualTicker,
    queue: Rc<RefCell<VecDeque<SessionEvent>>>,
}

impl Harness {
    pub fn new(tick_interval_ms: u32) -> Self {
        let transport = FakeTransport::default();
        let ticker = VirtualTicker::default();
        let queue: Rc<RefCell<VecDeque<SessionEvent>>> = Rc::default();
        let inbox = {
            let queue = queue.clone();
            Callback::from(move |event: SessionEvent| queue.borrow_mut().push_back(event))
        };
        let session = Session::new(transport.clone(), ticker.clone(), tick_interval_ms, inbox);
        Self {
            session,
            transport,
            ticker,
            queue,
        }
    }

    /// Drains queued events into the session; returns the last reply outcome.
    pub fn pump(&mut self) -> Option<ReplyDisposition> {
        let mut last = None;
        loop {
            let Some(event) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            if let Some(fate) = self.session.handle(event) {
                last = Some(fate);
            }
        }
        last
    }

    pub fn advance(&mut self, ms: u64) {
        self.ticker.advance(ms);
        self.pump();
    }

    pub fn reply_ok(&mut self, snapshot: GameSnapshot) -> Option<ReplyDisposition> {
        self.reply_nth_ok(0, snapshot)
    }

    pub fn reply_nth_ok(&mut self, index: usize, snapshot: GameSnapshot) -> Option<ReplyDisposition> {
        if !self.transport.answer(index, Ok(snapshot)) {
            return None;
        }
        self.pump()
    }

    pub fn reply_err(&mut self, err: ApiError) -> Option<ReplyDisposition> {
        if !self.transport.answer(0, Err(err)) {
            return None;
        }
        self.pump()
    }
}

/// Fresh-game snapshot: empty board, T piece at the spawn column.
pub fn fixture_snapshot() -> GameSnapshot {
    GameSnapshot {
        board: vec![vec![0; BOARD_COLS]; BOARD_ROWS],
        piece: PieceKind::T.shape().to_vec(),
        piece_x: 3,
        piece_y: 0,
        piece_type: PieceKind::T,
        next_piece: Some("I".to_string()),
        score: 0,
        level: 1,
        lines: 0,
        game_over: false,
    }
}

/// Server payload matching [`fixture_snapshot`].
pub fn snapshot_json() -> String {
    let board = vec![vec![0; BOARD_COLS]; BOARD_ROWS];
    serde_json::json!({
        "board": board,
        "piece": [[1, 0], [0, 1], [1, 1], [2, 1]],
        "piece_x": 3,
        "piece_y": 0,
        "piece_type": "T",
        "next_piece": "I",
        "score": 0,
        "level": 1,
        "lines": 0,
        "game_over": false,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_handle_unregisters_timer() {
        let ticker = VirtualTicker::default();
        let handle = ticker.every(100, Callback::from(|_| ()));
        assert_eq!(ticker.live_timers(), 1);
        drop(handle);
        assert_eq!(ticker.live_timers(), 0);
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let ticker = VirtualTicker::default();
        let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
        let record = |name: &'static str| {
            let log = log.clone();
            Callback::from(move |_| log.borrow_mut().push(name))
        };
        let _slow = ticker.every(300, record("slow"));
        let _fast = ticker.every(200, record("fast"));
        ticker.advance(600);
        assert_eq!(*log.borrow(), vec!["fast", "slow", "fast", "slow", "fast"]);
        assert_eq!(ticker.now(), 600);
    }
}
