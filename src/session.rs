//! Session controller: owns the current snapshot and the tick timer, and
//! decides which server replies are allowed to replace it.
//!
//! Ordering policy:
//! * ticks are skipped while the previous tick is unanswered,
//! * at most one move is in flight; extra moves are dropped,
//! * every request carries a [`Ticket`]; replies from an older epoch
//!   (before the last `start`/`load`) or with a lower sequence number than the
//!   last installed snapshot are discarded,
//! * a `game_over` reply ends the game even when it lost the race to a later
//!   reply, and ending the game starts a new epoch so nothing still in flight
//!   can be installed afterwards.

use yew::Callback;

use crate::api::{ApiError, ApiRequest, ApiResult, Transport};
use crate::dispatch::{DispatchOutcome, MoveDispatcher, RequestGate};
use crate::model::{FinalStats, GameSnapshot, MoveCommand};
use crate::scheduler::{TickScheduler, Ticker};
use crate::util::{clog, cwarn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub epoch: u64,
    pub seq: u64,
    pub request: ApiRequest,
}

#[derive(Debug)]
pub enum SessionEvent {
    TickDue,
    Reply { ticket: Ticket, result: ApiResult },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyDisposition {
    Installed,
    /// Installed, and it ended the game.
    Ended,
    Failed,
    /// From a previous game.
    Stale,
    /// Older than the snapshot already shown.
    OutOfOrder,
    /// Tick or move reply after the game stopped running.
    Inactive,
}

pub struct Session<T: Transport, K: Ticker> {
    transport: T,
    scheduler: TickScheduler<K>,
    inbox: Callback<SessionEvent>,
    moves: MoveDispatcher,
    ticks: RequestGate,
    loads: RequestGate,
    current: Option<GameSnapshot>,
    running: bool,
    paused: bool,
    epoch: u64,
    next_seq: u64,
    installed_seq: u64,
    final_stats: Option<FinalStats>,
    last_error: Option<String>,
}

impl<T: Transport, K: Ticker> Session<T, K> {
    /// `inbox` receives timer firings and replies; the owner feeds them back
    /// through [`Session::handle`].
    pub fn new(transport: T, ticker: K, tick_interval_ms: u32, inbox: Callback<SessionEvent>) -> Self {
        Self {
            transport,
            scheduler: TickScheduler::new(ticker, tick_interval_ms),
            inbox,
            moves: MoveDispatcher::default(),
            ticks: RequestGate::default(),
            loads: RequestGate::default(),
            current: None,
            running: false,
            paused: false,
            epoch: 0,
            next_seq: 0,
            installed_seq: 0,
            final_stats: None,
            last_error: None,
        }
    }

    /// Page-load fetch: shows a fresh board without starting the clock.
    pub fn load(&mut self) {
        self.begin_epoch();
        self.running = false;
        self.paused = false;
        self.request_fresh(ApiRequest::NewGame);
    }

    pub fn start(&mut self) {
        self.begin_epoch();
        self.running = true;
        self.paused = false;
        self.final_stats = None;
        self.last_error = None;
        self.request_fresh(ApiRequest::NewGame);
        self.arm_ticks();
        clog(&format!("game started (epoch {})", self.epoch));
    }

    /// Returns whether anything changed.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.paused = !self.paused;
        if self.paused {
            self.scheduler.cancel();
            clog("paused");
        } else {
            self.arm_ticks();
            clog("resumed");
        }
        true
    }

    /// Re-reads the server state without advancing it.
    pub fn refresh(&mut self) -> DispatchOutcome {
        if !self.running {
            return DispatchOutcome::Inactive;
        }
        if self.request_fresh(ApiRequest::State) {
            DispatchOutcome::Sent
        } else {
            DispatchOutcome::Busy
        }
    }

    pub fn send_move(&mut self, cmd: MoveCommand) -> DispatchOutcome {
        let seq = self.next_seq + 1;
        let active = self.running && !self.paused;
        let outcome = self.moves.admit(cmd, seq, active, !self.loads.is_idle());
        match outcome {
            DispatchOutcome::Sent => {
                self.issue(ApiRequest::Move(cmd));
            }
            DispatchOutcome::Busy => match self.moves.in_flight() {
                Some(pending) => clog(&format!("dropping {cmd:?}, {pending:?} still in flight")),
                None => clog(&format!("dropping {cmd:?} while a fresh game loads")),
            },
            DispatchOutcome::Inactive => {}
        }
        outcome
    }

    /// Returns the reply's fate; `None` for timer firings.
    pub fn handle(&mut self, event: SessionEvent) -> Option<ReplyDisposition> {
        match event {
            SessionEvent::TickDue => {
                self.on_tick_due();
                None
            }
            SessionEvent::Reply { ticket, result } => Some(self.on_reply(ticket, result)),
        }
    }

    pub fn on_tick_due(&mut self) -> DispatchOutcome {
        if !self.running || self.paused {
            return DispatchOutcome::Inactive;
        }
        if !self.loads.is_idle() || !self.ticks.begin(self.next_seq + 1) {
            return DispatchOutcome::Busy;
        }
        self.issue(ApiRequest::Tick);
        DispatchOutcome::Sent
    }

    pub fn on_reply(&mut self, ticket: Ticket, result: ApiResult) -> ReplyDisposition {
        if ticket.epoch != self.epoch {
            clog(&format!("discarding {:?} reply from epoch {}", ticket.request, ticket.epoch));
            return ReplyDisposition::Stale;
        }
        match ticket.request {
            ApiRequest::NewGame | ApiRequest::State => self.loads.finish(ticket.seq),
            ApiRequest::Tick => self.ticks.finish(ticket.seq),
            ApiRequest::Move(_) => self.moves.settle(ticket.seq),
        };

        let snapshot = match result.and_then(|snapshot| {
            snapshot.validate()?;
            Ok::<_, ApiError>(snapshot)
        }) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                cwarn(&format!("{:?} failed: {err}", ticket.request));
                self.last_error = Some(err.to_string());
                return ReplyDisposition::Failed;
            }
        };

        // only the fresh-game fetch may land while stopped
        if ticket.request != ApiRequest::NewGame && !self.running {
            clog(&format!("discarding {:?} reply, game not running", ticket.request));
            return ReplyDisposition::Inactive;
        }
        let ends_game = snapshot.game_over && self.running;
        if ticket.seq < self.installed_seq && !ends_game {
            clog(&format!(
                "discarding {:?} reply #{} behind #{}",
                ticket.request, ticket.seq, self.installed_seq
            ));
            return ReplyDisposition::OutOfOrder;
        }

        self.installed_seq = self.installed_seq.max(ticket.seq);
        self.current = Some(snapshot);
        self.last_error = None;

        if ends_game {
            self.end_game();
            return ReplyDisposition::Ended;
        }
        ReplyDisposition::Installed
    }

    pub fn current(&self) -> Option<&GameSnapshot> {
        self.current.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_loading(&self) -> bool {
        !self.loads.is_idle()
    }

    pub fn final_stats(&self) -> Option<FinalStats> {
        self.final_stats
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn end_game(&mut self) {
        self.begin_epoch();
        self.running = false;
        self.paused = false;
        self.final_stats = self.current.as_ref().map(GameSnapshot::final_stats);
        if let Some(stats) = self.final_stats {
            clog(&format!(
                "game over: score {} level {} lines {}",
                stats.score, stats.level, stats.lines
            ));
        }
    }

    fn begin_epoch(&mut self) {
        self.epoch += 1;
        self.scheduler.cancel();
        self.moves.reset();
        self.ticks.reset();
        self.loads.reset();
    }

    fn arm_ticks(&mut self) {
        self.scheduler.arm(self.inbox.reform(|_| SessionEvent::TickDue));
    }

    fn request_fresh(&mut self, request: ApiRequest) -> bool {
        if !self.loads.begin(self.next_seq + 1) {
            return false;
        }
        self.issue(request);
        true
    }

    fn issue(&mut self, request: ApiRequest) -> Ticket {
        self.next_seq += 1;
        let ticket = Ticket {
            epoch: self.epoch,
            seq: self.next_seq,
            request,
        };
        let reply = self
            .inbox
            .reform(move |result: ApiResult| SessionEvent::Reply { ticket, result });
        self.transport.send(request, reply);
        ticket
    }
}
