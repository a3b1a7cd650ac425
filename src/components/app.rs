use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use super::{
    board_grid::BoardGrid, controls_panel::ControlsPanel, game_over_overlay::GameOverOverlay,
    next_piece_panel::NextPiecePanel, stats_panel::StatsPanel, touch_pad::TouchPad,
};
use crate::api::HttpTransport;
use crate::config::ClientConfig;
use crate::input::{route_key, ControlButton, ControlPad, KeyRoute};
use crate::model::MoveCommand;
use crate::render::{render_board, render_next, BoardView, NextPreview};
use crate::scheduler::IntervalTicker;
use crate::session::{Session, SessionEvent};
use crate::util::cwarn;

type WebSession = Session<HttpTransport, IntervalTicker>;
type WebPad = ControlPad<IntervalTicker>;
type Slot<T> = Rc<RefCell<Option<T>>>;

fn toggle_pause(session: &Slot<WebSession>, pad: &Slot<WebPad>) {
    let paused = {
        let mut slot = session.borrow_mut();
        let Some(s) = slot.as_mut() else { return };
        s.toggle_pause();
        s.is_paused()
    };
    if paused {
        if let Some(p) = pad.borrow_mut().as_mut() {
            p.release_all();
        }
    }
}

fn send_move(session: &Slot<WebSession>, cmd: MoveCommand) {
    if let Some(s) = session.borrow_mut().as_mut() {
        s.send_move(cmd);
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| ClientConfig::load());
    let session: Slot<WebSession> = use_mut_ref(|| None);
    let pad: Slot<WebPad> = use_mut_ref(|| None);
    let redraw = use_force_update();

    // Mount: build the session, fetch the first board, listen for keys
    {
        let session = session.clone();
        let pad = pad.clone();
        let redraw = redraw.clone();
        let config = config.clone();
        use_effect_with((), move |_| {
            let inbox = {
                let session = session.clone();
                let pad = pad.clone();
                let redraw = redraw.clone();
                Callback::from(move |event: SessionEvent| {
                    let stopped = {
                        let mut slot = session.borrow_mut();
                        let Some(s) = slot.as_mut() else { return };
                        s.handle(event);
                        !s.is_running()
                    };
                    if stopped {
                        if let Some(p) = pad.borrow_mut().as_mut() {
                            p.release_all();
                        }
                    }
                    redraw.force_update();
                })
            };
            let on_command = {
                let session = session.clone();
                Callback::from(move |cmd: MoveCommand| send_move(&session, cmd))
            };

            let mut fresh = Session::new(
                HttpTransport::new(config.api_base.clone()),
                IntervalTicker,
                config.tick_interval_ms,
                inbox,
            );
            fresh.load();
            *session.borrow_mut() = Some(fresh);
            *pad.borrow_mut() = Some(ControlPad::new(
                IntervalTicker,
                config.repeat_interval_ms,
                on_command,
            ));
            redraw.force_update();

            let keydown = match web_sys::window().and_then(|w| w.document()) {
                Some(document) => {
                    let session = session.clone();
                    let pad = pad.clone();
                    let redraw = redraw.clone();
                    Some(EventListener::new_with_options(
                        &document,
                        "keydown",
                        EventListenerOptions::enable_prevent_default(),
                        move |event| {
                            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                                return;
                            };
                            let route = route_key(&event.key());
                            if route.suppresses_default() {
                                event.prevent_default();
                            }
                            match route {
                                KeyRoute::Move(cmd) => send_move(&session, cmd),
                                KeyRoute::TogglePause => toggle_pause(&session, &pad),
                                KeyRoute::Ignored => return,
                            }
                            redraw.force_update();
                        },
                    ))
                }
                None => {
                    cwarn("no document; keyboard input disabled");
                    None
                }
            };

            move || {
                drop(keydown);
                // dropping these cancels the tick and repeat intervals
                pad.borrow_mut().take();
                session.borrow_mut().take();
            }
        });
    }

    let on_start = {
        let session = session.clone();
        let pad = pad.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            if let Some(p) = pad.borrow_mut().as_mut() {
                p.release_all();
            }
            if let Some(s) = session.borrow_mut().as_mut() {
                s.start();
            }
            redraw.force_update();
        })
    };
    let on_toggle_pause = {
        let session = session.clone();
        let pad = pad.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            toggle_pause(&session, &pad);
            redraw.force_update();
        })
    };
    let on_resync = {
        let session = session.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            if let Some(s) = session.borrow_mut().as_mut() {
                s.refresh();
            }
            redraw.force_update();
        })
    };
    let on_press = {
        let pad = pad.clone();
        Callback::from(move |button: ControlButton| {
            if let Some(p) = pad.borrow_mut().as_mut() {
                p.press(button);
            }
        })
    };
    let on_release = {
        let pad = pad.clone();
        Callback::from(move |button: ControlButton| {
            if let Some(p) = pad.borrow_mut().as_mut() {
                p.release(button);
            }
        })
    };

    let slot = session.borrow();
    let current = slot.as_ref().and_then(|s| s.current());
    let board = current.map(render_board).unwrap_or_else(BoardView::blank);
    let next = current.map(render_next).unwrap_or(NextPreview::Hidden);
    let (score, level, lines) = current
        .map(|s| (s.score, s.level, s.lines))
        .unwrap_or_default();
    let running = slot.as_ref().is_some_and(|s| s.is_running());
    let paused = slot.as_ref().is_some_and(|s| s.is_paused());
    let loading = slot.as_ref().is_some_and(|s| s.is_loading());
    let final_stats = slot.as_ref().and_then(|s| s.final_stats());
    let last_error = slot
        .as_ref()
        .and_then(|s| s.last_error())
        .map(str::to_string);
    drop(slot);

    html! {
        <div class="tetris-app">
            <BoardGrid view={board} />
            <div class="side-panel">
                <StatsPanel score={score} level={level} lines={lines} />
                <NextPiecePanel preview={next} />
                <ControlsPanel
                    running={running}
                    paused={paused}
                    loading={loading}
                    last_error={last_error}
                    on_start={on_start.clone()}
                    on_toggle_pause={on_toggle_pause}
                    on_resync={on_resync}
                />
            </div>
            <TouchPad on_press={on_press} on_release={on_release} />
            <GameOverOverlay stats={final_stats} on_retry={on_start} />
        </div>
    }
}
