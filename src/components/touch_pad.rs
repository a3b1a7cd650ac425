use crate::input::ControlButton;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TouchPadProps {
    pub on_press: Callback<ControlButton>,
    pub on_release: Callback<ControlButton>,
}

/// On-screen buttons. Holding one repeats its move; lifting, leaving or
/// cancelling stops it.
#[function_component]
pub fn TouchPad(props: &TouchPadProps) -> Html {
    let button = |control: ControlButton| {
        let press = props.on_press.clone();
        let release = props.on_release.clone();
        let mouse_down = press.reform(move |_: MouseEvent| control);
        let mouse_up = release.reform(move |_: MouseEvent| control);
        let mouse_leave = release.reform(move |_: MouseEvent| control);
        let touch_start = Callback::from(move |e: TouchEvent| {
            // keeps the browser from synthesizing a second press as mouse events
            e.prevent_default();
            press.emit(control);
        });
        let touch_end = {
            let release = release.clone();
            Callback::from(move |e: TouchEvent| {
                e.prevent_default();
                release.emit(control);
            })
        };
        let touch_cancel = release.reform(move |_: TouchEvent| control);
        html! {
            <button
                class="control-btn"
                style="width:56px; height:56px; font-size:22px; touch-action:none; user-select:none;"
                onmousedown={mouse_down}
                onmouseup={mouse_up}
                onmouseleave={mouse_leave}
                ontouchstart={touch_start}
                ontouchend={touch_end}
                ontouchcancel={touch_cancel}
            >{ control.label() }</button>
        }
    };
    html! {
        <div class="mobile-controls" style="display:flex; flex-wrap:wrap; gap:8px; justify-content:center; margin-top:12px;">
            { for ControlButton::ALL.into_iter().map(button) }
        </div>
    }
}
