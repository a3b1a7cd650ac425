use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub running: bool,
    pub paused: bool,
    pub loading: bool,
    pub last_error: Option<String>,
    pub on_start: Callback<()>,
    pub on_toggle_pause: Callback<()>,
    pub on_resync: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let start_cb = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let pause_cb = {
        let cb = props.on_toggle_pause.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let resync_cb = {
        let cb = props.on_resync.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let pause_label = if props.paused { "Resume" } else { "Pause" };
    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:180px; display:flex; flex-direction:column; gap:6px;">
        <button id="startBtn" onclick={start_cb} disabled={props.running || props.loading}>{"Start Game"}</button>
        <button id="pauseBtn" onclick={pause_cb} disabled={!props.running}>{ pause_label }</button>
        <button onclick={resync_cb} disabled={!props.running}>{"Resync"}</button>
        <div style="font-size:11px; opacity:0.7;">{"Arrows move, Up rotates, Space drops, P pauses"}</div>
        { if props.loading { html!{ <div style="font-size:11px; opacity:0.7;">{"Loading..."}</div> } } else { html!{} } }
        { if let Some(txt) = &props.last_error { html!{ <div style="font-size:11px; line-height:1.2; color:#f85149; background:#1c2128; border:1px solid #30363d; padding:4px 6px; border-radius:6px;">{ txt.clone() }</div> } } else { html!{} } }
    </div>}
}
