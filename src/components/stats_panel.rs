use crate::util::format_score;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub score: u64,
    pub level: u32,
    pub lines: u32,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:180px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={format!("{} color:#d4af37;", label_style)}>{"Score"}</span>
                <span id="score" style={format!("{} color:#d4af37;", value_style)}>{ format_score(props.score) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#58a6ff;", label_style)}>{"Level"}</span>
                <span id="level" style={format!("{} color:#58a6ff;", value_style)}>{ props.level }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#3fb950;", label_style)}>{"Lines"}</span>
                <span id="lines" style={format!("{} color:#3fb950;", value_style)}>{ props.lines }</span>
            </div>
        </div>
    }
}
