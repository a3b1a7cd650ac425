use crate::model::FinalStats;
use crate::util::format_score;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameOverOverlayProps {
    pub stats: Option<FinalStats>,
    pub on_retry: Callback<()>,
}

#[function_component]
pub fn GameOverOverlay(props: &GameOverOverlayProps) -> Html {
    let Some(stats) = props.stats else {
        return html! {};
    };
    let retry_cb = props.on_retry.clone();
    let retry_btn = Callback::from(move |_| retry_cb.emit(()));
    html! {
        <div id="gameOver" style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:24px 32px; border-radius:12px; text-align:center; min-width:280px;">
            <h2 style="margin:0 0 12px 0; color:#f85149;">{"Game Over"}</h2>
            <p id="finalScore" style="margin:4px 0;">{ format!("Score: {}", format_score(stats.score)) }</p>
            <p id="finalLevel" style="margin:4px 0;">{ format!("Level: {}", stats.level) }</p>
            <p id="finalLines" style="margin:4px 0;">{ format!("Lines: {}", stats.lines) }</p>
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                <button onclick={retry_btn}>{"Play Again"}</button>
            </div>
        </div>
    }
}
