use crate::render::NextPreview;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NextPiecePanelProps {
    pub preview: NextPreview,
}

#[function_component]
pub fn NextPiecePanel(props: &NextPiecePanelProps) -> Html {
    let body = match &props.preview {
        NextPreview::Hidden => html! {},
        NextPreview::Label(text) => html! { <span>{ text.clone() }</span> },
        NextPreview::Shape { kind, grid } => html! {
            <div class="next-grid">
                { for grid.iter().flat_map(|row| row.iter()).map(|filled| {
                    let class = if *filled {
                        format!("board-block filled {}", kind.symbol())
                    } else {
                        "board-block".to_string()
                    };
                    html! { <div class={class}></div> }
                }) }
            </div>
        },
    };
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; display:flex; flex-direction:column; gap:6px;">
            <div style="font-weight:600;">{"Next"}</div>
            <div id="nextPiece">{ body }</div>
        </div>
    }
}
