use crate::render::BoardView;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BoardGridProps {
    pub view: BoardView,
}

/// 20x10 grid of `board-block` cells; colors come from the stylesheet.
#[function_component]
pub fn BoardGrid(props: &BoardGridProps) -> Html {
    html! {
        <div id="gameBoard" class="game-board">
            { for props.view.rows().enumerate().map(|(r, row)| html! {
                <div key={r.to_string()} class="board-row">
                    { for row.iter().map(|cell| html! { <div class={cell.class_name()}></div> }) }
                </div>
            }) }
        </div>
    }
}
