mod api;
mod components;
mod config;
mod dispatch;
mod input;
mod model;
mod render;
mod scheduler;
mod session;
#[cfg(test)]
mod testing;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
