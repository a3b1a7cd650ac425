pub mod app;
pub mod board_grid;
pub mod controls_panel;
pub mod game_over_overlay;
pub mod next_piece_panel;
pub mod stats_panel;
pub mod touch_pad;
