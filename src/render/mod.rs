pub mod board_view;
pub mod renderer;

pub use board_view::{BoardView, Sprite};
pub use renderer::{Hud, Renderer, Screen};
