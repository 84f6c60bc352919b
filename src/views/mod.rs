pub mod screens;
pub mod planner;

pub use screens::{render_error_screen, render_loading_screen};
pub use planner::render_planner;
