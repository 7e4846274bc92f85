pub mod geo;
pub mod time_window;
