pub mod checkin;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use utils::geo::Coordinate;
