pub mod dev;
pub mod error;
pub mod health;
pub mod page;

pub use error::AppError;
