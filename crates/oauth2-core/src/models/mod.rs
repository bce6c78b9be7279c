pub mod authorization;
pub mod client;
pub mod error;
pub mod state;
pub mod token;
pub mod user;

pub use authorization::*;
pub use client::*;
pub use error::*;
pub use state::*;
pub use token::*;
pub use user::*;
