pub mod contact_handlers;
pub mod market_handlers;

pub use contact_handlers::*;
pub use market_handlers::*;
