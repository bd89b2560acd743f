mod inputs;
mod market;
mod results;

pub use inputs::{
    OperatingMode, PRICE_MAX, PRICE_MIN, RoomType, SURFACE_MAX, SURFACE_MIN, SimulationInputs,
    clamp_price, clamp_surface,
};
pub use market::{AirbnbData, ContactRequest, ContactResponse, RentData};
pub use results::{DataSource, Freshness, SimulationResult};
