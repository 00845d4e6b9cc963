// Models module - entities exchanged with the API and stored in the cache

pub mod agent;
pub mod contract;
pub mod market;
pub mod ship;
pub mod shipyard;
pub mod waypoint;

pub use agent::*;
pub use contract::*;
pub use market::*;
pub use ship::*;
pub use shipyard::*;
pub use waypoint::*;
