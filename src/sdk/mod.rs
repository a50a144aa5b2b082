pub mod comparison;
pub mod config;
pub mod intersection;
pub mod overlap;
pub mod routing;
pub mod util;
