pub mod nominatim;
pub mod ors;
pub mod places;
pub mod types;

pub use nominatim::{NominatimProvider, NOMINATIM_BASE_URL};
pub use ors::{OrsProvider, ORS_BASE_URL};
pub use places::PlaceService;
