use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// openrouteservice free tier allows 40 directions requests per minute.
pub const ORS_REQUESTS_PER_MINUTE: u32 = 40;

/// Nominatim's usage policy caps clients at one request per second.
pub const NOMINATIM_REQUESTS_PER_SECOND: u32 = 1;

pub fn ors_limiter() -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(at_least_one(
        ORS_REQUESTS_PER_MINUTE,
    ))))
}

pub fn nominatim_limiter() -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_second(at_least_one(
        NOMINATIM_REQUESTS_PER_SECOND,
    ))))
}

fn at_least_one(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
}
