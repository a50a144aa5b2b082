use super::error::RoutingError;
use super::point::{GeoPoint, Route};
use super::service::RouteProvider;
use std::time::Duration;

/// Outcome of fetching one leg.
///
/// A failed fetch still yields a (empty) route through [`RouteFetch::into_route`];
/// callers must treat that as "comparison not possible".
#[derive(Debug)]
pub enum RouteFetch {
    Fetched(Route),
    Failed(RoutingError),
}

impl RouteFetch {
    pub fn is_fetched(&self) -> bool {
        matches!(self, RouteFetch::Fetched(_))
    }

    pub fn into_route(self) -> Route {
        match self {
            RouteFetch::Fetched(route) => route,
            RouteFetch::Failed(_) => Route::empty(),
        }
    }

    pub fn into_result(self) -> Result<Route, RoutingError> {
        match self {
            RouteFetch::Fetched(route) => Ok(route),
            RouteFetch::Failed(err) => Err(err),
        }
    }
}

/// Fetches the driving route from `origin` to `destination`.
///
/// One provider call, bounded by `timeout`, no retry. Errors are captured in
/// the returned [`RouteFetch`] rather than propagated.
pub async fn fetch_route<R: RouteProvider>(
    provider: &R,
    origin: GeoPoint,
    destination: GeoPoint,
    timeout: Duration,
) -> RouteFetch {
    match tokio::time::timeout(timeout, provider.directions(origin, destination)).await {
        Ok(Ok(route)) if route.is_empty() => {
            log::warn!("Route {} -> {} came back without geometry", origin, destination);
            RouteFetch::Failed(RoutingError::EmptyGeometry)
        }
        Ok(Ok(route)) => {
            log::debug!(
                "Fetched route {} -> {} with {} points",
                origin,
                destination,
                route.len()
            );
            RouteFetch::Fetched(route)
        }
        Ok(Err(err)) => {
            log::warn!("Routing failed for {} -> {}: {}", origin, destination, err);
            RouteFetch::Failed(err)
        }
        Err(_) => {
            log::warn!(
                "Routing for {} -> {} timed out after {:?}",
                origin,
                destination,
                timeout
            );
            RouteFetch::Failed(RoutingError::Timeout(timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<Vec<GeoPoint>>);

    impl RouteProvider for Fixed {
        async fn directions(&self, _: GeoPoint, _: GeoPoint) -> Result<Route, RoutingError> {
            match &self.0 {
                Some(points) => Ok(Route::new(points.clone())),
                None => Err(RoutingError::UnroutablePoint),
            }
        }
    }

    struct Stalled;

    impl RouteProvider for Stalled {
        async fn directions(&self, _: GeoPoint, _: GeoPoint) -> Result<Route, RoutingError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Route::new(vec![GeoPoint::new(0.0, 0.0)]))
        }
    }

    const A: GeoPoint = GeoPoint::new(0.0, 0.0);
    const B: GeoPoint = GeoPoint::new(1.0, 1.0);

    #[tokio::test]
    async fn test_fetched_route_is_kept() {
        let provider = Fixed(Some(vec![A, B]));
        let fetch = fetch_route(&provider, A, B, Duration::from_secs(1)).await;
        assert!(fetch.is_fetched());
        assert_eq!(fetch.into_route().points(), &[A, B]);
    }

    #[tokio::test]
    async fn test_provider_error_yields_empty_route() {
        let fetch = fetch_route(&Fixed(None), A, B, Duration::from_secs(1)).await;
        assert!(!fetch.is_fetched());
        assert!(fetch.into_route().is_empty());
    }

    #[tokio::test]
    async fn test_empty_geometry_is_a_failure() {
        let fetch = fetch_route(&Fixed(Some(vec![])), A, B, Duration::from_secs(1)).await;
        assert!(matches!(
            fetch.into_result(),
            Err(RoutingError::EmptyGeometry)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_failure() {
        let fetch = fetch_route(&Stalled, A, B, Duration::from_secs(5)).await;
        match fetch.into_result() {
            Err(RoutingError::Timeout(after)) => assert_eq!(after, Duration::from_secs(5)),
            other => panic!("unexpected {other:?}"),
        }
    }
}
