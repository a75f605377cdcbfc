pub use shared::{
    ApiError, Coordinate, MapOverlay, Polyline, RouteBounds, Segment, SegmentPath, SegmentSource,
    Stop, StopMarker, TripRoute, TripRouteRequest, TripRouteResponse,
};
