use crate::domain::Coordinate;

/// Map region to frame the displayed points: a center and a fixed physical span in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub latitudinal_span_m: f64,
    pub longitudinal_span_m: f64,
}
