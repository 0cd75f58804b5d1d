use crate::math::angles::{deg2rad, rad2deg};

/// Initial great-circle bearing from point 1 to point 2, degrees clockwise
/// from north in `[0, 360)`.
///
/// Coincident points give `atan2(0, 0)`, which is azimuth 0.
pub fn azimuth(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = deg2rad(lat1);
    let lat2 = deg2rad(lat2);
    let delta_lon = deg2rad(lon2) - deg2rad(lon1);

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    rad2deg(y.atan2(x))
}

/// Compass bearing between two planar points, clockwise from the +y axis.
pub fn planar_azimuth(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    rad2deg((x2 - x1).atan2(y2 - y1))
}

/// Counter-clockwise angle of the segment 1 → 2 from the +x axis, radians in `(-π, π]`.
pub fn planar_angle(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (y2 - y1).atan2(x2 - x1)
}
