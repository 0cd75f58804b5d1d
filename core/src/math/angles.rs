use std::f64::consts::PI;

pub fn deg2rad(degrees: f64) -> f64 {
    (PI / 180.0) * degrees
}

/// Converts radians to a direction in degrees, wrapped into `[0, 360)`.
pub fn rad2deg(radians: f64) -> f64 {
    normalize_degrees((180.0 / PI) * radians)
}

/// Wraps any angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round a tiny negative input up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Smallest absolute difference between two directions, in `[0, 180]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = normalize_degrees(a - b);
    diff.min(360.0 - diff)
}
