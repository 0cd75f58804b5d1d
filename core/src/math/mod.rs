pub mod angles;
pub mod geodesy;
pub mod stats;

pub use angles::{deg2rad, normalize_degrees, rad2deg};
pub use geodesy::{azimuth, planar_angle, planar_azimuth};
pub use stats::StatsHelper;
