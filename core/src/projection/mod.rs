pub mod identity;
pub mod mercator;

pub use identity::IdentityProjection;
pub use mercator::WebMercator;
