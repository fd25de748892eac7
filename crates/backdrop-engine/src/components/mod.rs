pub mod point;
pub mod meteor;
pub mod satellite;
pub mod asteroid;
pub mod nebula;
