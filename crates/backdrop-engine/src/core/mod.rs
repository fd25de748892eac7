pub mod debounce;
pub mod populations;
pub mod rng;
pub mod surface;
pub mod time;
