pub mod draw;
pub mod meteors;
pub mod motion;
pub mod populate;
pub mod update;
