pub mod frame;
pub mod target;
pub mod viewport;
