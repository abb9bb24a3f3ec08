pub mod pool;
pub mod slide;
pub mod slots;
