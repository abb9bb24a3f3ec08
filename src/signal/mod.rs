pub mod timing;
pub mod trigger;
