pub mod gpu;
pub mod privilege;
