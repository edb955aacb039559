pub mod canvas;
pub mod page;
pub mod sample;
pub mod store;
