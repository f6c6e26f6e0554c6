pub mod converters;
pub mod memory;
pub mod postgres;
pub mod rows;
