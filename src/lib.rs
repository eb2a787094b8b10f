pub mod pressure;
pub mod system;
pub mod table;
