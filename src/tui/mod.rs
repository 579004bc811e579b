pub mod actuator;
pub(crate) mod colors;
pub mod crossterm;
pub mod events;
