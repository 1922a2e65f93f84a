pub mod components;
pub mod frame;
pub mod paginator;
pub mod terminal;
pub mod theme;
