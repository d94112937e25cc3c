pub mod components;
pub mod display;
pub mod layout;
pub mod theme;
