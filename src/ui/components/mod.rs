pub mod dashboard;
pub mod info_bar;
pub mod keyboard_diagram;
pub mod progress_bar;
pub mod typing_line;
