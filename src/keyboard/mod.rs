pub mod display;
pub mod finger;
pub mod highlight;
pub mod model;
