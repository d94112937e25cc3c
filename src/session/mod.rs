pub mod host;
pub mod input;
pub mod readiness;
pub mod result;
pub mod sequence;
pub mod timer;
pub mod typing;
