pub mod clock;
pub mod profile;
