pub mod relay;
pub mod setup;
