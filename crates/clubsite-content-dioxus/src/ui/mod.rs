pub mod app;
pub mod bespoke;
pub mod components;

pub use app::App;
