pub mod insights;
pub mod meal_plan;
pub mod models;
pub mod reference;
pub mod service;
pub mod stats;
pub mod store;
pub mod targets;

pub use service::FitLifeService;
