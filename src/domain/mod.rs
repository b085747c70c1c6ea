pub mod agent;
pub mod pricing;
pub mod stage;
pub mod usage;
