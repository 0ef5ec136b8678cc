pub mod analytics;
pub mod chart;
pub mod position;
pub mod quote;
pub mod rate;
pub mod settings;
