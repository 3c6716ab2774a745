pub mod analytics;
pub mod bucket;
pub mod chart;
pub mod range;
pub mod settings;
pub mod transaction;
