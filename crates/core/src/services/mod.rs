pub mod aggregation_service;
pub mod analytics_service;
pub mod axis_filler;
pub mod chart_service;
pub mod import_service;
pub mod range_service;
