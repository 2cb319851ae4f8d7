pub mod chart;
pub mod investment;
pub mod series;
