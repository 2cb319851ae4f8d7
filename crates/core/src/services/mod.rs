pub mod chart_service;
pub mod downsample;
pub mod investment_service;
