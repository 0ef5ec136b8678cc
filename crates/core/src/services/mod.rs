pub mod quote_service;
pub mod rate_service;
pub mod series_service;
pub mod valuation_service;
