pub mod catalog_service;
pub mod price_format;
pub mod pricing_service;
pub mod trip_filter_service;
