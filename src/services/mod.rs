pub mod api;
pub mod checkout;
pub mod dashboard;
pub mod lifecycle;
pub mod listing;
pub mod normalizer;
pub mod payments;
pub mod preferences;
