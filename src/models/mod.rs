pub mod booking;
pub mod currency;
pub mod dashboard;
pub mod offer;

pub use booking::{Booking, BookingKind, BookingTerms, Deliverable, Role};
pub use currency::Currency;
pub use dashboard::{BookingCard, DashboardEvent, DashboardSnapshot, DashboardStats, SubscriptionProgress};
pub use offer::{BidDraft, Offer, PendingPayment};
