//! Shared primitive types used across the entire pipeline.

/// Identifier of the user placing an order.
pub type UserId = String;

/// Identifier of the partner the order was placed through.
pub type PartnerId = String;

/// ISO 3166-1 alpha-2 country code as it appears in the order log.
pub type CountryCode = String;

/// Resolved country display name.
pub type CountryName = String;

/// The status value that marks an accepted payment.
pub const SUCCESS_STATUS: &str = "success";
