//! Pricebook Domain Concerns

pub mod legacy;
pub mod pricing;
pub mod vouchers;
