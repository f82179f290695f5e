//! Domain logic: pricing, statuses, cart and order records

pub mod cart;
pub mod order;
pub mod pricing;
pub mod status;
pub mod value_objects;
