//! Shipping module - shipping classifications and their store contract.

mod shipping_model;
mod shipping_traits;

pub use shipping_model::ShippingCategory;
pub use shipping_traits::ShippingRepositoryTrait;
