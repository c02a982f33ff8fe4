pub mod carrier;
pub mod chat;
pub mod invoice;
pub mod load;
pub mod notification;
pub mod shipment;
pub mod stats;
