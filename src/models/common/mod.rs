pub mod entity_id;
pub mod lenient;
pub mod notification;
pub mod response;
