pub mod entity_handler;
pub mod permission_handler;
pub mod share_handler;
pub mod user_handler;
