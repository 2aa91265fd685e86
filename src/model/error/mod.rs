pub mod entity_errors;
pub mod permission_errors;
pub mod share_errors;
pub mod user_errors;
