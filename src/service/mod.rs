pub mod entity_service;
pub mod permission_service;
pub mod share_service;
pub mod user_service;

#[cfg(test)]
mod tests;
