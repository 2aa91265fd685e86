mod entity_service_tests;
mod user_service_tests;
