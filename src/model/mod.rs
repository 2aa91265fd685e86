pub mod error;
pub mod guard;
pub mod repository;
pub mod request;
pub mod response;
pub mod service;
