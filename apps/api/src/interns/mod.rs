pub mod handlers;
pub mod lifecycle;
pub mod repo;
pub mod status;
