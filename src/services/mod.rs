mod delete_service_impl;

pub use delete_service_impl::{DeleteServiceBuilder, DeleteServiceImpl};
