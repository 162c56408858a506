mod delete_service;

pub use delete_service::DeleteService;
