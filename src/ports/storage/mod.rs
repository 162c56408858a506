mod object_store_client;

pub use object_store_client::ObjectStoreClient;
