mod apache_store_client;

pub use apache_store_client::ApacheStoreClientAdapter;
