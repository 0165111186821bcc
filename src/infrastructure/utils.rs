pub mod get_client_ip;
pub mod mime;
pub mod sanitize;
