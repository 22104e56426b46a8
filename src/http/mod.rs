pub mod client;
pub mod header;
pub mod method;
pub mod request;
pub mod response;
pub mod transport;
pub mod url;
