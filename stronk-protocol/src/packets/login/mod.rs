//! Login state packets.

mod c_encryption_request;
mod c_login_disconnect;
mod c_login_success;
mod c_set_compression;
mod s_encryption_response;
mod s_login_start;

pub use c_encryption_request::CEncryptionRequest;
pub use c_login_disconnect::CLoginDisconnect;
pub use c_login_success::CLoginSuccess;
pub use c_set_compression::CSetCompression;
pub use s_encryption_response::SEncryptionResponse;
pub use s_login_start::SLoginStart;
