pub mod errors;
pub mod models;
pub mod ports;

pub use errors::DirectoryError;
pub use models::AuthenticatedUser;
pub use models::CredentialRecord;
pub use ports::UserDirectory;
