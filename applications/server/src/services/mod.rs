/// Server services
pub mod auth;
pub mod device_directory;
pub mod diagnostic_directory;
pub mod password;
pub mod role_directory;
pub mod search;
pub mod user_directory;

pub use auth::{AuthService, Caller};
pub use device_directory::DeviceDirectory;
pub use diagnostic_directory::DiagnosticPointDirectory;
pub use password::{BcryptPasswordEncoder, PasswordEncoder};
pub use role_directory::RoleDirectory;
pub use search::SearchResult;
pub use user_directory::UserDirectory;
