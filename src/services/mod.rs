pub mod credentials;
pub mod tasks;

pub use credentials::CredentialService;
pub use tasks::TaskService;
