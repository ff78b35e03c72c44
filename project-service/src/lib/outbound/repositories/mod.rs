pub mod project;
pub mod user;

pub use project::PostgresProjectRepository;
pub use user::PostgresUserRepository;
