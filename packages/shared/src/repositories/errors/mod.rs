pub mod user_repository_errors;
