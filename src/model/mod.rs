pub mod attendance;
pub mod merged;
pub mod register;
pub mod summary;
