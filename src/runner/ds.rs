pub mod error;
pub mod function_object;
pub mod list_object;
pub mod object;
pub mod operations;
pub mod realm;
pub mod value;
pub mod well_known;
