mod api;
pub mod ast;
pub mod util;

pub use api::NameParser;
