mod interactive;
pub mod status;

pub use status::handle_git;
