pub mod rules;
pub mod session;
pub mod table;
pub mod types;

pub use session::GameSession;
pub use table::Table;
pub use types::*;
