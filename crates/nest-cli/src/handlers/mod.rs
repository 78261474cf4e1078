pub mod dirs;
pub mod help;
pub mod hub;
pub mod info;
pub mod resolve;
pub mod vars;

pub use dirs::DirsHandler;
pub use help::HelpHandler;
pub use hub::HubHandler;
pub use info::InfoHandler;
pub use resolve::ResolveHandler;
pub use vars::VarsHandler;
