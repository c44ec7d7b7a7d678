pub mod message;
pub mod reference;
pub mod translation;

pub use message::*;
pub use reference::*;
pub use translation::*;
