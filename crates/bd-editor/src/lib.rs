pub mod error;
pub mod events;
pub mod factory;
pub mod highlight;
pub mod input;
pub mod props;
pub mod session;
pub mod shortcuts;
pub mod tools;

pub use error::EditError;
pub use input::{Cursor, InputEvent};
pub use props::{BlockProps, PortProps};
pub use session::{SceneMutation, Session};
pub use shortcuts::{ShortcutAction, ShortcutMap};
