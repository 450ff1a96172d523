mod machine;
mod state;

pub use machine::{Dispatch, Message, Navigator, NavigatorConfig};
pub use state::NavigationState;
