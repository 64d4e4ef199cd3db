mod runtime;
mod state;

pub use self::runtime::{MockRuntime, MockStateHandle};
pub use self::state::MockDeviceState;
