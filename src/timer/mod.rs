//! Timer core and its host.
//!
//! - `engine`: the focus/break countdown state machine
//! - `session`: the tokio loop that feeds commands and ticks to the engine
//! - `dispatch`: routes engine events to sound, alerts and the terminal

pub mod dispatch;
pub mod engine;
pub mod session;

pub use dispatch::EventDispatcher;
pub use engine::{ChannelSink, NotificationSink, TimerEngine, TimerEvent};
pub use session::{
    Session, SessionCommand, SessionError, SessionHandle, Ticker, DEFAULT_TICK_PERIOD,
};
