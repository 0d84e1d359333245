//! Dev Mode
//!
//! Watch a project directory and keep its remote instance in sync:
//! - `Coordinator` - pure single-flight state machine with trailing coalescing
//! - `DevSession` - executes coordinator commands on real threads
//! - `DevEvent` - what the session reports back to the terminal
//!
//! ## Usage
//!
//! ```ignore
//! let session = DevSession::new(instance, credentials, deployer, source, log_stream);
//! let handle = session.handle();
//! let _watch = subscribe(&dir, filter, move |path| handle.changed(path))?;
//! session.handle().ready();
//! let report = session.run(|event| render(event))?;
//! ```

mod coordinator;
mod event;
mod filter;
mod session;


pub use coordinator::{
    CloseReport, CloseStatus, Command, Coordinator, CoordinatorState, DeployReason, Trigger,
    CANCELED_MESSAGE, CLOSED_MESSAGE, STATUS_CLOSING, STATUS_DEPLOYING, STATUS_ENABLING,
    TEARDOWN_FAILED_MESSAGE,
};
pub use event::DevEvent;
pub use filter::{ActivityFilter, FilterScope};
pub use session::{DevSession, SessionHandle};
