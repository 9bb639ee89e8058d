//! Pool core: admission, fan-out/fan-in, and worker loops.
//!
//! The only public API from this module is [`Pool`]. Internal modules:
//! - [`batch`]: per-batch synchronization context and the job unit protocol;
//! - [`worker`]: the long-lived loops draining the shared queue;
//! - [`core`]: pool lifecycle, admission control, and the fan-in loop.

mod batch;
mod core;
mod worker;

pub use self::core::Pool;
