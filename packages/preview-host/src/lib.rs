//! # Preview Host
//!
//! Owns the rendering surface for the live preview and tracks what it is
//! doing:
//!
//! ```text
//!            render / refresh
//!                 │
//!                 ▼
//!   ┌────────► loading ──── preview-ready ────► ready
//!   │             │                               │
//!   │             ├── preview-error ──► error ◄───┘ (late ready flips back)
//!   │             └── timeout ────────► error
//!   └──────────── refresh ◄──────────────┘
//! ```
//!
//! The surface runs in isolation and talks back only through a
//! [`MessagePort`]. Each mount carries a rebuild id and messages tagged with
//! an older id are dropped.
//!
//! ```ignore
//! let mut host = PreviewHost::new(surface);
//! host.render(store.project())?;
//! let state = host.next_transition().await;
//! ```

mod device;
mod errors;
mod host;
mod message;
mod surface;

pub use device::{Device, MOBILE_BREAKPOINT_PX};
pub use errors::{HostError, SurfaceError};
pub use host::{
    HostOptions, PreviewHost, PreviewState, PreviewStatus, DEFAULT_TIMEOUT, ERROR_PREFIX,
    LOADING_MESSAGE, TIMEOUT_MESSAGE,
};
pub use message::SurfaceMessage;
pub use surface::{MessagePort, MountRequest, RenderSurface};
