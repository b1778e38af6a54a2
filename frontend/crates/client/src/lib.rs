//! DarkShield client state layer
//!
//! UI-independent state the frontend renders from:
//! - `session` - persisted user list and current user
//! - `storage` - key/value persistence (memory or a directory of files)
//! - `signal` - snapshot cells readers can never see half-updated
//! - `toast`, `modal` - transient notifications and confirmation prompts
//! - `api` - HTTP client for the backend routes

pub mod api;
pub mod error;
pub mod model;
pub mod modal;
pub mod session;
pub mod signal;
pub mod storage;
pub mod toast;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use model::Role;
pub use modal::{ModalConfig, ModalService};
pub use session::SessionCache;
pub use signal::Signal;
pub use storage::{DirStore, KeyValueStore, MemoryStore};
pub use toast::{Toast, ToastKind, ToastQueue};
