//! Logging setup for Ragdesk binaries.
//!
//! - `init`: subscriber initialisation ([`init_tracing`])
//! - `notice_layer`: forwards warnings and errors to the shell's status strip

mod init;
mod notice_layer;

pub use init::{LogSettings, init_tracing};
pub use notice_layer::{NoticeLayer, NoticeReceiver, ShellNotice};
