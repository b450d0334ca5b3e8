//! # vbadge-broker
//!
//! The small request/response surface between the popup UI and the
//! browser runtime:
//! - [`PermissionMessageBroker`]: host permission checks/requests and
//!   keyboard shortcut lookup
//! - [`ActionClickHandler`]: injects the popup when the toolbar icon is
//!   clicked

pub mod broker;
pub mod click;
pub mod message;
pub mod runtime;

pub use broker::{host_origins, PermissionMessageBroker};
pub use click::{ActionClickHandler, POPUP_BUNDLE};
pub use message::{BackgroundRequest, BrokerReply};
pub use runtime::{CommandBinding, ExtensionRuntime, ScriptInjector, EXECUTE_ACTION_COMMAND};
