//! Embed a native browser control in a window and talk to its page.
//!
//! One handle type, [`WebView`], sits on an adapter chosen at build time:
//! - [`NativeAdapter`](adapter::NativeAdapter) (feature `native`): a `winit`
//!   window with a `wry` browser control
//! - [`HeadlessAdapter`]: an in-memory window for tests and CI
//!
//! Around the handle:
//! - Lifecycle: [`WebViewBuilder`] creates, drop or `destroy` tears down
//! - Navigation to URLs, HTML strings and `data:text/html,` documents
//! - Script bridge: `window.external.invoke(string)` into the invoke
//!   handler, `eval`/`eval_sync`/`inject_css` out to the page
//! - Event pump: `step`, `poll`, `run`
//! - Cross-thread [`Handle::dispatch`]
//! - Window controls: title, fullscreen, maximize, color, zoom, and so on
//! - Native dialogs

pub mod adapter;
pub mod appearance;
pub mod bridge;
pub mod builder;
pub mod dialog;
pub mod dispatch;
pub mod events;
pub mod js;
pub mod link;
pub mod log;
pub mod navigation;
pub mod webview;

pub use adapter::{
    Adapter, BackendKind, Capabilities, DefaultAdapter, HeadlessAdapter, HeadlessPage, PumpMode,
};
pub use appearance::Appearance;
pub use bridge::BridgeState;
pub use builder::{builder, Content, WebViewBuilder};
pub use dialog::{DialogBuilder, DialogFlags, DialogType};
pub use dispatch::Handle;
pub use webview::{WebView, SYNC_EVAL_TIMEOUT};
pub use webshim_common::{Color, WebViewError as Error};

pub type WVResult<T = ()> = Result<T, Error>;
