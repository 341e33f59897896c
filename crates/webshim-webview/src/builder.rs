//! Window configuration and construction.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, info};

use webshim_common::{Color, Size, WebViewError};

use crate::adapter::{Adapter, DefaultAdapter, WindowSpec};
use crate::bridge::{Bridge, BRIDGE_INIT_SCRIPT};
use crate::link::BridgeLink;
use crate::navigation::NavTarget;
use crate::webview::{check_nul, InvokeHandler, Parts, WebView};
use crate::WVResult;

pub const DEFAULT_TITLE: &str = "Application";
pub const DEFAULT_SIZE: Size = Size::new(800, 600);
pub const DEFAULT_MIN_SIZE: Size = Size::new(300, 300);

/// What the window shows first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<S: AsRef<str>> {
    /// A URL, or an inline document as a `data:text/html,` URL.
    Url(S),
    /// An HTML document, already decoded.
    Html(S),
}

impl<S: AsRef<str>> Content<S> {
    fn into_owned(self) -> Content<String> {
        match self {
            Content::Url(url) => Content::Url(url.as_ref().to_string()),
            Content::Html(html) => Content::Html(html.as_ref().to_string()),
        }
    }
}

/// Builds a [`WebView`]. Content, user data and the invoke handler are
/// required; everything else has a default.
pub struct WebViewBuilder<T, A: Adapter = DefaultAdapter> {
    title: String,
    content: Option<Content<String>>,
    size: Size,
    min_size: Size,
    resizable: bool,
    frameless: bool,
    visible: bool,
    hide_instead_of_close: bool,
    debug: bool,
    fullscreen: bool,
    color: Option<Color>,
    handler: Option<InvokeHandler<T, A>>,
    user_data: Option<T>,
    _adapter: PhantomData<A>,
}

/// Start building a webview on the default adapter.
pub fn builder<T>() -> WebViewBuilder<T> {
    WebViewBuilder::new()
}

impl<T, A: Adapter> Default for WebViewBuilder<T, A> {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            content: None,
            size: DEFAULT_SIZE,
            min_size: DEFAULT_MIN_SIZE,
            resizable: true,
            frameless: false,
            visible: true,
            hide_instead_of_close: false,
            debug: false,
            fullscreen: false,
            color: None,
            handler: None,
            user_data: None,
            _adapter: PhantomData,
        }
    }
}

impl<T, A: Adapter> WebViewBuilder<T, A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn content<S: AsRef<str>>(mut self, content: Content<S>) -> Self {
        self.content = Some(content.into_owned());
        self
    }

    /// Requested client size in logical pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn min_size(mut self, width: u32, height: u32) -> Self {
        self.min_size = Size::new(width, height);
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn frameless(mut self, frameless: bool) -> Self {
        self.frameless = frameless;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Hide the window on a close request instead of exiting.
    pub fn hide_instead_of_close(mut self, hide: bool) -> Self {
        self.hide_instead_of_close = hide;
        self
    }

    /// Enable developer tools in the browser control.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn color<C: Into<Color>>(mut self, color: C) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn user_data(mut self, user_data: T) -> Self {
        self.user_data = Some(user_data);
        self
    }

    /// Called on the GUI thread for every `window.external.invoke(arg)`.
    pub fn invoke_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&mut WebView<T, A>, &str) -> WVResult + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Create the window and browser control.
    pub fn build(self) -> WVResult<WebView<T, A>> {
        let content = self
            .content
            .ok_or(WebViewError::UninitializedField("content"))?;
        let user_data = self
            .user_data
            .ok_or(WebViewError::UninitializedField("user_data"))?;
        let handler = self
            .handler
            .ok_or(WebViewError::UninitializedField("invoke_handler"))?;

        check_nul(&self.title)?;
        let target = match content {
            Content::Url(url) => {
                check_nul(&url)?;
                NavTarget::parse(&url)
            }
            Content::Html(html) => {
                check_nul(&html)?;
                NavTarget::Html(html)
            }
        };

        let spec = WindowSpec {
            title: self.title.clone(),
            target,
            size: self.size,
            min_size: self.min_size,
            resizable: self.resizable,
            frameless: self.frameless,
            visible: self.visible,
            debug: self.debug,
            background: self.color,
        };
        debug!(title = %spec.title, size = %spec.size, target = %spec.target.describe(), "building webview");

        let mut bridge = Bridge::new();
        bridge.install()?;
        let link = BridgeLink::new();
        let adapter = A::create(&spec, BRIDGE_INIT_SCRIPT, link.clone())?;

        let mut webview = WebView::from_parts(Parts {
            adapter,
            link,
            bridge,
            handler,
            user_data,
            title: self.title,
            hide_instead_of_close: self.hide_instead_of_close,
        });
        if self.fullscreen {
            webview.set_fullscreen(true);
        }
        info!(backend = ?A::KIND, title = %webview.title(), "webview created");
        Ok(webview)
    }

    /// Build and pump until exit, returning the user data.
    pub fn run(self) -> WVResult<T> {
        self.build()?.run()
    }
}

impl<T, A: Adapter> fmt::Debug for WebViewBuilder<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebViewBuilder")
            .field("title", &self.title)
            .field("content", &self.content)
            .field("size", &self.size)
            .field("min_size", &self.min_size)
            .field("resizable", &self.resizable)
            .field("frameless", &self.frameless)
            .field("visible", &self.visible)
            .field("hide_instead_of_close", &self.hide_instead_of_close)
            .field("debug", &self.debug)
            .field("fullscreen", &self.fullscreen)
            .field("color", &self.color)
            .field("has_handler", &self.handler.is_some())
            .field("has_user_data", &self.user_data.is_some())
            .finish()
    }
}
