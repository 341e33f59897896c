//! JSON commands sent by the page through `window.external.invoke`.
//!
//! Every message is an object whose `cmd` field names the command, e.g.
//! `{"cmd": "zoom", "level": 1.5}`. Unknown or malformed messages are
//! logged and dropped; they never reach the window.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use webshim_webview::{js, log, Adapter, WVResult, WebView};

use crate::launch::AppState;

// =============================================================================
// COMMAND ALLOWLIST
// =============================================================================

/// Commands the page may send. Anything else is rejected and logged.
const ALLOWED_COMMANDS: &[&str] = &[
    "set_title",
    "fullscreen",
    "maximize",
    "minimize",
    "color",
    "zoom",
    "inject_css",
    "open",
    "save",
    "alert",
    "log",
    "exit",
];

pub fn is_command_allowed(cmd: &str) -> bool {
    ALLOWED_COMMANDS.contains(&cmd)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    SetTitle {
        title: String,
    },
    /// Toggles when `on` is absent.
    Fullscreen {
        on: Option<bool>,
    },
    Maximize {
        on: Option<bool>,
    },
    Minimize,
    Color {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: u8,
    },
    Zoom {
        level: f64,
    },
    InjectCss {
        css: String,
    },
    Open,
    Save,
    Alert {
        message: String,
    },
    Log {
        message: String,
    },
    Exit,
}

fn opaque() -> u8 {
    255
}

/// Why a message was dropped.
#[derive(Debug, PartialEq)]
pub enum Rejection {
    NotJson,
    MissingCmd,
    Unknown(String),
    BadArguments { cmd: String, error: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotJson => write!(f, "not a JSON object"),
            Self::MissingCmd => write!(f, "missing string field `cmd`"),
            Self::Unknown(cmd) => write!(f, "unknown command `{cmd}`"),
            Self::BadArguments { cmd, error } => write!(f, "bad arguments for `{cmd}`: {error}"),
        }
    }
}

/// Parse and allow-list one message body.
pub fn parse(body: &str) -> Result<Command, Rejection> {
    let value: Value = serde_json::from_str(body).map_err(|_| Rejection::NotJson)?;
    let cmd = value
        .get("cmd")
        .and_then(Value::as_str)
        .ok_or(Rejection::MissingCmd)?
        .to_string();
    if !is_command_allowed(&cmd) {
        return Err(Rejection::Unknown(cmd));
    }
    serde_json::from_value(value).map_err(|e| Rejection::BadArguments {
        cmd,
        error: e.to_string(),
    })
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Invoke handler for the demo page.
pub fn handle<A: Adapter>(webview: &mut WebView<AppState, A>, body: &str) -> WVResult {
    let command = match parse(body) {
        Ok(command) => command,
        Err(rejection) => {
            tracing::warn!(
                body_len = body.len(),
                %rejection,
                "page command rejected"
            );
            return Ok(());
        }
    };

    tracing::debug!(?command, "page command dispatched");
    webview.user_data_mut().commands += 1;
    apply(webview, command)
}

fn apply<A: Adapter>(webview: &mut WebView<AppState, A>, command: Command) -> WVResult {
    match command {
        Command::SetTitle { title } => webview.set_title(&title)?,
        Command::Fullscreen { on } => {
            let on = on.unwrap_or(!webview.is_fullscreen());
            webview.set_fullscreen(on);
        }
        Command::Maximize { on } => {
            let on = on.unwrap_or(!webview.is_maximized());
            webview.set_maximized(on);
        }
        Command::Minimize => webview.set_minimized(true),
        Command::Color { r, g, b, a } => webview.set_color((r, g, b, a)),
        Command::Zoom { level } => webview.set_zoom_level(level),
        Command::InjectCss { css } => webview.inject_css(&css)?,
        Command::Open => {
            let picked = webview.dialog().open_file("Open file", "")?;
            report_path(webview, picked)?;
        }
        Command::Save => {
            let picked = webview.dialog().save_file("Save file", "")?;
            report_path(webview, picked)?;
        }
        Command::Alert { message } => webview.dialog().info("webshim", &message)?,
        Command::Log { message } => log::print_log(&message),
        Command::Exit => webview.exit(),
    }
    Ok(())
}

fn report_path<A: Adapter>(
    webview: &mut WebView<AppState, A>,
    picked: Option<std::path::PathBuf>,
) -> WVResult {
    let text = match picked {
        Some(path) => path.display().to_string(),
        None => "(cancelled)".to_string(),
    };
    show(webview, &text)
}

/// Put `text` in the page's output line.
pub fn show<A: Adapter>(webview: &mut WebView<AppState, A>, text: &str) -> WVResult {
    webview.eval(&format!(
        "window.webshim && window.webshim.show({});",
        js::string_literal(text)
    ))
}
