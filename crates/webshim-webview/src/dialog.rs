//! Native file pickers and message boxes, backed by `rfd`.
//!
//! Two forms are offered: [`DialogBuilder`] borrowed from a webview for
//! typed calls, and the flat [`show`] taking a [`DialogType`] plus
//! [`DialogFlags`], with [`write_truncated`] for callers that need the
//! result in a fixed-size buffer.

use std::path::PathBuf;

use bitflags::bitflags;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use tracing::debug;

use crate::adapter::Adapter;
use crate::webview::WebView;
use crate::WVResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogType {
    Open = 0,
    Save = 1,
    Alert = 2,
}

bitflags! {
    /// File-vs-directory selection and alert severity.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DialogFlags: u32 {
        const FILE = 0;
        const DIRECTORY = 1;
        const INFO = 1 << 1;
        const WARNING = 2 << 1;
        const ERROR = 3 << 1;
        /// Selects the severity bits.
        const ALERT_MASK = 3 << 1;
    }
}

/// Severity of an alert box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
}

impl AlertLevel {
    fn from_flags(flags: DialogFlags) -> Self {
        let severity = flags & DialogFlags::ALERT_MASK;
        if severity == DialogFlags::ERROR {
            Self::Error
        } else if severity == DialogFlags::WARNING {
            Self::Warning
        } else {
            Self::Info
        }
    }
}

impl From<AlertLevel> for MessageLevel {
    fn from(level: AlertLevel) -> Self {
        match level {
            AlertLevel::Info => MessageLevel::Info,
            AlertLevel::Warning => MessageLevel::Warning,
            AlertLevel::Error => MessageLevel::Error,
        }
    }
}

/// The concrete dialog a type/flags pair asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    OpenFile,
    OpenDirectory,
    SaveFile,
    Alert(AlertLevel),
}

impl DialogKind {
    pub fn resolve(dtype: DialogType, flags: DialogFlags) -> Self {
        match dtype {
            DialogType::Open if flags.contains(DialogFlags::DIRECTORY) => Self::OpenDirectory,
            DialogType::Open => Self::OpenFile,
            DialogType::Save => Self::SaveFile,
            DialogType::Alert => Self::Alert(AlertLevel::from_flags(flags)),
        }
    }
}

/// Show a dialog and block until it is dismissed.
///
/// For file dialogs `arg` is the initial directory or file name and the
/// chosen path is returned. For alerts `arg` is the message body and
/// nothing is returned.
pub fn show(dtype: DialogType, flags: DialogFlags, title: &str, arg: &str) -> Option<String> {
    let kind = DialogKind::resolve(dtype, flags);
    debug!(?kind, title, "showing dialog");
    match kind {
        DialogKind::OpenFile => with_start(FileDialog::new().set_title(title), arg)
            .pick_file()
            .map(path_string),
        DialogKind::OpenDirectory => with_start(FileDialog::new().set_title(title), arg)
            .pick_folder()
            .map(path_string),
        DialogKind::SaveFile => with_start(FileDialog::new().set_title(title), arg)
            .save_file()
            .map(path_string),
        DialogKind::Alert(level) => {
            let _ = MessageDialog::new()
                .set_level(level.into())
                .set_title(title)
                .set_description(arg)
                .set_buttons(MessageButtons::Ok)
                .show();
            None
        }
    }
}

fn with_start(dialog: FileDialog, arg: &str) -> FileDialog {
    if arg.is_empty() {
        return dialog;
    }
    let path = PathBuf::from(arg);
    if path.is_dir() {
        return dialog.set_directory(path);
    }
    let dialog = match path.parent().filter(|p| p.is_dir()) {
        Some(parent) => dialog.set_directory(parent),
        None => dialog,
    };
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => dialog.set_file_name(name),
        None => dialog,
    }
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

/// Copy `value` into `buf` as a NUL-terminated string, cutting on a UTF-8
/// boundary when it does not fit. Returns the bytes written, NUL excluded.
pub fn write_truncated(value: &str, buf: &mut [u8]) -> usize {
    let Some(capacity) = buf.len().checked_sub(1) else {
        return 0;
    };
    let mut end = value.len().min(capacity);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    buf[..end].copy_from_slice(&value.as_bytes()[..end]);
    buf[end] = 0;
    end
}

/// Typed dialogs, borrowed from a webview so they run on its GUI thread.
pub struct DialogBuilder<'a, T, A: Adapter> {
    _webview: &'a mut WebView<T, A>,
}

impl<'a, T, A: Adapter> DialogBuilder<'a, T, A> {
    pub fn open_file(&mut self, title: &str, default_file: &str) -> WVResult<Option<PathBuf>> {
        Ok(show(DialogType::Open, DialogFlags::FILE, title, default_file).map(PathBuf::from))
    }

    pub fn choose_directory(&mut self, title: &str, default_directory: &str) -> WVResult<Option<PathBuf>> {
        Ok(show(DialogType::Open, DialogFlags::DIRECTORY, title, default_directory).map(PathBuf::from))
    }

    pub fn save_file(&mut self, title: &str, default_file: &str) -> WVResult<Option<PathBuf>> {
        Ok(show(DialogType::Save, DialogFlags::FILE, title, default_file).map(PathBuf::from))
    }

    pub fn info(&mut self, title: &str, message: &str) -> WVResult {
        show(DialogType::Alert, DialogFlags::INFO, title, message);
        Ok(())
    }

    pub fn warning(&mut self, title: &str, message: &str) -> WVResult {
        show(DialogType::Alert, DialogFlags::WARNING, title, message);
        Ok(())
    }

    pub fn error(&mut self, title: &str, message: &str) -> WVResult {
        show(DialogType::Alert, DialogFlags::ERROR, title, message);
        Ok(())
    }
}

impl<T, A: Adapter> WebView<T, A> {
    pub fn dialog(&mut self) -> DialogBuilder<'_, T, A> {
        DialogBuilder { _webview: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values_match_wire_constants() {
        assert_eq!(DialogFlags::FILE.bits(), 0);
        assert_eq!(DialogFlags::DIRECTORY.bits(), 1);
        assert_eq!(DialogFlags::INFO.bits(), 2);
        assert_eq!(DialogFlags::WARNING.bits(), 4);
        assert_eq!(DialogFlags::ERROR.bits(), 6);
        assert_eq!(DialogFlags::ALERT_MASK.bits(), 6);
    }

    #[test]
    fn raw_bits_round_trip_through_the_flag_set() {
        let flags = DialogFlags::from_bits_truncate(6 | 1);
        assert!(flags.contains(DialogFlags::DIRECTORY));
        assert_eq!(flags & DialogFlags::ALERT_MASK, DialogFlags::ERROR);
        assert!(DialogFlags::default().contains(DialogFlags::FILE));
        assert_eq!(DialogFlags::from_bits(1 << 5), None);
    }

    #[test]
    fn open_with_directory_flag_picks_folder() {
        assert_eq!(
            DialogKind::resolve(DialogType::Open, DialogFlags::DIRECTORY),
            DialogKind::OpenDirectory
        );
        assert_eq!(
            DialogKind::resolve(DialogType::Open, DialogFlags::FILE),
            DialogKind::OpenFile
        );
        assert_eq!(
            DialogKind::resolve(DialogType::Save, DialogFlags::DIRECTORY),
            DialogKind::SaveFile
        );
    }

    #[test]
    fn alert_severity_comes_from_masked_bits() {
        let resolve = |flags| DialogKind::resolve(DialogType::Alert, flags);
        assert_eq!(resolve(DialogFlags::FILE), DialogKind::Alert(AlertLevel::Info));
        assert_eq!(resolve(DialogFlags::INFO), DialogKind::Alert(AlertLevel::Info));
        assert_eq!(resolve(DialogFlags::WARNING), DialogKind::Alert(AlertLevel::Warning));
        assert_eq!(
            resolve(DialogFlags::ERROR | DialogFlags::DIRECTORY),
            DialogKind::Alert(AlertLevel::Error)
        );
    }

    #[test]
    fn write_truncated_fits_and_terminates() {
        let mut buf = [0xffu8; 16];
        let written = write_truncated("/tmp/a.txt", &mut buf);
        assert_eq!(written, 10);
        assert_eq!(&buf[..11], b"/tmp/a.txt\0");
    }

    #[test]
    fn write_truncated_cuts_on_char_boundary() {
        let mut buf = [0xffu8; 5];
        // "aé" is 3 bytes, "aéé" is 5; only 4 fit before the NUL.
        let written = write_truncated("aéé", &mut buf);
        assert_eq!(written, 3);
        assert_eq!(&buf[..4], "aé\0".as_bytes());
    }

    #[test]
    fn write_truncated_into_empty_buffer_writes_nothing() {
        let mut buf: [u8; 0] = [];
        assert_eq!(write_truncated("x", &mut buf), 0);
        let mut one = [0xffu8; 1];
        assert_eq!(write_truncated("x", &mut one), 0);
        assert_eq!(one, [0]);
    }
}
