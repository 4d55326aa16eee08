//! System clipboard access through the platform's copy tool
use std::io::{self, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard tool found (tried {0})")]
    Unavailable(String),
    #[error("failed to run {tool}: {source}")]
    Io {
        tool: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{tool} exited with {status}")]
    Failed { tool: &'static str, status: String },
}

/// Destination for the plain-text activity report
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Copy tools to try, in order, for the current platform
#[cfg(target_os = "macos")]
const CANDIDATES: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CANDIDATES: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Clipboard backed by pbcopy / clip / wl-copy / xclip / xsel
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn pipe_to(tool: &'static str, args: &[&str], text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(tool)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ClipboardError::Io { tool, source })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|source| ClipboardError::Io { tool, source })?;
        }

        let status = child
            .wait()
            .map_err(|source| ClipboardError::Io { tool, source })?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Failed {
                tool,
                status: status.to_string(),
            })
        }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        for &(tool, args) in CANDIDATES {
            match Self::pipe_to(tool, args, text) {
                Err(ClipboardError::Io { source, .. })
                    if source.kind() == io::ErrorKind::NotFound =>
                {
                    log::debug!("{} not installed, trying next clipboard tool", tool);
                }
                result => return result,
            }
        }

        let tried = CANDIDATES
            .iter()
            .map(|(tool, _)| *tool)
            .collect::<Vec<_>>()
            .join(", ");
        Err(ClipboardError::Unavailable(tried))
    }
}

/// Clipboard that remembers what was written, or fails on demand
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: std::rc::Rc<std::cell::RefCell<Option<String>>>,
    pub fail: bool,
}

#[cfg(test)]
impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable("test".to_string()));
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}
