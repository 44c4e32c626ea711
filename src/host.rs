//! Host capabilities and the explicit plugin context.
//!
//! The host hands the plugin an [`InterfaceProvider`] once at load time.
//! Everything the plugin keeps from it lives in a [`Plugin`] value that is
//! passed to (or owned by) whatever calls into the painters.

use core::fmt;
use std::sync::Arc;

use crate::{Error, Line, Point, Side, bytes};

/// Severity of a message written to the host log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Error,
    Warning,
    Log,
}

/// The host's logging facility.
pub trait HostLog: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

/// Queryable host subsystems.
pub trait InterfaceProvider {
    /// The host log, if the host exposes one.
    fn logger(&self) -> Option<Arc<dyn HostLog>>;
}

/// Plugin state for one host attachment.
#[derive(Clone, Default)]
pub struct Plugin {
    log: Option<Arc<dyn HostLog>>,
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("has_log", &self.has_log())
            .finish()
    }
}

impl Plugin {
    /// Attach to a host, keeping its log for the lifetime of the returned value.
    pub fn new(provider: &dyn InterfaceProvider) -> Self {
        let plugin = Self {
            log: provider.logger(),
        };
        tracing::debug!(has_log = plugin.has_log(), "plugin attached to host");
        plugin.log(LogLevel::Log, "sprite-cutter attached");
        plugin
    }

    /// A context with no host behind it; messages only reach `tracing`.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn has_log(&self) -> bool {
        self.log.is_some()
    }

    /// Write to the host log. No-op without one.
    pub fn log(&self, level: LogLevel, message: &str) {
        if let Some(log) = &self.log {
            log.log(level, message);
        }
    }

    /// Log a rejected call to both `tracing` and the host, then hand the error back.
    pub fn reject(&self, op: &str, err: Error) -> Error {
        tracing::warn!(op, code = err.code(), %err, "rejected texture call");
        self.log(LogLevel::Warning, &format!("{op}: {err}"));
        err
    }

    /// Tint a tightly packed RGBA texture along the line `p1`–`p2`.
    ///
    /// See [`bytes::tint_by_line`]. On error the buffer is untouched and the
    /// failure has been reported to the host log.
    pub fn process_texture(
        &self,
        pixels: &mut [u8],
        width: usize,
        height: usize,
        p1: Point,
        p2: Point,
    ) -> Result<(), Error> {
        Line::new(p1, p2)
            .map_err(Error::from)
            .and_then(|line| {
                bytes::tint_by_line(pixels, width, height, &line).map_err(Error::from)
            })
            .map_err(|err| self.reject("process_texture", err))
    }

    /// Make `side` of the line `p1`–`p2` fully transparent.
    pub fn fade_texture(
        &self,
        pixels: &mut [u8],
        width: usize,
        height: usize,
        p1: Point,
        p2: Point,
        side: Side,
    ) -> Result<(), Error> {
        Line::new(p1, p2)
            .map_err(Error::from)
            .and_then(|line| {
                bytes::fade_by_line(pixels, width, height, &line, side).map_err(Error::from)
            })
            .map_err(|err| self.reject("fade_texture", err))
    }
}
