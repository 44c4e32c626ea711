//! Unity native plugin bridge.
//!
//! The C exports below are the only code in the crate that touches
//! process-wide state. Each one resolves the current [`Plugin`] from a
//! single `RwLock` slot, converts the raw arguments, and forwards to the
//! safe API. Errors become negative status codes (see [`Error::code`]) or,
//! for the `void` entry points, a warning in the host log.

#![allow(unsafe_code)]

use core::ffi::{c_char, c_int, c_void};
use core::ptr::{self, NonNull};
use std::ffi::CString;
use std::sync::{Arc, PoisonError, RwLock};

use crate::{Error, HostLog, InterfaceProvider, LogLevel, Plugin, Point, Side, SizeError};

// ===========================================================================
// Host ABI
// ===========================================================================

/// 128-bit interface identifier, split the way the host passes it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnityInterfaceGuid {
    pub high: u64,
    pub low: u64,
}

impl UnityInterfaceGuid {
    pub const fn new(high: u64, low: u64) -> Self {
        Self { high, low }
    }
}

/// GUID of `IUnityLog`.
pub const IUNITY_LOG_GUID: UnityInterfaceGuid =
    UnityInterfaceGuid::new(0x9E7507FA5B444D5D, 0x92FB979515EA83FC);

pub type GetInterfaceFn = unsafe extern "system" fn(UnityInterfaceGuid) -> *mut c_void;
pub type RegisterInterfaceFn = unsafe extern "system" fn(UnityInterfaceGuid, *mut c_void);
pub type GetInterfaceSplitFn = unsafe extern "system" fn(u64, u64) -> *mut c_void;
pub type RegisterInterfaceSplitFn = unsafe extern "system" fn(u64, u64, *mut c_void);

/// The host's interface registry. Field order is ABI.
#[repr(C)]
pub struct IUnityInterfaces {
    pub get_interface: Option<GetInterfaceFn>,
    pub register_interface: Option<RegisterInterfaceFn>,
    pub get_interface_split: Option<GetInterfaceSplitFn>,
    pub register_interface_split: Option<RegisterInterfaceSplitFn>,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnityLogType {
    Error = 0,
    Warning = 2,
    Log = 3,
    Exception = 4,
}

impl From<LogLevel> for UnityLogType {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warning => Self::Warning,
            LogLevel::Log => Self::Log,
        }
    }
}

pub type LogFn = unsafe extern "system" fn(UnityLogType, *const c_char, *const c_char, c_int);

#[repr(C)]
pub struct IUnityLog {
    pub log: Option<LogFn>,
}

// ===========================================================================
// Safe wrappers
// ===========================================================================

/// A borrowed host interface table.
#[derive(Clone, Copy)]
pub struct UnityInterfaces<'a> {
    table: &'a IUnityInterfaces,
}

impl<'a> UnityInterfaces<'a> {
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must point to a valid `IUnityInterfaces` that stays
    /// alive and unmodified for `'a`, and whose function pointers are sound
    /// to call with any GUID.
    pub unsafe fn from_ptr(ptr: *const IUnityInterfaces) -> Option<Self> {
        // SAFETY: validity for 'a is guaranteed by the caller.
        unsafe { ptr.as_ref() }.map(|table| Self { table })
    }

    /// Look up an interface, preferring the split-GUID entry point.
    pub fn get_interface(&self, guid: UnityInterfaceGuid) -> *mut c_void {
        // SAFETY: `from_ptr` requires both lookups to accept any GUID.
        if let Some(get) = self.table.get_interface_split {
            unsafe { get(guid.high, guid.low) }
        } else if let Some(get) = self.table.get_interface {
            unsafe { get(guid) }
        } else {
            ptr::null_mut()
        }
    }
}

impl InterfaceProvider for UnityInterfaces<'_> {
    fn logger(&self) -> Option<Arc<dyn HostLog>> {
        let table = NonNull::new(self.get_interface(IUNITY_LOG_GUID).cast::<IUnityLog>())?;
        // SAFETY: the host returned this pointer for the IUnityLog GUID.
        let log = unsafe { UnityLog::from_raw(table) }?;
        Some(Arc::new(log))
    }
}

/// `IUnityLog` as a [`HostLog`].
///
/// Only the function pointer is kept, so the value does not borrow the table.
#[derive(Debug, Clone, Copy)]
pub struct UnityLog {
    log: LogFn,
}

impl UnityLog {
    /// Returns `None` when the table has no log function.
    ///
    /// # Safety
    ///
    /// `table` must point to a valid `IUnityLog` whose function stays
    /// callable, from any thread, for as long as the returned value is used.
    pub unsafe fn from_raw(table: NonNull<IUnityLog>) -> Option<Self> {
        // SAFETY: guaranteed by the caller.
        unsafe { table.as_ref() }.log.map(|log| Self { log })
    }
}

impl HostLog for UnityLog {
    fn log(&self, level: LogLevel, message: &str) {
        let message = CString::new(message.replace('\0', " ")).unwrap_or_default();
        // SAFETY: both strings are NUL-terminated and outlive the call;
        // callability of `log` was promised to `from_raw`.
        unsafe {
            (self.log)(
                level.into(),
                message.as_ptr(),
                c"sprite_cutter".as_ptr(),
                0,
            );
        }
    }
}

// ===========================================================================
// Process-wide slot
// ===========================================================================

static PLUGIN: RwLock<Option<Plugin>> = RwLock::new(None);

fn install(plugin: Option<Plugin>) -> Option<Plugin> {
    let mut slot = PLUGIN.write().unwrap_or_else(PoisonError::into_inner);
    core::mem::replace(&mut *slot, plugin)
}

/// The installed plugin, or a detached one before load.
fn current() -> Plugin {
    PLUGIN
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_else(Plugin::detached)
}

// ===========================================================================
// Argument conversion
// ===========================================================================

fn dimensions(width: i32, height: i32) -> Result<(usize, usize), Error> {
    match (usize::try_from(width), usize::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok((w, h)),
        _ => Err(SizeError::InvalidDimensions.into()),
    }
}

fn implied_len(width: usize, height: usize) -> Result<usize, Error> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or(SizeError::Overflow.into())
}

/// Validate raw texture arguments and borrow the pixels.
///
/// With `len == None` the length is taken to be `width * height * 4`.
///
/// # Safety
///
/// A non-null `buffer` must be valid for reads and writes of the stated
/// (or implied) length and not aliased for `'a`.
unsafe fn texture<'a>(
    buffer: *mut u8,
    len: Option<usize>,
    width: i32,
    height: i32,
) -> Result<(&'a mut [u8], usize, usize), Error> {
    if buffer.is_null() {
        return Err(Error::NullBuffer);
    }
    let (w, h) = dimensions(width, height)?;
    let len = match len {
        Some(len) if len > isize::MAX as usize => return Err(SizeError::Overflow.into()),
        Some(len) => len,
        None => implied_len(w, h)?,
    };
    // SAFETY: non-null, in-bounds for `len` and unaliased per the caller.
    let pixels = unsafe { core::slice::from_raw_parts_mut(buffer, len) };
    Ok((pixels, w, h))
}

fn status(result: Result<(), Error>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => err.code(),
    }
}

// ===========================================================================
// C exports
// ===========================================================================

/// Host load callback. A null table leaves the current state alone.
///
/// # Safety
///
/// See [`UnityInterfaces::from_ptr`]; the table must stay valid until
/// [`UnityPluginUnload`].
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub unsafe extern "C" fn UnityPluginLoad(interfaces: *mut IUnityInterfaces) {
    // SAFETY: forwarded from the caller.
    let Some(interfaces) = (unsafe { UnityInterfaces::from_ptr(interfaces) }) else {
        tracing::debug!("load called with a null interface table");
        return;
    };
    install(Some(Plugin::new(&interfaces)));
}

/// Host unload callback. Drops the stored log.
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub extern "C" fn UnityPluginUnload() {
    if let Some(plugin) = install(None) {
        plugin.log(LogLevel::Log, "sprite-cutter detached");
    }
}

/// Managed-side variant of [`UnityPluginLoad`] taking the table as an integer handle.
///
/// # Safety
///
/// `handle` must be zero or the address of a table valid as for [`UnityPluginLoad`].
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub unsafe extern "C" fn LoadUnityInterfacePtr(handle: u64) {
    let Ok(addr) = usize::try_from(handle) else {
        tracing::warn!(handle, "interface handle does not fit a pointer, ignoring");
        return;
    };
    // SAFETY: forwarded from the caller.
    unsafe { UnityPluginLoad(addr as *mut IUnityInterfaces) }
}

/// Tint a `width * height` RGBA texture along the line (p1x, p1y)-(p2x, p2y).
///
/// Invalid input is reported to the host log and the buffer is left alone.
///
/// # Safety
///
/// `buffer` must be null or valid for reads and writes of
/// `width * height * 4` bytes, with no other live reference to it.
#[unsafe(no_mangle)]
#[allow(non_snake_case)]
pub unsafe extern "C" fn ProcessTexture2D(
    buffer: *mut u8,
    width: i32,
    height: i32,
    p1x: f32,
    p1y: f32,
    p2x: f32,
    p2y: f32,
) {
    let plugin = current();
    // SAFETY: forwarded from the caller.
    match unsafe { texture(buffer, None, width, height) } {
        Ok((pixels, w, h)) => {
            let (p1, p2) = (Point::new(p1x, p1y), Point::new(p2x, p2y));
            // Void ABI: the error has already been logged by `process_texture`.
            plugin.process_texture(pixels, w, h, p1, p2).ok();
        }
        Err(err) => {
            plugin.reject("ProcessTexture2D", err);
        }
    }
}

/// [`ProcessTexture2D`] with an explicit buffer length. Returns 0 or a negative code.
///
/// # Safety
///
/// `buffer` must be null or valid for reads and writes of `len` bytes, with
/// no other live reference to it.
#[unsafe(no_mangle)]
#[allow(non_snake_case, clippy::too_many_arguments)]
pub unsafe extern "C" fn ProcessTexture2DChecked(
    buffer: *mut u8,
    len: usize,
    width: i32,
    height: i32,
    p1x: f32,
    p1y: f32,
    p2x: f32,
    p2y: f32,
) -> i32 {
    let plugin = current();
    // SAFETY: forwarded from the caller.
    let result = unsafe { texture(buffer, Some(len), width, height) }
        .map_err(|err| plugin.reject("ProcessTexture2DChecked", err))
        .and_then(|(pixels, w, h)| {
            plugin.process_texture(pixels, w, h, Point::new(p1x, p1y), Point::new(p2x, p2y))
        });
    status(result)
}

/// Zero the alpha on one side of the line. `side` is 0 for above, 1 for below.
///
/// Returns 0 or a negative code.
///
/// # Safety
///
/// As for [`ProcessTexture2DChecked`].
#[unsafe(no_mangle)]
#[allow(non_snake_case, clippy::too_many_arguments)]
pub unsafe extern "C" fn FadeTexture2D(
    buffer: *mut u8,
    len: usize,
    width: i32,
    height: i32,
    p1x: f32,
    p1y: f32,
    p2x: f32,
    p2y: f32,
    side: i32,
) -> i32 {
    let plugin = current();
    // SAFETY: forwarded from the caller.
    let result = unsafe { texture(buffer, Some(len), width, height) }
        .and_then(|tex| Ok((tex, Side::try_from(side)?)))
        .map_err(|err| plugin.reject("FadeTexture2D", err))
        .and_then(|((pixels, w, h), side)| {
            plugin.fade_texture(pixels, w, h, Point::new(p1x, p1y), Point::new(p2x, p2y), side)
        });
    status(result)
}
