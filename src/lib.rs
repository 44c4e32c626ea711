//! # sprite-cutter
//!
//! *Cut your sprites along any line you like.*
//!
//! Splits an RGBA texture in two along a line through two points and
//! recolors each half: pixels left of the line keep only red, pixels right
//! of it keep only blue, alpha is left alone. A fade variant zeroes alpha on
//! one side instead. Built to be loaded by Unity as a native plugin, usable
//! as a plain Rust library.
//!
//! Rows are split once at the line's crossing column and each span is
//! masked with SIMD. Supports x86-64 AVX2, ARM NEON, and WASM SIMD128 with
//! automatic fallback to scalar code.
//!
//! ## Core operations (always available)
//!
//! The functions re-exported from [`bytes`] operate on raw `&mut [u8]`
//! RGBA buffers, contiguous or strided. [`Line`] and [`Boundary`] do the
//! geometry. [`Plugin`] adds host logging on top.
//!
//! ## Feature flags
//!
//! - **`unity`** (default): the C ABI exports in [`unity`] and the bridge
//!   from Unity's `IUnityInterfaces` / `IUnityLog` to [`InterfaceProvider`] /
//!   [`HostLog`].
//! - **`rgb`**: Typed painting over [`rgb::Rgba<u8>`] slices via bytemuck.
//! - **`imgref`**: Painting on [`imgref`] image views, strided or not.
//!   Implies `rgb`.

#![deny(unsafe_code)]

mod error;
mod tint;

pub mod bytes;
pub mod host;
pub mod line;

pub use bytes::*;
pub use error::{Error, LineError, SizeError};
pub use host::{HostLog, InterfaceProvider, LogLevel, Plugin};
pub use line::{Boundary, Line, Point, Side};
pub use tint::{ChannelMask, Tint};

#[cfg(feature = "rgb")]
pub mod typed_rgb;

#[cfg(feature = "imgref")]
pub mod imgref;

#[cfg(feature = "unity")]
pub mod unity;
