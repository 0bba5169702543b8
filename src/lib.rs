//! Library to calculate the star rating and performance points of [osu!mania] scores.
//!
//! ## Description
//!
//! The calculation follows the classic osu!mania difficulty model: every note raises a
//! per-column ("individual") and a chart-wide ("overall") strain that decays over time,
//! the strain peaks of fixed-length sections are weighted into the star rating and the
//! star rating together with the score, the overall difficulty and the mods yields the pp.
//!
//! Only maps of mode `3` are supported, converts are rejected while decoding.
//!
//! ## Usage
//!
//! ```no_run
//! use mania_pp::{Beatmap, ManiaPP};
//!
//! # #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
//! # fn main() -> Result<(), mania_pp::ParseError> {
//! // Decode the map
//! let map = Beatmap::from_path("./resources/stream_7k.osu")?;
//!
//! // Calculate difficulty attributes
//! let diff_attrs = map.stars()
//!     .mods(64) // DT
//!     .calculate();
//!
//! // Calculate performance attributes, re-using the difficulty attributes
//! // because map and mods stay the same
//! let perf_attrs = ManiaPP::new(&map)
//!     .attributes(diff_attrs)
//!     .mods(64)
//!     .score(965_432)
//!     .calculate();
//!
//! match perf_attrs.stars() {
//!     Some(stars) => println!("Stars: {stars:.2} | PP: {:.2}", perf_attrs.pp()),
//!     None => println!("Map has no notes"),
//! }
//! # Ok(()) }
//! # #[cfg(any(feature = "async_tokio", feature = "async_std"))]
//! # fn main() {}
//! ```
//!
//! For a one-shot calculation there is also [`evaluate`] which decodes the map at the
//! given path and calculates everything in one go.
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `tracing` | Lines that are skipped while decoding a beatmap will be logged through `tracing::debug`. If this feature is not enabled, they are skipped silently. | [`tracing`]
//! | `async_tokio` | Beatmap decoding will be async through [`tokio`] | [`tokio`]
//! | `async_std` | Beatmap decoding will be async through [`async-std`] | [`async-std`]
//!
//! [osu!mania]: https://osu.ppy.sh/wiki/en/Game_mode/osu%21mania
//! [`tracing`]: https://docs.rs/tracing
//! [`tokio`]: https://docs.rs/tokio
//! [`async-std`]: https://docs.rs/async-std

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]

#[cfg(all(feature = "async_tokio", feature = "async_std"))]
compile_error!("features `async_tokio` and `async_std` are mutually exclusive");

/// Types for osu!mania calculations.
pub mod mania;

/// Beatmap decoding.
pub mod parse;

mod mods;
mod strains;

#[doc(inline)]
pub use self::{
    mania::{
        ManiaDifficultyAttributes, ManiaPP, ManiaPerformanceAttributes, ManiaStars,
    },
    mods::Mods,
    parse::{Beatmap, GameMode, Note, ParseError, ParseResult},
    strains::Strains,
};

#[cfg(not(feature = "async_std"))]
use std::path::Path;

#[cfg(feature = "async_std")]
use async_std::path::Path;

/// Decode the map at the given path and calculate the star rating and
/// performance points for a score of `score` with the given mods.
///
/// Fails if the file could not be read, is no `.osu` file, or belongs to
/// a mode other than osu!mania.
///
/// ```no_run
/// # #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
/// # fn main() -> Result<(), mania_pp::ParseError> {
/// let attrs = mania_pp::evaluate("./resources/holds.osu", 64, 800_000)?;
///
/// println!("{:?} stars | {} pp", attrs.stars(), attrs.pp());
/// # Ok(()) }
/// # #[cfg(any(feature = "async_tokio", feature = "async_std"))]
/// # fn main() {}
/// ```
#[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
pub fn evaluate<P: AsRef<Path>>(
    path: P,
    mods: u32,
    score: u32,
) -> ParseResult<ManiaPerformanceAttributes> {
    let map = Beatmap::from_path(path)?;

    Ok(map.pp().mods(mods).score(score).calculate())
}

/// Decode the map at the given path and calculate the star rating and
/// performance points for a score of `score` with the given mods.
///
/// Fails if the file could not be read, is no `.osu` file, or belongs to
/// a mode other than osu!mania.
#[cfg(any(feature = "async_tokio", feature = "async_std"))]
pub async fn evaluate<P: AsRef<Path>>(
    path: P,
    mods: u32,
    score: u32,
) -> ParseResult<ManiaPerformanceAttributes> {
    let map = Beatmap::from_path(path).await?;

    Ok(map.pp().mods(mods).score(score).calculate())
}
