#![allow(unused)]

use mania_pp::Beatmap;

/// Paths to .osu files
pub mod paths {
    pub const TWO_TAPS: &str = "./resources/two_taps.osu";
    pub const HOLDS: &str = "./resources/holds.osu";
    pub const STREAM_7K: &str = "./resources/stream_7k.osu";
    pub const EMPTY: &str = "./resources/empty.osu";
    pub const STANDARD: &str = "./resources/standard.osu";
}

/// Bit values for mods
pub mod mods {
    pub const NM: u32 = 0;
    pub const NF: u32 = 1 << 0;
    pub const EZ: u32 = 1 << 1;
    pub const HD: u32 = 1 << 3;
    pub const DT: u32 = 1 << 6;
    pub const HT: u32 = 1 << 8;
}

#[macro_export]
#[rustfmt::skip]
macro_rules! test_map {
    ($path:expr) => {{
        #[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
        { common::test_map($path) }
        #[cfg(any(feature = "async_tokio", feature = "async_std"))]
        { common::test_map($path).await }
    }};
}

#[cfg(not(any(feature = "async_tokio", feature = "async_std")))]
pub fn test_map(path: &str) -> Beatmap {
    match Beatmap::from_path(path) {
        Ok(map) => map,
        Err(why) => panic!("Error while parsing map {path}: {why}"),
    }
}

#[cfg(any(feature = "async_tokio", feature = "async_std"))]
pub async fn test_map(path: &str) -> Beatmap {
    match Beatmap::from_path(path).await {
        Ok(map) => map,
        Err(why) => panic!("Error while parsing map {path}: {why}"),
    }
}

/// Run the given future to completion on the runtime of the enabled async feature.
#[cfg(feature = "async_tokio")]
pub fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("could not start runtime")
        .block_on(fut)
}

/// Run the given future to completion on the runtime of the enabled async feature.
#[cfg(feature = "async_std")]
pub fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    async_std::task::block_on(fut)
}
