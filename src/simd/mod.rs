// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/simd/mod.rs

/*
 * SIMD dispatcher for the vision primitives.
 * With the "simd" feature on a native target the accelerated `NativeCV`
 * back-end is exported as `dispatch::Cv`; otherwise `dispatch::Cv` is the
 * scalar implementation.
 */

#[cfg(all(not(target_arch = "wasm32"), feature = "simd"))]
pub mod native;

#[cfg(all(not(target_arch = "wasm32"), feature = "simd"))]
pub mod dispatch {
    pub use super::native::NativeCV as Cv;
}

#[cfg(any(target_arch = "wasm32", not(feature = "simd")))]
pub mod dispatch {
    pub use crate::cv::scalar::ScalarCV as Cv;
}
