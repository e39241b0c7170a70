// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/core/mod.rs
pub mod adjacency;
pub mod cube;
pub mod detector;
pub mod extractor;
pub mod params;
