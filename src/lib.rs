//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//

#![allow(dead_code)]
#![deny(
    clippy::all,
    clippy::cargo,
    clippy::else_if_without_else,
    clippy::empty_line_after_outer_attr,
    clippy::multiple_inherent_impl,
    clippy::mut_mut,
    clippy::path_buf_push_overwrite
)]
#![warn(
    clippy::cargo_common_metadata,
    clippy::mutex_integer,
    clippy::needless_borrow,
    clippy::similar_names
)]
#![allow(clippy::multiple_crate_versions, clippy::needless_doctest_main)]

//! An in-process byte pipe.
//!
//! A producer hands off discrete chunks of bytes through a capacity-bounded
//! channel; a consumer pulls an arbitrary number of bytes at a time through
//! the standard [`Read`] interface. The pipe reconciles the two framings:
//! chunk boundaries chosen by the producer are invisible to the consumer,
//! byte order is preserved exactly, and the unconsumed tail of a chunk is
//! held back for the next read.
//!
//! The crate provides:
//! * [Chunk] readers and writers bridging the chunked and byte-oriented views.
//! * A hand-off [channel] whose capacity is measured in payload bytes.
//!
//! [`Read`]: https://doc.rust-lang.org/std/io/trait.Read.html
//! [Chunk]: crate::chunk
//! [channel]: bytepipe_channel
//!
pub mod chunk;
pub mod config;
pub mod error;
pub mod trace;

pub(crate) mod util;
