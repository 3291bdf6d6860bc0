//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//

use derive_builder::*;
use getset::CopyGetters;

/// Configuration for a pipe created by [`create_pipe`].
///
/// [`create_pipe`]: crate::chunk::create_pipe
#[derive(Builder, Debug, CopyGetters, Clone)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct PipeConfig {
    /// Capacity of the hand-off channel, in payload bytes. Writers suspend
    /// once this many bytes sit in the channel waiting for the reader.
    #[get_copy = "pub"]
    #[builder(default = "16 * 1024 * 1024")]
    pub capacity: usize,

    /// Largest chunk a single write hands off. Longer writes are cut short
    /// and report the number of bytes actually taken.
    #[get_copy = "pub"]
    #[builder(default = "8 * 1024 * 1024")]
    pub max_chunk_size: usize,
}

impl PipeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return Err("capacity must be greater than zero".to_string());
            }
        }
        if let Some(max_chunk_size) = self.max_chunk_size {
            if max_chunk_size == 0 {
                return Err("max_chunk_size must be greater than zero".to_string());
            }
        }
        Ok(())
    }
}
