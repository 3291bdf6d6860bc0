//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//

//! The Chunk API for handing off bytes in discrete chunks and reading them back
//! as a continuous byte stream.
//!
//! A producer pushes chunks of arbitrary length through the pipe's channel, and
//! the reader exposes them through the standard [`Read`] interface. Chunk
//! boundaries are not preserved: a consumer cannot tell where one hand-off
//! ended and the next began, and, if needed, you must frame the data by
//! convention or by protocol in a layer above the pipe.
//!
//! [`Read`]: https://doc.rust-lang.org/std/io/trait.Read.html
///
/// # Examples
/// ```
/// use bytepipe::chunk::create_pipe;
/// use bytepipe::config::PipeConfigBuilder;
/// use std::io::{Read, Write};
/// use tokio::runtime::Runtime;
///
/// fn main() {
///     let runtime = Runtime::new().expect("create runtime");
///     let config = PipeConfigBuilder::default().build().expect("creating config");
///
///     let (mut writer, mut reader) = create_pipe(config, runtime.handle().clone());
///
///     // each write hands off one chunk.
///     writer.write(b"hello ").expect("write");
///     writer.write(b"world").expect("write");
///     // dropping the writer closes the channel.
///     drop(writer);
///
///     let mut buf: Vec<u8> = vec![0; 11];
///     let size = reader.read(&mut buf).expect("read from pipe");
///     assert_eq!(size, 11);
///     assert_eq!(&buf, b"hello world");
/// }
/// ```
pub mod reader;
pub mod writer;

use crate::config::PipeConfig;
use crate::chunk::reader::ChunkReader;
use crate::chunk::writer::ChunkWriter;

use bytepipe_channel::create_channel;
use tokio::runtime::Handle;

/// Create both ends of a pipe connected by a fresh hand-off channel.
///
/// The handle must belong to a running runtime; the blocking `Read` and
/// `Write` implementations of the returned pair drive their async internals
/// on it.
pub fn create_pipe(config: PipeConfig, runtime_handle: Handle) -> (ChunkWriter, ChunkReader) {
    let (tx, rx) = create_channel(config.capacity());
    let writer = ChunkWriter::new(tx, config.max_chunk_size(), runtime_handle.clone());
    let reader = ChunkReader::new(rx, runtime_handle);
    (writer, reader)
}
