//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//

use crate::error::Error;

use bytepipe_channel::ChunkSender;

use std::io::{Error as IoError, ErrorKind, Write};
use tokio::runtime::Handle;
use tracing::{debug, warn};
use uuid::Uuid;

/// A ChunkWriter hands off bytes to the pipe in discrete chunks.
///
/// ChunkWriter does not frame, attach headers, or otherwise modify the bytes
/// given to it; each call hands off one chunk, up to the configured
/// `max_chunk_size`. The reader on the other end of the pipe erases chunk
/// boundaries, so data written here can only be consumed as a plain byte
/// stream.
///
/// ## Backpressure
/// The hand-off channel has a capacity measured in bytes. When the reader
/// falls behind and the channel fills up, further writes suspend until the
/// reader has drained enough chunks.
///
/// ## Closing
/// Dropping the writer closes the channel; the reader observes end of stream
/// once the remaining chunks are drained. There is no separate close call.
///
/// # Examples
/// ```
/// use bytepipe::chunk::create_pipe;
/// use bytepipe::config::PipeConfigBuilder;
/// use std::io::Write;
/// use tokio::runtime::Runtime;
///
/// fn main() {
///     let runtime = Runtime::new().expect("create runtime");
///     let config = PipeConfigBuilder::default().build().expect("creating config");
///     let (mut writer, _reader) = create_pipe(config, runtime.handle().clone());
///
///     let payload = "hello world".to_string().into_bytes();
///     writer.write(&payload).expect("write");
///     writer.flush().expect("flush");
/// }
/// ```
pub struct ChunkWriter {
    writer_id: Uuid,
    sender: ChunkSender,
    max_chunk_size: usize,
    runtime_handle: Handle,
    write_offset: i64,
}

/// ChunkWriter implements Write trait in standard library.
impl Write for ChunkWriter {
    /// Hands off at most `max_chunk_size` bytes as one chunk and returns the
    /// number of bytes taken. Suspends the calling thread while the channel
    /// is at capacity. Errors only when the reader end is gone.
    fn write(&mut self, buf: &[u8]) -> Result<usize, IoError> {
        let handle = self.runtime_handle.clone();
        handle
            .block_on(self.write_async(buf))
            .map_err(|e| IoError::new(ErrorKind::Other, format!("Error: {:?}", e)))
    }

    /// A chunk is already in the channel when `write` returns, so there is
    /// nothing on the sender side left to push down.
    fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}

impl ChunkWriter {
    pub fn new(sender: ChunkSender, max_chunk_size: usize, runtime_handle: Handle) -> Self {
        ChunkWriter {
            writer_id: Uuid::new_v4(),
            sender,
            max_chunk_size,
            runtime_handle,
            write_offset: 0,
        }
    }

    /// Write data asynchronously.
    ///
    /// The chunk is an owned copy of the caller's bytes; the caller's buffer
    /// is free to be reused as soon as this returns. An empty `buf` hands off
    /// an empty chunk, which is a valid transmission and not end of stream.
    ///
    /// ```ignore
    /// let mut writer = ChunkWriter::new(tx, 8 * 1024 * 1024, handle);
    /// let payload = vec![0; 8];
    /// let size = writer.write_async(&payload).await.expect("write");
    /// ```
    pub async fn write_async(&mut self, buf: &[u8]) -> Result<usize, Error> {
        let bytes_to_write = std::cmp::min(buf.len(), self.max_chunk_size);
        let payload = buf[0..bytes_to_write].to_vec();
        if let Err(e) = self.sender.send(payload).await {
            warn!(
                "writer {:?} failed to hand off a {} byte chunk, the reader is gone",
                self.writer_id,
                e.0.len()
            );
            return Err(Error::ChannelClosed {
                msg: format!("cannot hand off {} bytes", e.0.len()),
            });
        }
        self.write_offset += bytes_to_write as i64;
        debug!(
            "writer {:?} handed off {} bytes, {} total",
            self.writer_id, bytes_to_write, self.write_offset
        );
        Ok(bytes_to_write)
    }

    /// Return the total number of bytes handed off by this writer.
    ///
    /// ```ignore
    /// let writer = ChunkWriter::new(tx, 8 * 1024 * 1024, handle);
    /// let offset = writer.write_offset();
    /// ```
    pub fn write_offset(&self) -> i64 {
        self.write_offset
    }
}
