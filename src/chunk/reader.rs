//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//

use bytepipe_channel::ChunkReceiver;

use bytes::{Buf, BytesMut};
use std::cmp::min;
use std::io::{Error, Read};
use tokio::runtime::Handle;
use tracing::debug;
use uuid::Uuid;

/// A ChunkReader turns a channel of byte chunks into a continuous byte stream.
///
/// The ChunkReader implements the [`Read`] trait in the standard library.
///
/// A read fills the caller's buffer completely before returning, pulling as
/// many chunks from the channel as that takes. The one exception is end of
/// stream: once the channel is closed and drained, the read returns whatever
/// it has collected, so a count shorter than the buffer means no more data
/// will ever arrive. Every call after that returns `Ok(0)`.
///
/// When a chunk is longer than the space left in the caller's buffer, the
/// tail is held back inside the reader and served first on the next call.
/// The holdback never exceeds the tail of a single chunk, so the reader's
/// own buffering stays bounded by the largest chunk the producer sends.
///
/// The reader is a single-consumer handle: all methods take `&mut self` and
/// there is no internal locking. Wrap it in a mutex externally if it must be
/// shared.
///
/// [`Read`]: https://doc.rust-lang.org/std/io/trait.Read.html
///
/// # Examples
/// ```
/// use bytepipe::chunk::reader::ChunkReader;
/// use bytepipe_channel::create_channel;
/// use std::io::Read;
/// use tokio::runtime::Runtime;
///
/// fn main() {
///     let runtime = Runtime::new().expect("create runtime");
///     let (tx, rx) = create_channel(1024);
///     let mut reader = ChunkReader::new(rx, runtime.handle().clone());
///
///     runtime.spawn(async move {
///         tx.send(b"some bytes".to_vec()).await.expect("hand off chunk");
///     });
///
///     let mut buf: Vec<u8> = vec![0; 4];
///     let size = reader.read(&mut buf).expect("read from pipe");
///     assert_eq!(size, 4);
///     assert_eq!(&buf, b"some");
/// }
/// ```
pub struct ChunkReader {
    reader_id: Uuid,
    receiver: ChunkReceiver,
    holdback: BytesMut,
    runtime_handle: Handle,
}

/// ChunkReader implements Read trait in standard library.
impl Read for ChunkReader {
    /// Blocking read. This method cannot be called from within an async
    /// context since it parks the calling thread on the runtime.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let handle = self.runtime_handle.clone();
        handle.block_on(self.read_async(buf))
    }
}

impl ChunkReader {
    pub fn new(receiver: ChunkReceiver, runtime_handle: Handle) -> Self {
        ChunkReader {
            reader_id: Uuid::new_v4(),
            receiver,
            holdback: BytesMut::new(),
            runtime_handle,
        }
    }

    /// Read data asynchronously.
    ///
    /// Same contract as the blocking [`read`]: the buffer is filled
    /// completely unless the stream ends first, and a zero-length buffer
    /// returns `Ok(0)` without consulting the channel. The `Result` never
    /// carries an error for this transport; the channel either yields a
    /// chunk or reports closure, and closure is not an error.
    ///
    /// [`read`]: std::io::Read::read
    ///
    /// ```ignore
    /// let mut reader = ChunkReader::new(rx, handle);
    /// let mut buf: Vec<u8> = vec![0; 4];
    /// let size = reader.read_async(&mut buf).await.expect("read");
    /// ```
    pub async fn read_async(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut read = 0;
        loop {
            if !self.holdback.is_empty() {
                let n = min(self.holdback.len(), buf.len() - read);
                buf[read..read + n].copy_from_slice(&self.holdback[..n]);
                self.holdback.advance(n);
                read += n;
                if read == buf.len() {
                    return Ok(read);
                }
            }
            // the holdback is empty past this point, pull in new data.
            match self.receiver.recv().await {
                Some((chunk, _guard)) => {
                    let n = min(chunk.len(), buf.len() - read);
                    buf[read..read + n].copy_from_slice(&chunk[..n]);
                    read += n;
                    if n < chunk.len() {
                        // the tail did not fit, hold it back for the next call.
                        self.holdback.extend_from_slice(&chunk[n..]);
                    }
                    debug!(
                        "reader {:?} copied {} of a {} byte chunk, {} held back",
                        self.reader_id,
                        n,
                        chunk.len(),
                        self.holdback.len()
                    );
                    if read == buf.len() {
                        return Ok(read);
                    }
                    // an empty chunk contributes nothing and is not end of
                    // stream, loop back to the channel.
                }
                None => {
                    debug!("reader {:?} observed channel closure", self.reader_id);
                    return Ok(read);
                }
            }
        }
    }

    /// Return the bytes that are available to read instantly without pulling
    /// from the channel.
    ///
    /// This is the size of the holdback buffer, the tail of the most recently
    /// received chunk that did not fit into the previous read.
    /// ```ignore
    /// let reader = ChunkReader::new(rx, handle);
    /// let size = reader.available();
    /// ```
    pub fn available(&self) -> usize {
        self.holdback.len()
    }
}
