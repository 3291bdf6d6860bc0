/*
 * Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 */
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
#![allow(clippy::multiple_crate_versions)]

//! A multi-producer, single-consumer hand-off channel for byte chunks, with
//! capacity measured in payload bytes.
//!
//! The channel combines an unbounded tokio mpsc channel with a fair semaphore
//! holding `capacity` permits. A send acquires one permit per payload byte
//! before the chunk is pushed, so the bytes sitting in the channel never
//! exceed the capacity. The permits travel with the chunk: the receiver gets
//! a [`CapacityGuard`] alongside each chunk, and the permits return to the
//! semaphore when the guard is dropped.
//!
//! An empty chunk acquires no permits and can always be sent. A chunk larger
//! than the whole capacity acquires `capacity` permits, so it still passes
//! once the channel is otherwise empty.

use futures_intrusive::sync::{GenericSemaphoreReleaser, Semaphore};
use std::cmp::min;
use std::sync::Arc;
use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub struct ChunkSender {
    sender: UnboundedSender<Vec<u8>>,
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl ChunkSender {
    pub async fn send(&self, chunk: Vec<u8>) -> Result<(), SendError<Vec<u8>>> {
        let n_permits = min(chunk.len(), self.capacity);
        let mut result = self.semaphore.acquire(n_permits).await;
        //disable the automatic release, the receiver side frees the permits
        GenericSemaphoreReleaser::disarm(&mut result);
        self.sender.send(chunk)?;
        Ok(())
    }
}

impl Clone for ChunkSender {
    fn clone(&self) -> ChunkSender {
        ChunkSender {
            sender: self.sender.clone(),
            semaphore: self.semaphore.clone(),
            capacity: self.capacity,
        }
    }
}

pub struct ChunkReceiver {
    receiver: UnboundedReceiver<Vec<u8>>,
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl ChunkReceiver {
    pub async fn recv(&mut self) -> Option<(Vec<u8>, CapacityGuard)> {
        let chunk = self.receiver.recv().await;
        if let Some(chunk) = chunk {
            let n_permits = min(chunk.len(), self.capacity);
            let guard = CapacityGuard {
                semaphore: self.semaphore.clone(),
                size: n_permits,
            };
            Some((chunk, guard))
        } else {
            None
        }
    }
}

pub fn create_channel(capacity: usize) -> (ChunkSender, ChunkReceiver) {
    let (tx, rx) = unbounded_channel();
    let semaphore = Semaphore::new(true, capacity);
    let semaphore_arc = Arc::new(semaphore);
    let sender = ChunkSender {
        sender: tx,
        semaphore: semaphore_arc.clone(),
        capacity,
    };
    let receiver = ChunkReceiver {
        receiver: rx,
        semaphore: semaphore_arc,
        capacity,
    };
    (sender, receiver)
}

pub struct CapacityGuard {
    semaphore: Arc<Semaphore>,
    size: usize,
}

impl Drop for CapacityGuard {
    fn drop(&mut self) {
        self.semaphore.release(self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::create_channel;
    use std::time;
    use tokio::runtime::Runtime;

    #[test]
    fn test_wrapper() {
        let runtime = Runtime::new().unwrap();
        runtime.block_on(test_simple_send_recv());
        runtime.block_on(test_send_order());
        runtime.block_on(test_sender_block());
        runtime.block_on(test_empty_chunk_needs_no_capacity());
        runtime.block_on(test_sender_close_first());
        runtime.block_on(test_receiver_close_first());
    }

    async fn test_simple_send_recv() {
        // can only hold 4 bytes
        let (tx, mut rx) = create_channel(4);

        tokio::spawn(async move {
            if tx.send(vec![1, 2, 3, 4]).await.is_err() {
                println!("receiver dropped");
            }
        });

        if let Some((chunk, _guard)) = rx.recv().await {
            assert_eq!(chunk, vec![1, 2, 3, 4]);
        } else {
            panic!("Test failed");
        }
    }

    async fn test_send_order() {
        let (tx, mut rx) = create_channel(8);

        let tx1 = tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;
            if tx1.send(vec![1; 4]).await.is_err() {
                println!("receiver dropped");
            }
        });

        let tx2 = tx.clone();
        tokio::spawn(async move {
            if tx2.send(vec![2; 4]).await.is_err() {
                println!("receiver dropped");
            }
        });

        // 2 should come first.
        if let Some((chunk, _guard)) = rx.recv().await {
            assert_eq!(chunk, vec![2; 4]);
        } else {
            panic!("test failed");
        }

        if let Some((chunk, _guard)) = rx.recv().await {
            assert_eq!(chunk, vec![1; 4]);
        } else {
            panic!("test failed");
        }
    }

    async fn test_sender_block() {
        // can only hold 7 bytes
        let (tx, mut rx) = create_channel(7);

        // needs 4 bytes.
        let tx1 = tx.clone();
        tokio::spawn(async move {
            if tx1.send(vec![1; 4]).await.is_err() {
                println!("receiver dropped");
            }
        });

        // needs another 4 bytes. (will block)
        let tx2 = tx.clone();
        tokio::spawn(async move {
            if tx2.send(vec![2; 4]).await.is_err() {
                println!("receiver dropped");
            }
        });

        if let Some((chunk, guard)) = rx.recv().await {
            match chunk[0] {
                1 => {
                    drop(guard);
                    let (second, _) = rx.recv().await.expect("get second chunk");
                    assert_eq!(second, vec![2; 4]);
                }
                2 => {
                    drop(guard);
                    let (second, _) = rx.recv().await.expect("get first chunk");
                    assert_eq!(second, vec![1; 4]);
                }
                _ => panic!("test failed"),
            }
        } else {
            panic!("test failed");
        }
    }

    async fn test_empty_chunk_needs_no_capacity() {
        // a single byte of capacity, consumed by the first chunk
        let (tx, mut rx) = create_channel(1);
        tx.send(vec![9]).await.expect("send chunk to channel");

        // empty chunks acquire no permits, so these cannot block
        tx.send(vec![]).await.expect("send empty chunk to channel");
        tx.send(vec![]).await.expect("send empty chunk to channel");

        let (first, _guard) = rx.recv().await.expect("get first chunk");
        assert_eq!(first, vec![9]);
        let (second, _guard) = rx.recv().await.expect("get empty chunk");
        assert!(second.is_empty());
        let (third, _guard) = rx.recv().await.expect("get empty chunk");
        assert!(third.is_empty());
    }

    async fn test_sender_close_first() {
        let (tx, mut rx) = create_channel(100);

        // tx would drop in this task
        tokio::spawn(async move {
            for i in 0..10 {
                if tx.send(vec![i; 4]).await.is_err() {
                    println!("receiver dropped");
                    return;
                }
            }
        });

        for i in 0..10 {
            if let Some((chunk, _guard)) = rx.recv().await {
                assert_eq!(chunk, vec![i; 4]);
            }
        }

        // `None` is returned when all `ChunkSender` halves have dropped,
        // indicating that no further chunks can be sent on the channel.
        if rx.recv().await.is_none() {
            println!("Test passed");
        } else {
            panic!("Test failed");
        }
    }

    async fn test_receiver_close_first() {
        let (tx, mut rx) = create_channel(100);
        tx.send(vec![1]).await.expect("send chunk to channel");

        tokio::spawn(async move {
            if let Some((chunk, _guard)) = rx.recv().await {
                assert_eq!(chunk, vec![1]);
            }
        });
        tokio::time::sleep(time::Duration::from_secs(1)).await;
        let result = tx.send(vec![2]).await;
        assert!(result.is_err());
    }
}
