use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use vinput_events::EventSink;
use vinput_ring::ByteRing;

/// Stateful byte-stream decoder for one device protocol.
///
/// `feed` is only ever called from the consumer context; implementations keep
/// their inter-byte state private and emit zero or more events per byte.
pub trait ProtocolDecoder {
    fn feed(&mut self, byte: u8, sink: &mut dyn EventSink);

    /// Count of discarded protocol input (unmapped scan codes, packets with a
    /// bad marker). Diagnostic only.
    fn bad_input(&self) -> u64;
}

/// Counter snapshot for one device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// Bytes offered to the ring by the producer side.
    pub bytes_injected: u64,
    /// Bytes rejected because the ring was full.
    pub bytes_dropped: u64,
    /// Bytes popped and fed to the decoder.
    pub bytes_processed: u64,
    /// Discarded protocol input reported by the decoder.
    pub bad_input: u64,
}

/// Producer-side handle for a device: shares the ring, never touches decoder
/// state. Cheap to clone and safe to use from any thread while a drain runs.
#[derive(Debug, Clone)]
pub struct DeviceInjector {
    ring: Arc<ByteRing>,
    injected: Arc<AtomicU64>,
    name: &'static str,
}

impl DeviceInjector {
    /// Pushes raw wire bytes. This is the interrupt-analog fast path: it only
    /// enqueues; bytes that do not fit are dropped, counted, and logged.
    /// Returns the number of bytes accepted.
    pub fn inject(&self, bytes: &[u8]) -> usize {
        self.injected.fetch_add(bytes.len() as u64, Ordering::Relaxed);
        let mut accepted = 0;
        for &byte in bytes {
            if self.ring.push(byte) {
                accepted += 1;
            } else {
                tracing::warn!("{}: buffer overflow, dropping byte {byte:#04x}", self.name);
            }
        }
        accepted
    }

    /// Bytes rejected so far because the ring was full.
    pub fn dropped_bytes(&self) -> u64 {
        self.ring.dropped_bytes()
    }
}

/// One simulated peripheral: the shared byte ring plus the protocol decoder
/// that drains it.
///
/// `inject` takes `&self` and may be called concurrently with a drain;
/// `drain_and_process` takes `&mut self`, so a second concurrent drain of the
/// same controller cannot exist.
#[derive(Debug)]
pub struct DeviceController<D> {
    injector: DeviceInjector,
    ring: Arc<ByteRing>,
    decoder: D,
    processed: u64,
}

impl<D: ProtocolDecoder> DeviceController<D> {
    pub fn new(name: &'static str, capacity: usize, decoder: D) -> Self {
        let ring = Arc::new(ByteRing::new(capacity));
        Self {
            injector: DeviceInjector {
                ring: Arc::clone(&ring),
                injected: Arc::new(AtomicU64::new(0)),
                name,
            },
            ring,
            decoder,
            processed: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.injector.name
    }

    /// A cloneable producer-side handle, for callers that split the producer
    /// and consumer contexts across threads.
    pub fn injector(&self) -> DeviceInjector {
        self.injector.clone()
    }

    /// Producer context: enqueue raw wire bytes without decoding.
    pub fn inject(&self, bytes: &[u8]) -> usize {
        self.injector.inject(bytes)
    }

    /// Consumer context: pops the ring to empty, feeding every byte to the
    /// decoder and forwarding synthesized events to `sink`. Returns the
    /// number of bytes processed; an empty ring is a no-op returning 0.
    pub fn drain_and_process(&mut self, sink: &mut dyn EventSink) -> usize {
        let mut processed = 0;
        while let Some(byte) = self.ring.pop() {
            self.decoder.feed(byte, sink);
            processed += 1;
        }
        self.processed += processed as u64;
        processed
    }

    /// Read access to the decoder, e.g. for diagnostic state such as the
    /// keyboard's shift latch.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn stats(&self) -> DeviceStats {
        DeviceStats {
            bytes_injected: self.injector.injected.load(Ordering::Relaxed),
            bytes_dropped: self.ring.dropped_bytes(),
            bytes_processed: self.processed,
            bad_input: self.decoder.bad_input(),
        }
    }
}
