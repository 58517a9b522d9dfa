use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

const IDLE: u8 = 0;
const PENDING: u8 = 1;
const MAPPED: u8 = 2;
const FAILED: u8 = 3;

const QUERY_COUNT: u32 = 2;
const BUFFER_SIZE: u64 = QUERY_COUNT as u64 * std::mem::size_of::<u64>() as u64;

/// Converts a begin/end timestamp pair to milliseconds. Wrapped or reordered
/// timestamps read as zero.
pub fn ticks_to_ms(begin: u64, end: u64, period_ns: f32) -> f64 {
    end.saturating_sub(begin) as f64 * f64::from(period_ns) / 1_000_000.0
}

/// Measures render pass duration with a pair of timestamp queries.
///
/// Readback never blocks: a result is copied out only while the readback
/// buffer is idle, and collected by [`poll`](Self::poll) on a later frame.
pub struct GpuTimer {
    query_set: wgpu::QuerySet,
    resolve_buffer: wgpu::Buffer,
    readback_buffer: wgpu::Buffer,
    period_ns: f32,
    state: Arc<AtomicU8>,
    copied: bool,
}

impl GpuTimer {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let query_set = device.create_query_set(&wgpu::QuerySetDescriptor {
            label: Some("render_pass_timestamps"),
            ty: wgpu::QueryType::Timestamp,
            count: QUERY_COUNT,
        });
        let resolve_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("timestamp_resolve_buffer"),
            size: BUFFER_SIZE,
            usage: wgpu::BufferUsages::QUERY_RESOLVE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let readback_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("timestamp_readback_buffer"),
            size: BUFFER_SIZE,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        Self {
            query_set,
            resolve_buffer,
            readback_buffer,
            period_ns: queue.get_timestamp_period(),
            state: Arc::new(AtomicU8::new(IDLE)),
            copied: false,
        }
    }

    pub fn pass_writes(&self) -> wgpu::RenderPassTimestampWrites<'_> {
        wgpu::RenderPassTimestampWrites {
            query_set: &self.query_set,
            beginning_of_pass_write_index: Some(0),
            end_of_pass_write_index: Some(1),
        }
    }

    /// Records query resolution after the pass has ended.
    pub fn resolve(&mut self, encoder: &mut wgpu::CommandEncoder) {
        encoder.resolve_query_set(&self.query_set, 0..QUERY_COUNT, &self.resolve_buffer, 0);
        self.copied = self.state.load(Ordering::Acquire) == IDLE;
        if self.copied {
            encoder.copy_buffer_to_buffer(&self.resolve_buffer, 0, &self.readback_buffer, 0, BUFFER_SIZE);
        }
    }

    /// Starts mapping the readback buffer. Call after the encoder is submitted.
    pub fn request_readback(&mut self) {
        if !std::mem::take(&mut self.copied) {
            return;
        }
        self.state.store(PENDING, Ordering::Release);
        let state = Arc::clone(&self.state);
        self.readback_buffer
            .slice(..)
            .map_async(wgpu::MapMode::Read, move |result| {
                let next = if result.is_ok() { MAPPED } else { FAILED };
                state.store(next, Ordering::Release);
            });
    }

    /// Returns the most recent render pass time in milliseconds, if a readback
    /// has completed since the last call.
    pub fn poll(&mut self, device: &wgpu::Device) -> Option<f64> {
        device.poll(wgpu::Maintain::Poll);
        match self.state.load(Ordering::Acquire) {
            MAPPED => {
                let ms = {
                    let view = self.readback_buffer.slice(..).get_mapped_range();
                    let [begin, end]: [u64; 2] = bytemuck::pod_read_unaligned(&view[..]);
                    ticks_to_ms(begin, end, self.period_ns)
                };
                self.readback_buffer.unmap();
                self.state.store(IDLE, Ordering::Release);
                Some(ms)
            }
            FAILED => {
                tracing::warn!("timestamp readback failed");
                self.state.store(IDLE, Ordering::Release);
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_ticks_using_period() {
        assert_eq!(ticks_to_ms(1_000, 3_000_000, 1.0), 2.999);
        assert_eq!(ticks_to_ms(0, 1_000_000, 2.0), 2.0);
    }

    #[test]
    fn reordered_timestamps_read_as_zero() {
        assert_eq!(ticks_to_ms(10, 5, 1.0), 0.0);
    }
}
