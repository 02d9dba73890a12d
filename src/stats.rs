//! Rolling frame statistics for the HUD and the metrics report.

/// Ring buffer that stores the last N samples of a metric.
pub struct RingBuffer {
    data: Vec<f32>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity],
            head: 0,
            len: 0,
            capacity,
        }
    }

    pub fn push(&mut self, value: f32) {
        self.data[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
    }

    /// Return samples in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let start = if self.len < self.capacity {
            0
        } else {
            self.head
        };
        (0..self.len).map(move |i| self.data[(start + i) % self.capacity])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn average(&self) -> f32 {
        if self.len == 0 {
            return 0.0;
        }
        self.iter().sum::<f32>() / self.len as f32
    }
}

/// Everything the HUD and settings panel report about the last frames.
pub struct FrameStats {
    pub frame_ms: RingBuffer,
    pub star_count: usize,
    pub outline_segments: usize,
    pub shadow_trails: usize,
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            frame_ms: RingBuffer::new(capacity),
            star_count: 0,
            outline_segments: 0,
            shadow_trails: 0,
        }
    }

    pub fn record_frame(&mut self, frame_ms: f32) {
        self.frame_ms.push(frame_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_iterates_in_insertion_order_after_wrap() {
        let mut buf = RingBuffer::new(3);
        buf.push(1.0);
        buf.push(2.0);
        buf.push(3.0);
        buf.push(4.0);

        let values: Vec<f32> = buf.iter().collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn average_over_partial_fill() {
        let mut buf = RingBuffer::new(10);
        buf.push(10.0);
        buf.push(20.0);
        assert_eq!(buf.len(), 2);
        assert!((buf.average() - 15.0).abs() < 1e-6);
    }

    #[test]
    fn empty_buffer_averages_to_zero() {
        let buf = RingBuffer::new(4);
        assert_eq!(buf.average(), 0.0);
    }
}
