use log::{debug, warn};
use crate::types::Sample;
/// Number of channels per sample (x, y, z).
pub const CHANNELS: usize = 3;
/// Fixed-capacity window of the most recent samples, newest first.
///
/// Slots are allocated once and never reallocated. `order` maps a logical
/// position (0 = newest) to the physical slot that holds it, so eviction is
/// a rotation of indices rather than a move of sample data.
///
/// The window reports full only after `capacity` real pushes. Slots start
/// zeroed but are never handed out before then.
pub struct RollingWindow {
    slots: Vec<Sample>,
    order: Vec<usize>, // logical position -> slot
    filled: usize,
}
impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity < 1 {
            warn!("rolling window capacity {capacity} is below 1, using 1");
            1
        } else {
            capacity
        };
        Self {
            slots: vec![Sample::ZERO; capacity],
            order: (0..capacity).collect(),
            filled: 0,
        }
    }
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
    /// Number of valid samples (saturates at capacity).
    pub fn len(&self) -> usize {
        self.filled
    }
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }
    pub fn is_full(&self) -> bool {
        self.filled == self.capacity()
    }
    /// Length of the flat tensor produced by [`materialize_tensor`](Self::materialize_tensor).
    pub fn tensor_len(&self) -> usize {
        self.capacity() * CHANNELS
    }
    /// Admit a sample at logical position 0.
    ///
    /// The slot at the back of the logical order is reclaimed and every other
    /// slot moves one position back. While warming up the reclaimed slot is an
    /// unused one; afterwards it holds the oldest sample, which is evicted.
    pub fn push(&mut self, sample: Sample) {
        let last = self.capacity() - 1;
        let reclaimed = self.order[last];
        for i in (1..=last).rev() {
            self.order[i] = self.order[i - 1];
        }
        self.order[0] = reclaimed;
        self.slots[reclaimed] = sample;
        if self.filled < self.capacity() {
            self.filled += 1;
        }
    }
    /// Write the window as a flat `capacity * 3` tensor, newest sample first.
    ///
    /// Returns `false` and leaves `out` untouched until the window is full.
    /// `out` must hold exactly [`tensor_len`](Self::tensor_len) floats.
    pub fn materialize_tensor(&self, out: &mut [f32]) -> bool {
        if !self.is_full() {
            return false;
        }
        debug_assert_eq!(out.len(), self.tensor_len(), "tensor buffer has wrong length");
        for (dst, sample) in out.chunks_exact_mut(CHANNELS).zip(self.iter()) {
            dst.copy_from_slice(&sample.as_array());
        }
        true
    }
    /// Owned copy of the tensor, or `None` while warming up.
    pub fn to_tensor(&self) -> Option<Vec<f32>> {
        let mut tensor = vec![0.0; self.tensor_len()];
        self.materialize_tensor(&mut tensor).then_some(tensor)
    }
    /// Valid samples, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.order[..self.filled].iter().map(|&slot| &self.slots[slot])
    }
    pub fn newest(&self) -> Option<Sample> {
        self.iter().next().copied()
    }
    /// Debug dump of every slot in logical order.
    pub fn show(&self) {
        debug!("window capacity: {} filled: {}", self.capacity(), self.filled);
        for (pos, &slot) in self.order.iter().enumerate() {
            let s = &self.slots[slot];
            debug!(
                "  [{pos}] slot {slot} @ {:p} x {} y {} z {}",
                s as *const Sample, s.x, s.y, s.z
            );
        }
        debug!("---");
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn xs(window: &RollingWindow) -> Vec<f32> {
        window.iter().map(|s| s.x).collect()
    }
    #[test]
    fn fills_after_exactly_capacity_pushes() {
        for capacity in 1..=8 {
            let mut window = RollingWindow::new(capacity);
            assert!(!window.is_full());
            for i in 1..capacity {
                window.push(Sample::new(i as f32, 0.0, 0.0));
                assert!(!window.is_full(), "full too early at {i}/{capacity}");
            }
            window.push(Sample::new(capacity as f32, 0.0, 0.0));
            assert!(window.is_full());
            assert_eq!(window.len(), capacity);
        }
    }
    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut window = RollingWindow::new(0);
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.tensor_len(), 3);
        window.push(Sample::new(7.0, 8.0, 9.0));
        assert_eq!(window.to_tensor(), Some(vec![7.0, 8.0, 9.0]));
        window.push(Sample::new(1.0, 2.0, 3.0));
        assert_eq!(window.to_tensor(), Some(vec![1.0, 2.0, 3.0]));
    }
    #[test]
    fn newest_sample_is_logical_zero() {
        let mut window = RollingWindow::new(4);
        for v in 1..=4 {
            window.push(Sample::new(v as f32, 0.0, 0.0));
        }
        assert_eq!(xs(&window), vec![4.0, 3.0, 2.0, 1.0]);
        window.push(Sample::new(5.0, 0.0, 0.0));
        assert_eq!(xs(&window), vec![5.0, 4.0, 3.0, 2.0]);
        assert_eq!(window.newest(), Some(Sample::new(5.0, 0.0, 0.0)));
    }
    #[test]
    fn partial_window_lists_only_pushed_samples() {
        let mut window = RollingWindow::new(5);
        window.push(Sample::new(1.0, 0.0, 0.0));
        window.push(Sample::new(2.0, 0.0, 0.0));
        assert_eq!(window.len(), 2);
        assert_eq!(xs(&window), vec![2.0, 1.0]);
    }
    #[test]
    fn materialize_leaves_buffer_untouched_until_full() {
        let mut window = RollingWindow::new(2);
        let mut out = [-1.0; 6];
        assert!(!window.materialize_tensor(&mut out));
        window.push(Sample::new(1.0, 2.0, 3.0));
        assert!(!window.materialize_tensor(&mut out));
        assert_eq!(out, [-1.0; 6]);
        assert_eq!(window.to_tensor(), None);
    }
    #[test]
    fn capacity_three_scenario() {
        let mut window = RollingWindow::new(3);
        window.push(Sample::new(1.0, 0.0, 0.0));
        window.push(Sample::new(2.0, 0.0, 0.0));
        window.push(Sample::new(3.0, 0.0, 0.0));
        let mut out = [0.0; 9];
        assert!(window.materialize_tensor(&mut out));
        assert_eq!(out, [3.0, 0.0, 0.0, 2.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        window.push(Sample::new(4.0, 0.0, 0.0));
        assert!(window.materialize_tensor(&mut out));
        assert_eq!(out, [4.0, 0.0, 0.0, 3.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    }
    #[test]
    fn repeated_sample_fills_every_position() {
        let mut window = RollingWindow::new(6);
        let s = Sample::new(0.25, -1.5, 9.81);
        for _ in 0..6 {
            window.push(s);
        }
        let tensor = window.to_tensor().unwrap();
        assert_eq!(tensor.len(), 18);
        for chunk in tensor.chunks(3) {
            assert_eq!(chunk, &[0.25, -1.5, 9.81]);
        }
    }
    #[test]
    fn long_run_keeps_last_capacity_samples() {
        let mut window = RollingWindow::new(5);
        for v in 0..100 {
            window.push(Sample::new(v as f32, -(v as f32), 1.0));
        }
        assert_eq!(xs(&window), vec![99.0, 98.0, 97.0, 96.0, 95.0]);
        let tensor = window.to_tensor().unwrap();
        assert_eq!(&tensor[..3], &[99.0, -99.0, 1.0]);
        assert_eq!(&tensor[12..], &[95.0, -95.0, 1.0]);
    }
    #[test]
    fn tensor_is_a_copy() {
        let mut window = RollingWindow::new(2);
        window.push(Sample::new(1.0, 1.0, 1.0));
        window.push(Sample::new(2.0, 2.0, 2.0));
        let before = window.to_tensor().unwrap();
        window.push(Sample::new(3.0, 3.0, 3.0));
        assert_eq!(before, vec![2.0, 2.0, 2.0, 1.0, 1.0, 1.0]);
    }
}
