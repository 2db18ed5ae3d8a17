//! Histogram build from per-track keys.

use super::ZHist;
use crate::Dispatch;

impl ZHist {
    /// Register track `i` under `keys[i]` for every track.
    ///
    /// Runs the count and fill passes through `dispatch`, with the prefix
    /// sum and the seal in between and after on the calling thread.
    pub fn build(&mut self, keys: &[u8], dispatch: Dispatch) {
        assert!(
            keys.len() <= self.capacity(),
            "ZHist capacity {} exceeded by {} tracks",
            self.capacity(),
            keys.len()
        );
        self.reset();

        dispatch.for_each(keys.len(), |i| self.count(keys[i]));
        self.finalize();
        debug_assert_eq!(self.size(), keys.len(), "prefix sum mismatch");

        dispatch.for_each(keys.len(), |i| self.fill(keys[i], i as u16));
        self.seal();
    }
}
