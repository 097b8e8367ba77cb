//! Partition enumeration
//!
//! Walks every partition of `n` exactly once, largest part first, using an
//! explicit stack of frames instead of recursion so deep partitions (many
//! ones) never grow the call stack.

/// One level of the depth-first walk
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Amount still to be partitioned below this level
    remaining: u32,
    /// Next candidate part to try; counts down to 1, 0 means exhausted
    next: u32,
}

/// Lazy iterator over the partitions of `n` with every part `<= max_part`
///
/// Each item is non-increasing. The order is the descending
/// largest-part-first order: `[5], [4, 1], [3, 2], [3, 1, 1], ...`.
/// The search relies on this order to break ties.
#[derive(Debug, Clone)]
pub struct Partitions {
    frames: Vec<Frame>,
    parts: Vec<u32>,
}

impl Partitions {
    fn new(n: u32, max_part: u32) -> Self {
        Self {
            frames: vec![Frame {
                remaining: n,
                next: n.min(max_part),
            }],
            parts: Vec::new(),
        }
    }

    /// Leave the current frame and drop the part that opened it
    fn backtrack(&mut self) {
        self.frames.pop();
        self.parts.pop();
    }
}

impl Iterator for Partitions {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.frames.last_mut()?;

            if frame.remaining == 0 {
                let partition = self.parts.clone();
                self.backtrack();
                return Some(partition);
            }

            if frame.next == 0 {
                self.backtrack();
                continue;
            }

            let part = frame.next;
            frame.next -= 1;
            let remaining = frame.remaining - part;

            self.parts.push(part);
            self.frames.push(Frame {
                remaining,
                next: remaining.min(part),
            });
        }
    }
}

/// All partitions of `n`
///
/// `partitions(0)` yields the empty partition exactly once.
pub fn partitions(n: u32) -> Partitions {
    Partitions::new(n, n)
}

/// All partitions of `n` whose parts are at most `max_part`
pub fn partitions_bounded(n: u32, max_part: u32) -> Partitions {
    Partitions::new(n, max_part)
}
