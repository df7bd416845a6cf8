//! Collects clipped line fragments so that polygon rings can be rejoined
//! once the whole ring has been seen.

use crate::stream::Stream;

#[derive(Debug, Default)]
pub struct ClipBuffer {
    lines: Vec<Vec<[f64; 2]>>,
}

impl ClipBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the last fragment onto the first when a ring was cut open
    /// somewhere other than its starting vertex.
    pub fn rejoin(&mut self) {
        if self.lines.len() > 1 {
            if let Some(mut last) = self.lines.pop() {
                let first = self.lines.remove(0);
                last.extend(first);
                self.lines.push(last);
            }
        }
    }

    /// Take every buffered fragment, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<Vec<[f64; 2]>> {
        std::mem::take(&mut self.lines)
    }
}

impl Stream for ClipBuffer {
    fn point(&mut self, x: f64, y: f64, _z: f64) {
        match self.lines.last_mut() {
            Some(line) => line.push([x, y]),
            None => self.lines.push(vec![[x, y]]),
        }
    }

    fn line_start(&mut self) {
        self.lines.push(Vec::new());
    }
}
