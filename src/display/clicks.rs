//! Scrolling log of click positions shown beside an image.
//!
//! Purely a viewing aid: nothing is stored beyond the visible lines.

use std::collections::VecDeque;

pub const MAX_LINES: usize = 35;
pub const PANEL_WIDTH: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAttribute {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClickLog {
    pub width: u32,
    pub attributes: Vec<ClickAttribute>,
    lines: VecDeque<String>,
}

impl Default for ClickLog {
    fn default() -> Self {
        Self {
            width: PANEL_WIDTH,
            attributes: vec![ClickAttribute::X, ClickAttribute::Y],
            lines: VecDeque::new(),
        }
    }
}

impl ClickLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a click at data coordinates `(x, y)`, dropping the oldest line
    /// once the log is full.
    pub fn record(&mut self, x: f64, y: f64) {
        let values: Vec<String> = self
            .attributes
            .iter()
            .map(|attr| match attr {
                ClickAttribute::X => format!("{x:.4}"),
                ClickAttribute::Y => format!("{y:.4}"),
            })
            .collect();
        self.lines.push_back(format!("[{}], ", values.join(", ")));
        while self.lines.len() > MAX_LINES {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_four_decimals() {
        let mut log = ClickLog::new();
        log.record(1.0, 23.456789);
        log.record(-0.00004, 2.0 / 3.0);
        assert_eq!(log.text(), "[1.0000, 23.4568], \n[-0.0000, 0.6667], ");
    }

    #[test]
    fn keeps_the_newest_lines() {
        let mut log = ClickLog::new();
        for i in 0..50 {
            log.record(i as f64, 0.0);
        }
        assert_eq!(log.len(), MAX_LINES);
        assert_eq!(log.lines().next(), Some("[15.0000, 0.0000], "));
        assert_eq!(log.lines().last(), Some("[49.0000, 0.0000], "));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn respects_attribute_selection() {
        let mut log = ClickLog {
            attributes: vec![ClickAttribute::Y],
            ..ClickLog::default()
        };
        log.record(3.0, 4.0);
        assert_eq!(log.text(), "[4.0000], ");
    }
}
