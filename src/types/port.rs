//! Inclusive port ranges.
//!
//! A `PortRange` whose start is greater than its end is representable and
//! simply contains no ports; callers decide whether that deserves a warning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive range of TCP ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Create a new port range. No ordering check is made.
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// Create a range containing a single port.
    pub const fn single(port: u16) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// First port of the range.
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// Last port of the range (inclusive).
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Whether the bounds are reversed.
    pub const fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        if self.is_reversed() {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }

    /// Check if the range contains no ports.
    pub const fn is_empty(&self) -> bool {
        self.is_reversed()
    }

    /// Iterate over all ports in this range, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }

    /// Check whether `port` falls inside the range.
    pub fn contains(&self, port: u16) -> bool {
        self.start <= port && port <= self.end
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_range_len() {
        assert_eq!(PortRange::new(1, 100).len(), 100);
        assert_eq!(PortRange::single(80).len(), 1);
        assert_eq!(PortRange::new(0, 65535).len(), 65536);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let range = PortRange::new(10, 5);
        assert!(range.is_reversed());
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert_eq!(range.iter().count(), 0);
    }

    #[test]
    fn test_iter_is_inclusive() {
        let ports: Vec<u16> = PortRange::new(65533, 65535).iter().collect();
        assert_eq!(ports, vec![65533, 65534, 65535]);
    }

    #[test]
    fn test_contains() {
        let range = PortRange::new(20, 25);
        assert!(range.contains(20));
        assert!(range.contains(25));
        assert!(!range.contains(26));
    }

    #[test]
    fn test_display() {
        assert_eq!(PortRange::single(443).to_string(), "443");
        assert_eq!(PortRange::new(1, 1024).to_string(), "1-1024");
    }
}
