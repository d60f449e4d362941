//! crates/logging-sink/src/repeat.rs
//! Suppression of consecutive identical messages.

/// Outcome of offering a message to a [`RepeatFilter`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RepeatVerdict {
    /// Write the message. `suppressed` counts repeats of the previous
    /// message that were swallowed and should be reported first.
    Emit {
        /// Number of suppressed repeats of the previous message.
        suppressed: u64,
    },
    /// Drop the message; it exceeds the repeat limit.
    Suppress,
}

/// Allows at most `limit` consecutive identical messages through.
#[derive(Clone, Debug, Default)]
pub struct RepeatFilter {
    limit: u32,
    last: Option<String>,
    seen: u64,
    suppressed: u64,
}

impl RepeatFilter {
    /// Creates a filter; a `limit` of zero lets everything through.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            limit,
            last: None,
            seen: 0,
            suppressed: 0,
        }
    }

    /// Returns the configured limit.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Changes the limit and forgets the message history.
    pub fn set_limit(&mut self, limit: u32) {
        *self = Self::new(limit);
    }

    /// Decides whether `message` is written.
    pub fn check(&mut self, message: &str) -> RepeatVerdict {
        if self.limit == 0 {
            return RepeatVerdict::Emit { suppressed: 0 };
        }

        if self.last.as_deref() == Some(message) {
            self.seen += 1;
            if self.seen <= u64::from(self.limit) {
                return RepeatVerdict::Emit { suppressed: 0 };
            }
            self.suppressed += 1;
            return RepeatVerdict::Suppress;
        }

        let suppressed = std::mem::take(&mut self.suppressed);
        self.last = Some(message.to_owned());
        self.seen = 1;
        RepeatVerdict::Emit { suppressed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limit_never_suppresses() {
        let mut filter = RepeatFilter::new(0);
        for _ in 0..10 {
            assert_eq!(filter.check("same"), RepeatVerdict::Emit { suppressed: 0 });
        }
    }

    #[test]
    fn limit_allows_exactly_that_many_repeats() {
        let mut filter = RepeatFilter::new(2);
        assert_eq!(filter.check("x"), RepeatVerdict::Emit { suppressed: 0 });
        assert_eq!(filter.check("x"), RepeatVerdict::Emit { suppressed: 0 });
        assert_eq!(filter.check("x"), RepeatVerdict::Suppress);
        assert_eq!(filter.check("x"), RepeatVerdict::Suppress);
    }

    #[test]
    fn new_message_reports_suppressed_count() {
        let mut filter = RepeatFilter::new(1);
        filter.check("x");
        filter.check("x");
        filter.check("x");
        assert_eq!(filter.check("y"), RepeatVerdict::Emit { suppressed: 2 });
        assert_eq!(filter.check("x"), RepeatVerdict::Emit { suppressed: 0 });
    }

    #[test]
    fn set_limit_resets_history() {
        let mut filter = RepeatFilter::new(1);
        filter.check("x");
        filter.check("x");
        filter.set_limit(3);
        assert_eq!(filter.limit(), 3);
        assert_eq!(filter.check("y"), RepeatVerdict::Emit { suppressed: 0 });
    }
}
