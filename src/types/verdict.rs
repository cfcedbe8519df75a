use std::fmt;

/// The outcome of checking a query, with the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Verdict {
    allowed: bool,
    rule: Option<usize>,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.allowed { "allowed" } else { "denied" };
        match self.rule {
            Some(idx) => write!(f, "{outcome} by rule {idx}"),
            None => write!(f, "{outcome} by default"),
        }
    }
}

impl Verdict {
    pub fn new(allowed: bool, rule: Option<usize>) -> Self {
        Self { allowed, rule }
    }

    /// No rule matched.
    pub fn default_deny() -> Self {
        Self::new(false, None)
    }

    #[must_use]
    pub fn allowed(&self) -> bool {
        self.allowed
    }

    /// Index of the first matching rule, or `None` when nothing matched.
    #[must_use]
    pub fn rule(&self) -> Option<usize> {
        self.rule
    }
}
