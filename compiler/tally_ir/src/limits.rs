//! Resource limits for one expression run.

/// Bounds every stage enforces.
///
/// The defaults comfortably fit hand-written expressions while keeping
/// hostile input from growing memory or recursion without limit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Limits {
    /// Most parts one expression may allocate, defaults included.
    pub max_parts: usize,
    /// Deepest the parser's operand stack may grow within one span.
    pub max_parse_stack: usize,
    /// Deepest parenthesis/argument nesting.
    pub max_nesting_depth: usize,
    /// Deepest the evaluator's value stack may grow.
    pub max_eval_stack: usize,
}

impl Limits {
    pub const DEFAULT: Limits = Limits {
        max_parts: 256,
        max_parse_stack: 32,
        max_nesting_depth: 32,
        max_eval_stack: 64,
    };

    #[must_use]
    pub const fn with_max_parts(mut self, max_parts: usize) -> Self {
        self.max_parts = max_parts;
        self
    }

    #[must_use]
    pub const fn with_max_parse_stack(mut self, max_parse_stack: usize) -> Self {
        self.max_parse_stack = max_parse_stack;
        self
    }

    #[must_use]
    pub const fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }

    #[must_use]
    pub const fn with_max_eval_stack(mut self, max_eval_stack: usize) -> Self {
        self.max_eval_stack = max_eval_stack;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_one_field() {
        let limits = Limits::default().with_max_parts(8);
        assert_eq!(limits.max_parts, 8);
        assert_eq!(limits.max_eval_stack, Limits::DEFAULT.max_eval_stack);
    }
}
