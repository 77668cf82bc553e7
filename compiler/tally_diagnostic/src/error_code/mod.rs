//! Error codes for all engine diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the pipeline stage.

use std::fmt;

/// Error codes for all engine diagnostics.
///
/// Format: E#### where first digit indicates stage:
/// - E0xxx: Tokenizer errors
/// - E1xxx: Parser errors
/// - E2xxx: Type errors
/// - E6xxx: Evaluation errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Tokenizer Errors (E0xxx)
    /// Character that cannot start any token
    E0001,
    /// Number immediately followed by a letter or underscore
    E0002,
    /// String literal without a closing quote
    E0003,
    /// Expression text longer than a span can address
    E0004,

    // Parser Errors (E1xxx)
    /// Unbalanced parenthesis
    E1001,
    /// Two operands with no operator between them
    E1002,
    /// Binary operator with nothing on its left
    E1003,
    /// Operator with nothing on its right
    E1004,
    /// Unknown operator symbol
    E1005,
    /// Unknown variable
    E1006,
    /// Unknown function
    E1007,
    /// Too many arguments in a call
    E1008,
    /// Too few arguments in a call
    E1009,
    /// Empty argument between commas
    E1010,
    /// Number literal out of range
    E1011,
    /// Empty expression or parentheses
    E1012,
    /// Comma outside an argument list
    E1013,
    /// Expression has too many parts
    E1014,
    /// Parentheses or calls nested too deeply
    E1015,
    /// Operand stack overflow while parsing
    E1016,

    // Type Errors (E2xxx)
    /// Left operand has the wrong type, or is not assignable
    E2001,
    /// Right operand has the wrong type
    E2002,
    /// Operand types cannot be combined
    E2003,
    /// Ternary condition has no truth value
    E2004,
    /// Cast between incompatible types
    E2005,
    /// Argument not convertible to the parameter type
    E2006,
    /// Assignment to a read-only variable
    E2007,
    /// Expression needs a context that was not supplied
    E2008,

    // Evaluation Errors (E6xxx)
    /// Integer division or remainder by zero
    E6001,
    /// Variable binding holds a value of the wrong type
    E6002,
    /// Native function returned a value of the wrong type
    E6003,
    /// Evaluation produced no value
    E6004,
    /// Evaluation stack overflow
    E6005,
    /// Variable or function evaluated without its context
    E6006,

    // Internal Errors (E9xxx)
    /// Evaluation stack left unbalanced
    E9001,
    /// Operand value does not match its checked type
    E9002,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        // Tokenizer
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        // Parser
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        ErrorCode::E1011,
        ErrorCode::E1012,
        ErrorCode::E1013,
        ErrorCode::E1014,
        ErrorCode::E1015,
        ErrorCode::E1016,
        // Type
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        // Evaluation
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        // Internal
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E1013 => "E1013",
            ErrorCode::E1014 => "E1014",
            ErrorCode::E1015 => "E1015",
            ErrorCode::E1016 => "E1016",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    fn stage_digit(self) -> u8 {
        self.as_str().as_bytes()[1]
    }

    /// Check if this is a tokenizer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        self.stage_digit() == b'0'
    }

    /// Check if this is a parser error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        self.stage_digit() == b'1'
    }

    /// Check if this is a type error (E2xxx range).
    pub fn is_type_error(&self) -> bool {
        self.stage_digit() == b'2'
    }

    /// Check if this is an evaluation error (E6xxx range).
    pub fn is_eval_error(&self) -> bool {
        self.stage_digit() == b'6'
    }

    /// Check if this is an internal error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        self.stage_digit() == b'9'
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
