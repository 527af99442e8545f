//! Error and success codes with their classification metadata
//!
//! Every diagnostic and log event carries a `Code`. The registry below maps
//! each code to its category, severity and recovery behaviour so that the
//! logger and the driver can classify events without matching on strings.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    /// Parsing can resynchronize after this error
    pub recoverable: bool,
    pub description: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

pub mod lexical {
    use super::Code;

    pub const UNEXPECTED_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_LITERAL: Code = Code::new("E021");
    pub const INVALID_CHARACTER_SEQUENCE: Code = Code::new("E022");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const LITERAL_TOO_LARGE: Code = Code::new("E024");
    pub const INVALID_NUMBER: Code = Code::new("E025");
    pub const UNTERMINATED_COMMENT: Code = Code::new("E026");
    pub const EXPRESSION_TOO_DEEP: Code = Code::new("E028");
}

pub mod syntax {
    use super::Code;

    pub const GRAMMAR_VIOLATION: Code = Code::new("E043");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
}

pub mod semantic {
    use super::Code;

    pub const UNRESOLVED_BASE: Code = Code::new("E110");
    pub const INCLUDE_NOT_FOUND: Code = Code::new("E111");
    pub const INCLUDE_IO_ERROR: Code = Code::new("E112");
    pub const INCLUDE_DEPTH_EXCEEDED: Code = Code::new("E113");
    pub const INVALID_INCLUDE_PATH: Code = Code::new("E114");
    pub const NAME_ALREADY_ASSIGNED: Code = Code::new("E120");
    pub const ABSTRACT_ALREADY_SET: Code = Code::new("E121");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

pub mod success {
    use super::Code;

    pub const COMPILATION_COMPLETED: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const UNIT_PARSED: Code = Code::new("I040");
    pub const INCLUDE_RESOLVED: Code = Code::new("I050");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

#[rustfmt::skip]
const REGISTRY_ENTRIES: &[(&str, &str, Severity, bool, &str)] = &[
    // System
    ("ERR001", "System", Severity::Critical, false, "Internal compiler error"),
    ("ERR002", "System", Severity::Critical, false, "Compiler initialization failure"),
    // File processing
    ("E005", "FileProcessing", Severity::Medium, false, "Specification file not found"),
    ("E007", "FileProcessing", Severity::Medium, false, "File exceeds maximum size limit"),
    ("E009", "FileProcessing", Severity::Medium, false, "Permission denied accessing file"),
    ("E010", "FileProcessing", Severity::Medium, false, "Invalid UTF-8 encoding in file"),
    ("E011", "FileProcessing", Severity::Medium, false, "I/O error during file operation"),
    ("E012", "FileProcessing", Severity::Medium, false, "Invalid file path provided"),
    ("E013", "FileProcessing", Severity::Medium, false, "File exceeds maximum line count"),
    // Lexical
    ("E020", "Lexical", Severity::Medium, true, "Unexpected character in source text"),
    ("E021", "Lexical", Severity::Medium, true, "End of stream reached inside a literal or expression"),
    ("E022", "Lexical", Severity::Low, true, "Character sequence is not a valid identifier"),
    ("E023", "Lexical", Severity::Low, true, "Identifier exceeds maximum allowed length"),
    ("E024", "Lexical", Severity::Medium, true, "Literal exceeds maximum size limit"),
    ("E025", "Lexical", Severity::Low, true, "Numeric literal is malformed"),
    ("E026", "Lexical", Severity::Medium, true, "Block comment is not terminated"),
    ("E028", "Lexical", Severity::Medium, true, "Bracket nesting exceeds maximum depth"),
    // Syntax
    ("E043", "Syntax", Severity::High, false, "Declaration expected"),
    ("E050", "Syntax", Severity::Medium, true, "Unexpected token"),
    ("E087", "Syntax", Severity::High, false, "Maximum nesting depth exceeded"),
    // Semantic
    ("E110", "Semantic", Severity::Medium, true, "Base class name does not resolve to a class"),
    ("E111", "Semantic", Severity::Medium, true, "Included file not found"),
    ("E112", "Semantic", Severity::Medium, true, "Included file could not be read"),
    ("E113", "Semantic", Severity::High, true, "Include nesting exceeds maximum depth"),
    ("E114", "Semantic", Severity::Medium, true, "Include path is not valid"),
    ("E120", "Semantic", Severity::Critical, false, "Nameable node already has a naming edge"),
    ("E121", "Semantic", Severity::Critical, false, "Class abstractness already set"),
];

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ENTRIES
            .iter()
            .map(|&(code, category, severity, recoverable, description)| {
                (
                    code,
                    ErrorMetadata {
                        code,
                        category,
                        severity,
                        recoverable,
                        description,
                    },
                )
            })
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or_else(|| {
            if code.starts_with('I') {
                "Success"
            } else {
                "Unknown"
            }
        })
}
