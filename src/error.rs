//! Error taxonomy for the calculator.
//!
//! Every error names the offending parameter and its legal range; none are
//! recovered internally.

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CalcError>;

#[derive(Debug, Clone, Error, Diagnostic)]
pub enum CalcError {
    #[error("architecture `{name}` is not supported")]
    #[diagnostic(
        code(arch::invalid),
        help("choose one of {available}, or one of their alternative names")
    )]
    InvalidArch { name: String, available: String },

    #[error("instruction `{mnemonic}` is not supported in the {arch} architecture")]
    #[diagnostic(
        code(catalog::unknown_instruction),
        help("use --list-instructions to see the {arch} instruction set")
    )]
    UnknownInstruction { mnemonic: String, arch: String },

    #[error("{message}")]
    #[diagnostic(code(query::bad_usage))]
    BadUsage { message: String },

    #[error("instruction {mnemonic} does not support the {modifier} modifier")]
    #[diagnostic(
        code(modifier::unsupported),
        help("leave {modifier} at its default value of 0 for this instruction")
    )]
    UnsupportedModifier {
        mnemonic: String,
        modifier: &'static str,
    },

    #[error("{modifier} value {value} is out of range for instruction {mnemonic}")]
    #[diagnostic(code(modifier::out_of_range), help("{legal}"))]
    ModifierOutOfRange {
        mnemonic: String,
        modifier: &'static str,
        value: u32,
        legal: String,
    },

    #[error("input value for '{what}', {value}, is too large for instruction {mnemonic}")]
    #[diagnostic(code(mapping::out_of_range), help("maximum value of {what} is {max}"))]
    OutOfRangeCoordinate {
        mnemonic: String,
        what: &'static str,
        value: u32,
        max: u32,
    },

    #[error("instruction catalog self-check failed: {detail}")]
    #[diagnostic(
        code(catalog::inconsistent),
        help("this is an internal defect in the descriptor tables")
    )]
    CatalogInconsistency { detail: String },
}

impl CalcError {
    pub fn bad_usage(message: impl Into<String>) -> CalcError {
        CalcError::BadUsage {
            message: message.into(),
        }
    }
}
