//! Shared value types: element types, matrix selectors, modifier bundles,
//! register locations, and coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numerical types that matrix instructions read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    F64,
    F32,
    /// TF32-style reduced precision carried in a 32-bit container.
    Xf32,
    F16,
    Bf16,
    I32,
    I8,
    Iu8,
    Iu4,
    /// FP8 E4M3.
    Fp8,
    /// FP8 E5M2.
    Bf8,
    /// Structured-sparsity compression index register (packed 2-bit fields).
    Index,
}

impl ElementType {
    /// Storage size of one element, in bits.
    pub fn bits(self) -> u32 {
        match self {
            ElementType::F64 => 64,
            ElementType::F32 | ElementType::Xf32 | ElementType::I32 | ElementType::Index => 32,
            ElementType::F16 | ElementType::Bf16 => 16,
            ElementType::I8 | ElementType::Iu8 | ElementType::Fp8 | ElementType::Bf8 => 8,
            ElementType::Iu4 => 4,
        }
    }

    /// Human-readable description used by the instruction detail report.
    pub fn describe(self) -> &'static str {
        match self {
            ElementType::F64 => "FP64 (IEEE binary64 floating point)",
            ElementType::F32 => "FP32 (IEEE binary32 floating point)",
            ElementType::Xf32 => "XF32 (19-bit TF32-style floating point in a 32-bit container)",
            ElementType::F16 => "FP16 (IEEE binary16 floating point)",
            ElementType::Bf16 => "BF16 (Brain floating point)",
            ElementType::I32 => "int32 (Signed 32-bit integer)",
            ElementType::I8 => "int8 (Signed 8-bit integer)",
            ElementType::Iu8 => "IU8 (Signed/unsigned 8-bit integer)",
            ElementType::Iu4 => "IU4 (Signed/unsigned 4-bit integer)",
            ElementType::Fp8 => "FP8 (E4M3 8-bit floating point)",
            ElementType::Bf8 => "BF8 (E5M2 8-bit floating point)",
            ElementType::Index => "Compression index (packed 2-bit column selectors)",
        }
    }
}

/// Operand matrix selector. `K` is the compression-index matrix of sparse
/// instructions and follows A's row/column schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Matrix {
    A,
    B,
    C,
    D,
    K,
}

impl Matrix {
    pub fn letter(self) -> char {
        match self {
            Matrix::A => 'A',
            Matrix::B => 'B',
            Matrix::C => 'C',
            Matrix::D => 'D',
            Matrix::K => 'K',
        }
    }

    /// Whether this matrix is addressed by the `i` (row) coordinate.
    pub fn uses_i(self) -> bool {
        !matches!(self, Matrix::B)
    }

    /// Whether this matrix is addressed by the `j` (column) coordinate.
    pub fn uses_j(self) -> bool {
        matches!(self, Matrix::B | Matrix::C | Matrix::D)
    }

    /// Whether this matrix is addressed by the `k` coordinate.
    pub fn uses_k(self) -> bool {
        matches!(self, Matrix::A | Matrix::B | Matrix::K)
    }

    pub fn is_input(self) -> bool {
        matches!(self, Matrix::A | Matrix::B | Matrix::K)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Sign annotation attached to a register location or matrix entry by the
/// NEG/NEG_HI and FP64-BLGP modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sign {
    #[default]
    Positive,
    Negated,
    Absolute,
    NegatedAbsolute,
}

impl Sign {
    pub fn negated(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negated,
            Sign::Negated => Sign::Positive,
            Sign::Absolute => Sign::NegatedAbsolute,
            Sign::NegatedAbsolute => Sign::Absolute,
        }
    }

    /// Wraps a rendered value in this sign's notation: `-x`, `|x|`, `-|x|`.
    pub fn wrap(self, value: &str) -> String {
        match self {
            Sign::Positive => value.to_string(),
            Sign::Negated => format!("-{value}"),
            Sign::Absolute => format!("|{value}|"),
            Sign::NegatedAbsolute => format!("-|{value}|"),
        }
    }
}

/// User-supplied modifier bundle for one query. All fields default to zero,
/// which is the identity for every modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub cbsz: u32,
    pub abid: u32,
    pub blgp: u32,
    pub opsel: u32,
    pub neg: u32,
    pub neg_hi: u32,
}

/// A named register: one VGPR, a `[hi:lo]` VGPR pair for 64-bit elements, or
/// a sub-register bit range for packed elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegName {
    pub gpr_lo: u32,
    pub gpr_hi: u32,
    /// Sub-register bit range, present only when the element does not fill
    /// the register. Always within one 32-bit register.
    pub bits: Option<(u32, u32)>,
}

impl RegName {
    /// Maps a storage slot to its register name. Slots are numbered in units
    /// of the element size: for 8-byte elements slot 2 is `v[5:4]`, for
    /// 1-byte elements slot 2 is `v0.[23:16]`.
    pub fn from_slot(data_bits: u32, slot: u32) -> RegName {
        match data_bits {
            64 => RegName {
                gpr_lo: slot * 2,
                gpr_hi: slot * 2 + 1,
                bits: None,
            },
            32 => RegName {
                gpr_lo: slot,
                gpr_hi: slot,
                bits: None,
            },
            _ => {
                let per_gpr = 32 / data_bits;
                let sub = slot % per_gpr;
                RegName {
                    gpr_lo: slot / per_gpr,
                    gpr_hi: slot / per_gpr,
                    bits: Some((sub * data_bits, sub * data_bits + data_bits - 1)),
                }
            }
        }
    }

    /// A sub-field of one VGPR with an explicit bit range, used for the
    /// compression-index register.
    pub fn field(gpr: u32, bit_lo: u32, bit_hi: u32) -> RegName {
        RegName {
            gpr_lo: gpr,
            gpr_hi: gpr,
            bits: Some((bit_lo, bit_hi)),
        }
    }

    pub fn is_pair(&self) -> bool {
        self.gpr_hi != self.gpr_lo
    }

    /// Renders the register with a lane number: `v3{6}`, `v[1:0]{5}`,
    /// `v0{17}.[15:0]`.
    pub fn with_lane(&self, lane: u32) -> String {
        let mut s = String::from("v");
        if self.is_pair() {
            s.push_str(&format!("[{}:{}]", self.gpr_hi, self.gpr_lo));
        } else {
            s.push_str(&self.gpr_lo.to_string());
        }
        s.push_str(&format!("{{{lane}}}"));
        if let Some((lo, hi)) = self.bits {
            s.push_str(&format!(".[{hi}:{lo}]"));
        }
        s
    }
}

impl fmt::Display for RegName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pair() {
            write!(f, "v[{}:{}]", self.gpr_hi, self.gpr_lo)?;
        } else {
            write!(f, "v{}", self.gpr_lo)?;
        }
        if let Some((lo, hi)) = self.bits {
            write!(f, ".[{hi}:{lo}]")?;
        }
        Ok(())
    }
}

/// A logical matrix entry: `(i, j, k, block)` plus the matrix it belongs to.
/// A ignores `j`, B ignores `i`, C/D ignore `k`; K follows A's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub matrix: Matrix,
    pub i: u32,
    pub j: u32,
    pub k: u32,
    pub block: u32,
}

impl Coordinate {
    /// Renders the entry as `A[i][k]`, `B[k][j]`, `C[i][j]`, or `K[i][k]`,
    /// with a `.Bb` suffix when the instruction has more than one block.
    pub fn label(&self, show_block: bool) -> String {
        let body = match self.matrix {
            Matrix::A | Matrix::K => format!("{}[{}][{}]", self.matrix, self.i, self.k),
            Matrix::B => format!("{}[{}][{}]", self.matrix, self.k, self.j),
            Matrix::C | Matrix::D => format!("{}[{}][{}]", self.matrix, self.i, self.j),
        };
        if show_block {
            format!("{body}.B{}", self.block)
        } else {
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reg_name_32bit() {
        let r = RegName::from_slot(32, 3);
        assert_eq!(r.to_string(), "v3");
        assert_eq!(r.with_lane(6), "v3{6}");
    }

    #[test]
    fn test_reg_name_64bit_pair() {
        let r = RegName::from_slot(64, 2);
        assert_eq!(r.to_string(), "v[5:4]");
        assert_eq!(r.with_lane(0), "v[5:4]{0}");
    }

    #[test]
    fn test_reg_name_packed_16bit() {
        assert_eq!(RegName::from_slot(16, 2).to_string(), "v1.[15:0]");
        assert_eq!(RegName::from_slot(16, 3).with_lane(17), "v1{17}.[31:16]");
    }

    #[test]
    fn test_reg_name_packed_8bit_and_4bit() {
        assert_eq!(RegName::from_slot(8, 2).to_string(), "v0.[23:16]");
        assert_eq!(RegName::from_slot(8, 5).to_string(), "v1.[15:8]");
        assert_eq!(RegName::from_slot(4, 9).to_string(), "v1.[7:4]");
    }

    #[test]
    fn test_index_field() {
        assert_eq!(RegName::field(0, 28, 31).with_lane(18), "v0{18}.[31:28]");
    }

    #[test]
    fn test_sign_wrapping() {
        assert_eq!(Sign::Positive.wrap("A[0][0]"), "A[0][0]");
        assert_eq!(Sign::Negated.wrap("A[0][0]"), "-A[0][0]");
        assert_eq!(Sign::Absolute.wrap("C[1][2]"), "|C[1][2]|");
        assert_eq!(Sign::NegatedAbsolute.wrap("C[1][2]"), "-|C[1][2]|");
        assert_eq!(Sign::Negated.negated(), Sign::Positive);
        assert_eq!(Sign::Absolute.negated(), Sign::NegatedAbsolute);
    }

    #[test]
    fn test_coordinate_labels() {
        let a = Coordinate {
            matrix: Matrix::A,
            i: 1,
            j: 0,
            k: 2,
            block: 4,
        };
        assert_eq!(a.label(true), "A[1][2].B4");
        assert_eq!(a.label(false), "A[1][2]");
        let b = Coordinate {
            matrix: Matrix::B,
            i: 0,
            j: 3,
            k: 7,
            block: 0,
        };
        assert_eq!(b.label(false), "B[7][3]");
    }
}
