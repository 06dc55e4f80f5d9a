//! Instruction descriptor catalog: one read-only table of per-instruction
//! facts, keyed by (architecture, mnemonic), populated at first access and
//! validated by a round-trip self-check.

use crate::arch::Architecture;
use crate::error::{CalcError, Result};
use crate::types::{ElementType, Matrix};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

mod cdna1;
mod cdna2;
mod cdna3;
mod rdna3;
mod rdna4;

/// Instruction encoding family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    Vop3pMai,
    Vop3p,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Vop3pMai => "VOP3P-MAI",
            Encoding::Vop3p => "VOP3P",
        }
    }
}

/// How an instruction interprets the CBSZ and ABID fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CbszAbidMode {
    Unsupported,
    /// Dense A-matrix block broadcast.
    Broadcast,
    /// Sparse compression-index slot select.
    SparseSlot,
}

/// How an instruction interprets the BLGP field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlgpMode {
    Unsupported,
    /// Eight B-matrix lane broadcast/rotate patterns.
    LaneSwizzle,
    /// Three-bit negate mask over the A, B, and C operands.
    F64Negate,
}

/// How an instruction interprets OPSEL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpselMode {
    Unsupported,
    /// OPSEL[2] selects the 16-bit half of C/D registers.
    OutputHalf,
    /// Selects which compression-index lane set is read.
    SparseIndexSet,
}

/// How an instruction interprets NEG and NEG_HI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegMode {
    Unsupported,
    /// Per-operand negate (NEG) and negate/abs (NEG_HI) masks.
    FloatNegAbs,
    /// NEG[1:0] select signed/unsigned A and B; no mapping change.
    IntegerSignedness,
}

/// The invariant per-instruction record. Register counts and FLOP counts are
/// derived from these fields rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstructionDescriptor {
    pub mnemonic: &'static str,
    pub arch: Architecture,
    /// Full VOP3P opcode. For VOP3P-MAI encodings the 6-bit MAI opcode is
    /// `opcode & 0x3f`.
    pub opcode: u8,
    /// Src0 (A matrix) element type.
    pub src0: ElementType,
    /// Src1 (B matrix) element type. Differs from `src0` only for the
    /// mixed FP8/BF8 products.
    pub src1: ElementType,
    /// C and D element type.
    pub out: ElementType,
    pub m: u32,
    pub n: u32,
    pub k: u32,
    pub blocks: u32,
    pub cycles: u32,
    pub integer: bool,
    /// Whether C and D may live in ArchVGPRs.
    pub c_d_arch: bool,
    pub gpr_byte_align: u32,
    pub cbsz_abid: CbszAbidMode,
    pub blgp: BlgpMode,
    pub opsel: OpselMode,
    pub neg: NegMode,
    pub coexec: bool,
    pub coexec_delay: i32,
    /// SMFMAC/SWMMAC: A is the compressed M x K/2 operand, Src2 carries the
    /// compression index, and D is read-modify-write.
    pub sparse: bool,
}

impl InstructionDescriptor {
    pub fn encoding(&self) -> Encoding {
        if self.arch.is_gfx9() {
            Encoding::Vop3pMai
        } else {
            Encoding::Vop3p
        }
    }

    pub fn wave_size(&self) -> u32 {
        self.arch.wave_size()
    }

    /// Element type held in the Src2 field: C for dense instructions, the
    /// compression index for sparse ones.
    pub fn src2_type(&self) -> ElementType {
        if self.sparse {
            ElementType::Index
        } else {
            self.out
        }
    }

    pub fn input_type(&self, matrix: Matrix) -> ElementType {
        match matrix {
            Matrix::B => self.src1,
            _ => self.src0,
        }
    }

    /// Number of A-matrix columns actually stored: K/2 for sparse
    /// (4:2-compressed) instructions, K otherwise.
    pub fn a_cols(&self) -> u32 {
        if self.sparse {
            self.k / 2
        } else {
            self.k
        }
    }

    /// Matrices a query may name for this instruction. Sparse instructions
    /// have no C input; their Src2 field holds K instead.
    pub fn legal_matrices(&self) -> Vec<Matrix> {
        if self.sparse {
            vec![Matrix::A, Matrix::B, Matrix::D, Matrix::K]
        } else {
            vec![Matrix::A, Matrix::B, Matrix::C, Matrix::D]
        }
    }

    pub fn supports_matrix(&self, matrix: Matrix) -> bool {
        match matrix {
            Matrix::K => self.sparse,
            Matrix::C => !self.sparse,
            _ => true,
        }
    }

    /// Total multiply-add operations: `2 * M * N * K * blocks`. Sparse
    /// instructions count the full uncompressed K.
    pub fn flops(&self) -> u64 {
        2 * u64::from(self.m) * u64::from(self.n) * u64::from(self.k) * u64::from(self.blocks)
    }

    pub fn ops_name(&self) -> &'static str {
        if self.integer {
            "Ops"
        } else {
            "FLOPs"
        }
    }

    /// Whether coordinate labels carry a `.Bb` block suffix.
    pub fn shows_blocks(&self) -> bool {
        self.blocks > 1
    }
}

/// Read-only catalog of every instruction on every architecture, in
/// declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    instructions: Vec<InstructionDescriptor>,
}

impl Catalog {
    pub fn with_builtins() -> Catalog {
        let mut instructions = Vec::new();
        instructions.extend(cdna1::instructions());
        instructions.extend(cdna2::instructions());
        instructions.extend(cdna3::instructions());
        instructions.extend(rdna3::instructions());
        instructions.extend(rdna4::instructions());
        Catalog { instructions }
    }

    /// Instructions of one architecture, in catalog order.
    pub fn instructions(&self, arch: Architecture) -> Vec<&InstructionDescriptor> {
        self.instructions
            .iter()
            .filter(|inst| inst.arch == arch)
            .collect()
    }

    /// Case-insensitive mnemonic lookup within an architecture.
    pub fn get(&self, arch: Architecture, mnemonic: &str) -> Result<&InstructionDescriptor> {
        self.instructions
            .iter()
            .find(|inst| inst.arch == arch && inst.mnemonic.eq_ignore_ascii_case(mnemonic.trim()))
            .ok_or_else(|| CalcError::UnknownInstruction {
                mnemonic: mnemonic.to_uppercase(),
                arch: arch.canonical_name().to_string(),
            })
    }

    /// Construction-time consistency check: for every instruction and legal
    /// matrix, enumerate the coordinate space, apply the forward mapping,
    /// invert through the register index, and verify round-trip, coverage,
    /// disjointness, and dimensional bounds.
    pub fn self_check(&self) -> Result<()> {
        for inst in &self.instructions {
            for matrix in inst.legal_matrices() {
                check_matrix(inst, matrix)?;
            }
        }
        tracing::debug!(
            instructions = self.instructions.len(),
            "catalog self-check passed"
        );
        Ok(())
    }
}

fn inconsistency(inst: &InstructionDescriptor, matrix: Matrix, detail: String) -> CalcError {
    CalcError::CatalogInconsistency {
        detail: format!("{} {} matrix {matrix}: {detail}", inst.arch, inst.mnemonic),
    }
}

fn check_matrix(inst: &InstructionDescriptor, matrix: Matrix) -> Result<()> {
    use crate::mapping;
    use crate::types::Modifiers;

    let mods = Modifiers::default();
    let wave = inst.wave_size();
    let gprs = mapping::gpr_count(inst, matrix);
    let index = mapping::RegisterIndex::build(inst, matrix, &mods)?;

    let mut seen: BTreeSet<(u32, u32, Option<(u32, u32)>)> = BTreeSet::new();
    let mut gprs_used: BTreeSet<u32> = BTreeSet::new();
    let mut lanes_used: BTreeSet<u32> = BTreeSet::new();

    for coord in mapping::coordinate_space(inst, matrix) {
        let entry = mapping::locate(inst, matrix, coord.i, coord.j, coord.k, coord.block, &mods)
            .map_err(|e| inconsistency(inst, matrix, format!("locate failed: {e}")))?;
        for &lane in &entry.lanes {
            if lane >= wave {
                return Err(inconsistency(
                    inst,
                    matrix,
                    format!("lane {lane} exceeds wave size {wave}"),
                ));
            }
            lanes_used.insert(lane);
            for gpr in entry.reg.gpr_lo..=entry.reg.gpr_hi {
                if gpr >= gprs {
                    return Err(inconsistency(
                        inst,
                        matrix,
                        format!("GPR {gpr} exceeds the {gprs}-register budget"),
                    ));
                }
                gprs_used.insert(gpr);
            }
            // The compression index shares one 4-bit field between the four
            // columns of a source group, so disjointness applies to the
            // other matrices only.
            if matrix != Matrix::K
                && !seen.insert((entry.reg.gpr_lo, lane, entry.reg.bits))
            {
                return Err(inconsistency(
                    inst,
                    matrix,
                    format!(
                        "{} and an earlier coordinate share {}",
                        coord.label(inst.shows_blocks()),
                        entry.reg.with_lane(lane)
                    ),
                ));
            }
            // Round trip through the inverse index.
            let found = index.coordinates_at(&entry.reg, lane);
            if !found.iter().any(|c| *c == coord) {
                return Err(inconsistency(
                    inst,
                    matrix,
                    format!(
                        "inverse lookup of {} is missing {}",
                        entry.reg.with_lane(lane),
                        coord.label(inst.shows_blocks())
                    ),
                ));
            }
        }
    }

    // Dimensional consistency and coverage: every register is touched, and
    // every lane of the wave is touched (RDNA4 keeps its compression index
    // in one half-wave, selected by OPSEL).
    if gprs_used.len() as u32 != gprs {
        return Err(inconsistency(
            inst,
            matrix,
            format!("{} of {gprs} registers covered", gprs_used.len()),
        ));
    }
    let expected_lanes = if matrix == Matrix::K && !inst.arch.is_gfx9() {
        (inst.m * inst.k / 32).min(wave)
    } else {
        wave
    };
    if lanes_used.len() as u32 != expected_lanes {
        return Err(inconsistency(
            inst,
            matrix,
            format!("{} of {expected_lanes} lanes covered", lanes_used.len()),
        ));
    }
    Ok(())
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// The process-wide catalog. Built on first access; `main` and the tests run
/// [`Catalog::self_check`] against it before serving queries.
pub fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(Catalog::with_builtins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_population() {
        let catalog = Catalog::with_builtins();
        assert_eq!(catalog.instructions(Architecture::Cdna1).len(), 20);
        assert_eq!(catalog.instructions(Architecture::Cdna2).len(), 27);
        assert!(catalog.instructions(Architecture::Cdna3).len() >= 40);
        assert_eq!(catalog.instructions(Architecture::Rdna3).len(), 6);
        assert!(catalog.instructions(Architecture::Rdna4).len() >= 20);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = Catalog::with_builtins();
        let inst = catalog
            .get(Architecture::Cdna2, "v_mfma_f32_4x4x1f32")
            .unwrap();
        assert_eq!(inst.mnemonic, "V_MFMA_F32_4X4X1F32");
        assert_eq!(inst.opcode, 0x42);
    }

    #[test]
    fn test_unknown_instruction_errors() {
        let catalog = Catalog::with_builtins();
        assert!(matches!(
            catalog.get(Architecture::Rdna3, "V_MFMA_F32_4X4X1F32"),
            Err(CalcError::UnknownInstruction { .. })
        ));
    }

    #[test]
    fn test_blocks_imply_broadcast_support() {
        // Single-block instructions never support CBSZ/ABID broadcast.
        let catalog = Catalog::with_builtins();
        for inst in &catalog.instructions {
            if inst.cbsz_abid == CbszAbidMode::Broadcast {
                assert!(inst.blocks > 1, "{} broadcast with 1 block", inst.mnemonic);
            }
            if inst.blocks == 1 && !inst.sparse {
                assert_ne!(
                    inst.cbsz_abid,
                    CbszAbidMode::Broadcast,
                    "{}",
                    inst.mnemonic
                );
            }
        }
    }

    #[test]
    fn test_register_budget_invariant() {
        // A GPRs * wave * 32 covers the matrix payload exactly.
        let catalog = Catalog::with_builtins();
        for inst in &catalog.instructions {
            let bits = u64::from(inst.m)
                * u64::from(inst.a_cols())
                * u64::from(inst.blocks)
                * u64::from(inst.src0.bits());
            let capacity = u64::from(crate::mapping::gpr_count(inst, Matrix::A))
                * u64::from(inst.wave_size())
                * 32;
            assert!(capacity >= bits, "{} A budget", inst.mnemonic);
        }
    }

    #[test]
    fn test_sparse_descriptors() {
        let catalog = Catalog::with_builtins();
        let smfmac = catalog
            .get(Architecture::Cdna3, "V_SMFMAC_F32_16X16X32_F16")
            .unwrap();
        assert!(smfmac.sparse);
        assert_eq!(smfmac.src2_type(), ElementType::Index);
        assert_eq!(smfmac.a_cols(), 16);
        assert_eq!(smfmac.cbsz_abid, CbszAbidMode::SparseSlot);
        assert!(!smfmac.supports_matrix(Matrix::C));
        assert!(smfmac.supports_matrix(Matrix::K));
    }
}
