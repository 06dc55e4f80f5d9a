//! Coordinate↔register mapper.
//!
//! Each architecture family carries a closed-form forward mapping from matrix
//! coordinates to (register, lane, bit-range); the inverse is an index built
//! by enumerating the forward map, which keeps the two directions structurally
//! consistent. The catalog self-check walks both at startup.

use crate::catalog::{BlgpMode, CbszAbidMode, InstructionDescriptor};
use crate::error::{CalcError, Result};
use crate::modifier;
use crate::types::{Coordinate, Matrix, Modifiers, RegName, Sign};
use std::collections::HashMap;

pub mod gfx11;
pub mod gfx12;
pub mod gfx9;

/// One forward-mapped matrix entry.
#[derive(Debug, Clone)]
pub struct MappedEntry {
    pub coord: Coordinate,
    pub reg: RegName,
    /// Lanes holding the entry. More than one only where the architecture
    /// duplicates inputs across half-waves.
    pub lanes: Vec<u32>,
    pub sign: Sign,
}

fn check_bound(
    inst: &InstructionDescriptor,
    what: &'static str,
    value: u32,
    bound: u32,
) -> Result<()> {
    if value >= bound {
        return Err(CalcError::OutOfRangeCoordinate {
            mnemonic: inst.mnemonic.to_string(),
            what,
            value,
            max: bound - 1,
        });
    }
    Ok(())
}

/// Upper bound (exclusive) of the `k` coordinate for a matrix: compressed
/// for sparse A, the full K dimension otherwise.
fn k_bound(inst: &InstructionDescriptor, matrix: Matrix) -> u32 {
    if matrix == Matrix::A {
        inst.a_cols()
    } else {
        inst.k
    }
}

/// Forward mapping: where does one matrix entry live?
pub fn locate(
    inst: &InstructionDescriptor,
    matrix: Matrix,
    i: u32,
    j: u32,
    k: u32,
    block: u32,
    mods: &Modifiers,
) -> Result<MappedEntry> {
    check_bound(inst, "i", i, inst.m)?;
    check_bound(inst, "j", j, inst.n)?;
    check_bound(inst, "k", k, k_bound(inst, matrix))?;
    check_bound(inst, "block", block, inst.blocks)?;

    let coord = Coordinate {
        matrix,
        i,
        j,
        k,
        block,
    };

    let (reg, lanes) = if inst.arch.is_gfx9() {
        match matrix {
            Matrix::A => {
                let eff_block = if inst.cbsz_abid == CbszAbidMode::Broadcast {
                    modifier::broadcast_block(block, mods.cbsz, mods.abid)
                } else {
                    block
                };
                gfx9::input(inst, inst.m, inst.a_cols(), i, k, eff_block, inst.src0.bits())
            }
            Matrix::B => {
                let (reg, mut lanes) = gfx9::input(inst, inst.n, inst.k, j, k, block, inst.src1.bits());
                if inst.blgp == BlgpMode::LaneSwizzle {
                    for lane in &mut lanes {
                        *lane = modifier::blgp_source_lane(*lane, mods.blgp, inst.wave_size());
                    }
                }
                (reg, lanes)
            }
            Matrix::C | Matrix::D => gfx9::output(inst, i, j, block),
            Matrix::K => gfx9::index_field(inst, i, k, mods),
        }
    } else {
        match inst.arch {
            crate::arch::Architecture::Rdna3 => match matrix {
                Matrix::A => gfx11::input(inst, i, k),
                Matrix::B => gfx11::input(inst, j, k),
                Matrix::C | Matrix::D => gfx11::output(inst, i, j, mods.opsel),
                Matrix::K => unreachable!("RDNA3 has no sparse instructions"),
            },
            _ => match matrix {
                Matrix::A => gfx12::input(inst, inst.a_cols(), i, k, inst.src0.bits()),
                Matrix::B => gfx12::input(inst, inst.k, j, k, inst.src1.bits()),
                Matrix::C | Matrix::D => gfx12::output(inst, i, j),
                Matrix::K => gfx12::index_field(inst, i, k, mods.opsel),
            },
        }
    };

    let sign = modifier::sign_for(inst, matrix, &reg, mods);
    Ok(MappedEntry {
        coord,
        reg,
        lanes,
        sign,
    })
}

/// Every legal coordinate of one matrix, blocks outermost.
pub fn coordinate_space(inst: &InstructionDescriptor, matrix: Matrix) -> Vec<Coordinate> {
    let rows = if matrix.uses_i() { inst.m } else { 1 };
    let cols = if matrix.uses_j() { inst.n } else { 1 };
    let depth = if matrix.uses_k() {
        k_bound(inst, matrix)
    } else {
        1
    };
    let mut out = Vec::new();
    for block in 0..inst.blocks {
        for i in 0..rows {
            for j in 0..cols {
                for k in 0..depth {
                    out.push(Coordinate {
                        matrix,
                        i,
                        j,
                        k,
                        block,
                    });
                }
            }
        }
    }
    out
}

/// Registers needed to hold one matrix, derived from dimensions, element
/// size, and the architecture's lane usage.
pub fn gpr_count(inst: &InstructionDescriptor, matrix: Matrix) -> u32 {
    if matrix == Matrix::K {
        return 1;
    }
    let (elements, bits) = match matrix {
        Matrix::A => (inst.m * inst.a_cols() * inst.blocks, inst.src0.bits()),
        Matrix::B => (inst.k * inst.n * inst.blocks, inst.src1.bits()),
        Matrix::C | Matrix::D => (inst.m * inst.n * inst.blocks, inst.out.bits()),
        Matrix::K => unreachable!(),
    };
    let (lanes, eff_bits) = match inst.arch {
        // gfx9 inputs and outputs both spread across the full wave.
        a if a.is_gfx9() => (64, bits),
        // RDNA3 duplicates inputs over 16-lane groups and stores every
        // output element in a 32-bit slot regardless of its size.
        crate::arch::Architecture::Rdna3 => {
            if matrix.is_input() {
                (16, bits)
            } else {
                (32, 32)
            }
        }
        // RDNA4 splits inputs across the half-waves and packs outputs.
        _ => (32, bits),
    };
    elements * eff_bits / (lanes * 32)
}

/// Index bits each lane of a CDNA3 compression-index register actually
/// carries: 8 for 16-bit elements, 16 for 8-bit elements. ABID selects which
/// such slot of the 32-bit register is live.
pub fn index_slot_bits(inst: &InstructionDescriptor) -> u32 {
    let lane_groups = 64 / inst.m;
    let k_per_lane = inst.k / lane_groups;
    4 * (k_per_lane / 4)
}

/// Which of the candidate B lanes pairs with an A lane in one product term.
pub fn matching_b_lane(inst: &InstructionDescriptor, a_lane: u32, b_lanes: &[u32]) -> u32 {
    if inst.arch == crate::arch::Architecture::Rdna3 {
        // RDNA3 duplicates both inputs; A and B entries are lane-matched.
        a_lane
    } else {
        b_lanes[0]
    }
}

/// Inverse index: the forward map of one matrix, keyed by register and lane.
pub struct RegisterIndex {
    map: HashMap<(RegName, u32), Vec<Coordinate>>,
    /// Distinct registers in ascending (GPR, bit range) order.
    regs: Vec<RegName>,
}

impl RegisterIndex {
    /// Enumerates the matrix's coordinate space through `locate` under the
    /// given modifiers.
    pub fn build(
        inst: &InstructionDescriptor,
        matrix: Matrix,
        mods: &Modifiers,
    ) -> Result<RegisterIndex> {
        let mut map: HashMap<(RegName, u32), Vec<Coordinate>> = HashMap::new();
        let mut regs: Vec<RegName> = Vec::new();
        for coord in coordinate_space(inst, matrix) {
            let entry = locate(inst, matrix, coord.i, coord.j, coord.k, coord.block, mods)?;
            if !regs.contains(&entry.reg) {
                regs.push(entry.reg);
            }
            for &lane in &entry.lanes {
                map.entry((entry.reg, lane)).or_default().push(coord);
            }
        }
        regs.sort_by_key(|r| (r.gpr_lo, r.bits.map(|(lo, _)| lo).unwrap_or(0)));
        Ok(RegisterIndex { map, regs })
    }

    /// Coordinates stored at one (register, lane), in forward-enumeration
    /// order.
    pub fn coordinates_at(&self, reg: &RegName, lane: u32) -> Vec<Coordinate> {
        self.map.get(&(*reg, lane)).cloned().unwrap_or_default()
    }

    /// Distinct registers of the matrix, LSB ranges first within each GPR.
    pub fn registers(&self) -> &[RegName] {
        &self.regs
    }

    /// Registers overlapping one user-named VGPR, LSB first. A 64-bit pair
    /// is reported for either of its two VGPR numbers.
    pub fn registers_in_vgpr(&self, vgpr: u32) -> Vec<RegName> {
        self.regs
            .iter()
            .copied()
            .filter(|r| r.gpr_lo <= vgpr && vgpr <= r.gpr_hi)
            .collect()
    }

    pub fn has_lane(&self, lane: u32) -> bool {
        self.map.keys().any(|(_, l)| *l == lane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::Architecture;
    use crate::catalog::Catalog;

    fn inst(arch: Architecture, name: &str) -> InstructionDescriptor {
        *Catalog::with_builtins().get(arch, name).unwrap()
    }

    #[test]
    fn test_gpr_counts_cdna2() {
        let i = inst(Architecture::Cdna2, "V_MFMA_F32_4X4X1F32");
        assert_eq!(gpr_count(&i, Matrix::A), 1);
        assert_eq!(gpr_count(&i, Matrix::B), 1);
        assert_eq!(gpr_count(&i, Matrix::C), 4);
        assert_eq!(gpr_count(&i, Matrix::D), 4);

        let f64 = inst(Architecture::Cdna2, "V_MFMA_F64_16X16X4F64");
        assert_eq!(gpr_count(&f64, Matrix::A), 2);
        assert_eq!(gpr_count(&f64, Matrix::D), 8);
    }

    #[test]
    fn test_gpr_counts_rdna() {
        let w3 = inst(Architecture::Rdna3, "V_WMMA_F16_16X16X16_F16");
        assert_eq!(gpr_count(&w3, Matrix::A), 8);
        assert_eq!(gpr_count(&w3, Matrix::D), 8);

        let w4 = inst(Architecture::Rdna4, "V_WMMA_F16_16X16X16_F16");
        assert_eq!(gpr_count(&w4, Matrix::A), 4);
        assert_eq!(gpr_count(&w4, Matrix::D), 4);

        let sw = inst(Architecture::Rdna4, "V_SWMMAC_F32_16X16X32_F16");
        assert_eq!(gpr_count(&sw, Matrix::A), 4);
        assert_eq!(gpr_count(&sw, Matrix::B), 8);
        assert_eq!(gpr_count(&sw, Matrix::K), 1);
    }

    #[test]
    fn test_gpr_counts_cdna3_sparse() {
        let i = inst(Architecture::Cdna3, "V_SMFMAC_F32_16X16X32_F16");
        assert_eq!(gpr_count(&i, Matrix::A), 2);
        assert_eq!(gpr_count(&i, Matrix::B), 4);
        assert_eq!(gpr_count(&i, Matrix::D), 4);
        assert_eq!(gpr_count(&i, Matrix::K), 1);
    }

    #[test]
    fn test_locate_example_a_matrix() {
        // A[1][2].B4 of V_MFMA_F32_4X4X4F16 sits in v1{17}.[15:0].
        let i = inst(Architecture::Cdna2, "V_MFMA_F32_4X4X4F16");
        let e = locate(&i, Matrix::A, 1, 0, 2, 4, &Modifiers::default()).unwrap();
        assert_eq!(e.reg.with_lane(e.lanes[0]), "v1{17}.[15:0]");
    }

    #[test]
    fn test_locate_fp64_pair() {
        let i = inst(Architecture::Cdna2, "V_MFMA_F64_16X16X4F64");
        let e = locate(&i, Matrix::D, 5, 3, 0, 0, &Modifiers::default()).unwrap();
        assert!(e.reg.is_pair());
        assert_eq!(e.reg.with_lane(e.lanes[0]), "v[3:2]{19}");
    }

    #[test]
    fn test_locate_rejects_out_of_range() {
        let i = inst(Architecture::Cdna2, "V_MFMA_F32_4X4X1F32");
        assert!(matches!(
            locate(&i, Matrix::A, 4, 0, 0, 0, &Modifiers::default()),
            Err(CalcError::OutOfRangeCoordinate { what: "i", .. })
        ));
        assert!(matches!(
            locate(&i, Matrix::A, 0, 0, 1, 0, &Modifiers::default()),
            Err(CalcError::OutOfRangeCoordinate { what: "k", .. })
        ));
        assert!(matches!(
            locate(&i, Matrix::A, 0, 0, 0, 16, &Modifiers::default()),
            Err(CalcError::OutOfRangeCoordinate { what: "block", .. })
        ));
    }

    #[test]
    fn test_sparse_a_is_compressed() {
        let i = inst(Architecture::Cdna3, "V_SMFMAC_F32_16X16X32_F16");
        // Compressed A has K/2 = 16 columns.
        assert!(locate(&i, Matrix::A, 0, 0, 15, 0, &Modifiers::default()).is_ok());
        assert!(locate(&i, Matrix::A, 0, 0, 16, 0, &Modifiers::default()).is_err());
        // B and the index keep the full K.
        assert!(locate(&i, Matrix::B, 0, 0, 31, 0, &Modifiers::default()).is_ok());
        assert!(locate(&i, Matrix::K, 0, 0, 31, 0, &Modifiers::default()).is_ok());
    }

    #[test]
    fn test_register_index_roundtrip() {
        let i = inst(Architecture::Cdna2, "V_MFMA_F32_16X16X4F16");
        let mods = Modifiers::default();
        let index = RegisterIndex::build(&i, Matrix::A, &mods).unwrap();
        for coord in coordinate_space(&i, Matrix::A) {
            let e = locate(&i, Matrix::A, coord.i, coord.j, coord.k, coord.block, &mods).unwrap();
            for &lane in &e.lanes {
                assert!(index.coordinates_at(&e.reg, lane).contains(&coord));
            }
        }
    }

    #[test]
    fn test_registers_in_vgpr_covers_pairs() {
        let i = inst(Architecture::Cdna2, "V_MFMA_F64_16X16X4F64");
        let index = RegisterIndex::build(&i, Matrix::D, &Modifiers::default()).unwrap();
        // VGPRs 2 and 3 both resolve to the v[3:2] pair.
        assert_eq!(index.registers_in_vgpr(2), index.registers_in_vgpr(3));
        assert_eq!(index.registers_in_vgpr(2).len(), 1);
    }

    #[test]
    fn test_index_slot_bits() {
        let f16 = inst(Architecture::Cdna3, "V_SMFMAC_F32_16X16X32_F16");
        assert_eq!(index_slot_bits(&f16), 8);
        let i8 = inst(Architecture::Cdna3, "V_SMFMAC_I32_16X16X64_I8");
        assert_eq!(index_slot_bits(&i8), 16);
    }
}
