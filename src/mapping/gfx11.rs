//! RDNA3 (gfx11) WMMA register layouts.
//!
//! Wave32 only. Input rows and columns are duplicated across both half-waves;
//! outputs land in 32-bit register slots with OPSEL[2] choosing the 16-bit
//! half for 16-bit results.

use crate::catalog::InstructionDescriptor;
use crate::types::{Matrix, RegName};

/// A and B share one layout: the register slot walks K, and the entry is
/// broadcast to lanes `idx` and `idx + 16`.
pub fn input(inst: &InstructionDescriptor, idx: u32, k: u32) -> (RegName, Vec<u32>) {
    let bits = inst.src0.bits();
    (RegName::from_slot(bits, k), vec![idx, idx + 16])
}

/// C/D layout: two rows per 32-bit register slot; 16-bit outputs skip the
/// unused half of each register, with OPSEL[2] bumping into the high half.
pub fn output(inst: &InstructionDescriptor, i: u32, j: u32, opsel: u32) -> (RegName, Vec<u32>) {
    let bits = inst.out.bits();
    let skip_half = if bits == 16 { 2 } else { 1 };
    let slot = skip_half * (i / 2) + (opsel >> 2);
    let lane = (inst.n * i + j) % 32;
    (RegName::from_slot(bits, slot), vec![lane])
}

// ---------------------------------------------------------------------------
// Formula text for the instruction detail report.
// ---------------------------------------------------------------------------

pub fn input_reg_eqn(inst: &InstructionDescriptor) -> String {
    match inst.src0.bits() {
        16 => "floor(k / 2).[16*(k % 2)+15 : 16*(k % 2)]".to_string(),
        8 => "floor(k / 4).[8*(k % 4)+7 : 8*(k % 4)]".to_string(),
        _ => "floor(k / 8).[4*(k % 8)+3 : 4*(k % 8)]".to_string(),
    }
}

pub fn output_reg_eqn(inst: &InstructionDescriptor) -> String {
    let base = "floor(i / 2)".to_string();
    if inst.out.bits() == 16 {
        format!("({base}).[15:0]")
    } else {
        base
    }
}

pub fn lane_eqn(matrix: Matrix) -> String {
    match matrix {
        Matrix::A => "i and i+16".to_string(),
        Matrix::B => "j and j+16".to_string(),
        _ => "((16 * i) % 32) + j".to_string(),
    }
}

pub fn inv_i_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    match matrix {
        Matrix::A => "(lane % 16)".to_string(),
        _ => {
            let base = "2 * GPR_num + floor(lane / 16)".to_string();
            if inst.out.bits() == 16 {
                format!("({base}).[15:0]")
            } else {
                base
            }
        }
    }
}

pub fn inv_k_eqn(inst: &InstructionDescriptor) -> String {
    match inst.src0.bits() {
        16 => "2 * GPR_num + floor(GPR_bits / 16)".to_string(),
        8 => "4 * GPR_num + floor(GPR_bits / 8)".to_string(),
        _ => "8 * GPR_num + floor(GPR_bits / 4)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::Architecture;
    use crate::catalog::Catalog;

    fn inst(name: &str) -> InstructionDescriptor {
        *Catalog::with_builtins()
            .get(Architecture::Rdna3, name)
            .unwrap()
    }

    #[test]
    fn test_input_duplicates_across_half_waves() {
        let i = inst("V_WMMA_F32_16X16X16_F16");
        let (reg, lanes) = input(&i, 3, 5);
        assert_eq!(reg.to_string(), "v2.[31:16]");
        assert_eq!(lanes, vec![3, 19]);
    }

    #[test]
    fn test_output_32bit() {
        let i = inst("V_WMMA_F32_16X16X16_F16");
        let (reg, lanes) = output(&i, 5, 7, 0);
        assert_eq!(reg.to_string(), "v2");
        assert_eq!(lanes, vec![(16 * 5 + 7) % 32]);
    }

    #[test]
    fn test_output_16bit_halves() {
        let i = inst("V_WMMA_F16_16X16X16_F16");
        // OPSEL=0 keeps the low halves, skipping the high half of each GPR.
        let (reg, _) = output(&i, 2, 0, 0);
        assert_eq!(reg.to_string(), "v1.[15:0]");
        // OPSEL[2] set moves every slot to the high half.
        let (reg, _) = output(&i, 2, 0, 4);
        assert_eq!(reg.to_string(), "v1.[31:16]");
    }
}
