//! RDNA4 (gfx12) WMMA and SWMMAC register layouts.
//!
//! Wave32. Inputs are split across the half-waves (lanes 0-15 carry the low
//! half of K, lanes 16-31 the high half) rather than duplicated, and 16-bit
//! outputs pack two rows into each register. The sparse compression index
//! lives in one Src2 register, with OPSEL choosing the half-wave when a full
//! row of index bits fits in 16 lanes.

use crate::catalog::InstructionDescriptor;
use crate::types::{Matrix, RegName};

/// A and B share one layout. `cols` is the stored K extent (compressed for
/// sparse A); each half-wave carries half of it.
pub fn input(
    _inst: &InstructionDescriptor,
    cols: u32,
    idx: u32,
    k: u32,
    data_bits: u32,
) -> (RegName, Vec<u32>) {
    let per_lane = cols / 2;
    let slot = k % per_lane;
    let lane = idx + 16 * (k / per_lane);
    (RegName::from_slot(data_bits, slot), vec![lane])
}

/// C/D layout: two rows per register slot, both halves of each register in
/// use for 16-bit results.
pub fn output(inst: &InstructionDescriptor, i: u32, j: u32) -> (RegName, Vec<u32>) {
    let bits = inst.out.bits();
    let slot = i / 2;
    let lane = 16 * (i % 2) + j;
    (RegName::from_slot(bits, slot), vec![lane])
}

/// Compression-index layout. Each row needs K bits of index data (one 4-bit
/// field per source group of four columns). A K=32 row fits one half-wave
/// register and OPSEL selects which half-wave; a K=64 row spans both.
pub fn index_field(inst: &InstructionDescriptor, i: u32, k: u32, opsel: u32) -> (RegName, Vec<u32>) {
    let lane = if inst.k <= 32 {
        i + 16 * opsel
    } else {
        i + 16 * (k / 32)
    };
    let nib = (k % 32) / 4;
    (RegName::field(0, 4 * nib, 4 * nib + 3), vec![lane])
}

// ---------------------------------------------------------------------------
// Formula text for the instruction detail report.
// ---------------------------------------------------------------------------

pub fn input_reg_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    let cols = if matrix == Matrix::A {
        inst.a_cols()
    } else {
        inst.k
    };
    let per_lane = cols / 2;
    match inst.input_type(matrix).bits() {
        16 => format!("floor((k % {per_lane}) / 2).[16*(k % 2)+15 : 16*(k % 2)]"),
        8 => format!("floor((k % {per_lane}) / 4).[8*(k % 4)+7 : 8*(k % 4)]"),
        _ => format!("floor((k % {per_lane}) / 8).[4*(k % 8)+3 : 4*(k % 8)]"),
    }
}

pub fn output_reg_eqn(inst: &InstructionDescriptor) -> String {
    if inst.out.bits() == 16 {
        "floor(i / 4).[16*(floor(i / 2) % 2)+15 : 16*(floor(i / 2) % 2)]".to_string()
    } else {
        "floor(i / 2)".to_string()
    }
}

pub fn lane_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    match matrix {
        Matrix::A => format!("i + 16 * floor(k / {})", inst.a_cols() / 2),
        Matrix::B => format!("j + 16 * floor(k / {})", inst.k / 2),
        Matrix::K => {
            if inst.k <= 32 {
                "i + 16 * OPSEL".to_string()
            } else {
                "i + 16 * floor(k / 32)".to_string()
            }
        }
        _ => "16 * (i % 2) + j".to_string(),
    }
}

pub fn index_reg_eqn() -> String {
    "0.[4*floor((k % 32) / 4)+3 : 4*floor((k % 32) / 4)]".to_string()
}

pub fn inv_i_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    match matrix {
        Matrix::A => "(lane % 16)".to_string(),
        _ => {
            if inst.out.bits() == 16 {
                "2 * (2 * GPR_num + floor(GPR_bits / 16)) + floor(lane / 16)".to_string()
            } else {
                "2 * GPR_num + floor(lane / 16)".to_string()
            }
        }
    }
}

pub fn inv_k_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    let cols = if matrix == Matrix::A {
        inst.a_cols()
    } else {
        inst.k
    };
    let per_lane = cols / 2;
    match inst.input_type(matrix).bits() {
        16 => format!("{per_lane} * floor(lane / 16) + 2 * GPR_num + floor(GPR_bits / 16)"),
        8 => format!("{per_lane} * floor(lane / 16) + 4 * GPR_num + floor(GPR_bits / 8)"),
        _ => format!("{per_lane} * floor(lane / 16) + 8 * GPR_num + floor(GPR_bits / 4)"),
    }
}
