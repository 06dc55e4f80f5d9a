//! Query facade: the five user-facing operations over the catalog, mapper,
//! and modifier engine. Every operation is a pure function from its
//! arguments to a printable record; warnings ride along with the result.

use crate::arch::Architecture;
use crate::catalog::{BlgpMode, Catalog, CbszAbidMode, InstructionDescriptor, NegMode, OpselMode};
use crate::error::{CalcError, Result};
use crate::mapping::{self, RegisterIndex};
use crate::modifier;
use crate::types::{Matrix, Modifiers};

/// Line-oriented result of `detail`, `get_register`, and `matrix_entry`.
#[derive(Debug, Clone)]
pub struct QueryReport {
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
}

/// One table of a layout result. Cells may hold several entries (packed
/// sub-registers, broadcast duplicates); the formatting sink picks the join.
#[derive(Debug, Clone)]
pub struct LayoutBlock {
    /// `Block N` / `Blocks n, m, …` heading, absent on blockless layouts.
    pub label: Option<String>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Vec<String>>>,
}

#[derive(Debug, Clone)]
pub struct LayoutReport {
    pub blocks: Vec<LayoutBlock>,
    pub warnings: Vec<String>,
}

/// Mnemonics of one architecture, in catalog order.
pub fn list_instructions(catalog: &Catalog, arch: Architecture) -> Vec<&'static str> {
    catalog
        .instructions(arch)
        .iter()
        .map(|inst| inst.mnemonic)
        .collect()
}

fn resolve<'a>(
    catalog: &'a Catalog,
    arch: Architecture,
    mnemonic: &str,
) -> Result<&'a InstructionDescriptor> {
    catalog.get(arch, mnemonic)
}

/// Argument legality shared by the matrix-specific queries.
fn check_matrix_args(
    inst: &InstructionDescriptor,
    matrix: Matrix,
    output_calc: bool,
) -> Result<()> {
    if !inst.supports_matrix(matrix) {
        let message = match matrix {
            Matrix::K => format!(
                "the compression-index matrix only exists on sparse instructions; \
                 {} is dense",
                inst.mnemonic
            ),
            Matrix::C => format!(
                "{} is a sparse instruction and has no C input; it accumulates into D",
                inst.mnemonic
            ),
            _ => format!("matrix {matrix} is not legal for {}", inst.mnemonic),
        };
        return Err(CalcError::bad_usage(message));
    }
    if output_calc && matrix != Matrix::D {
        return Err(CalcError::bad_usage(
            "the output calculation is only possible for the D matrix",
        ));
    }
    if output_calc && inst.sparse {
        return Err(CalcError::bad_usage(
            "the output calculation is not available for sparse instructions: \
             the B operand of each product depends on runtime compression-index values",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// get-register
// ---------------------------------------------------------------------------

/// Register and lane for one matrix entry, optionally expanded into the
/// sum-of-products that produces a D entry.
#[allow(clippy::too_many_arguments)]
pub fn get_register(
    catalog: &Catalog,
    arch: Architecture,
    mnemonic: &str,
    matrix: Matrix,
    coords: (u32, u32, u32, u32),
    mods: &Modifiers,
    output_calc: bool,
) -> Result<QueryReport> {
    let inst = resolve(catalog, arch, mnemonic)?;
    check_matrix_args(inst, matrix, output_calc)?;
    let warnings = modifier::validate(inst, matrix, mods, output_calc)?;

    let (i, j, k, block) = coords;
    let entry = mapping::locate(inst, matrix, i, j, k, block, mods)?;
    let label = entry.coord.label(inst.shows_blocks());

    let mut lines = Vec::new();
    if matrix == Matrix::D && output_calc {
        let sources = source_string(inst, i, j, block, false, mods)?;
        for &lane in &entry.lanes {
            lines.push(format!(
                "{label} = Vdst_{} = {sources}",
                entry.reg.with_lane(lane)
            ));
        }
    } else {
        for &lane in &entry.lanes {
            lines.push(format!(
                "{label} = {}",
                entry.sign.wrap(&entry.reg.with_lane(lane))
            ));
        }
    }
    Ok(QueryReport { lines, warnings })
}

// ---------------------------------------------------------------------------
// matrix-entry
// ---------------------------------------------------------------------------

/// All matrix entries stored at one (register, lane), sub-fields in
/// least-significant-bit order.
#[allow(clippy::too_many_arguments)]
pub fn matrix_entry(
    catalog: &Catalog,
    arch: Architecture,
    mnemonic: &str,
    matrix: Matrix,
    register: u32,
    lane: u32,
    mods: &Modifiers,
    output_calc: bool,
) -> Result<QueryReport> {
    let inst = resolve(catalog, arch, mnemonic)?;
    check_matrix_args(inst, matrix, output_calc)?;
    let warnings = modifier::validate(inst, matrix, mods, output_calc)?;

    let total = mapping::gpr_count(inst, matrix);
    if register >= total {
        return Err(CalcError::OutOfRangeCoordinate {
            mnemonic: inst.mnemonic.to_string(),
            what: "register",
            value: register,
            max: total - 1,
        });
    }
    let wave = inst.wave_size();
    if lane >= wave {
        return Err(CalcError::OutOfRangeCoordinate {
            mnemonic: inst.mnemonic.to_string(),
            what: "lane",
            value: lane,
            max: wave - 1,
        });
    }

    // The output calculation resolves entries against the unmodified
    // layout; the modifiers then reshape the product terms themselves.
    let index_mods = if output_calc {
        Modifiers {
            cbsz: 0,
            abid: 0,
            blgp: 0,
            ..*mods
        }
    } else {
        *mods
    };

    // A broadcast-target lane reads its source lane's storage.
    let storage_lane = if matrix == Matrix::B && inst.blgp == BlgpMode::LaneSwizzle {
        modifier::blgp_source_lane(lane, index_mods.blgp, wave)
    } else {
        lane
    };

    let index = RegisterIndex::build(inst, matrix, &index_mods)?;
    let mut lines = Vec::new();
    for reg in index.registers_in_vgpr(register) {
        let coords = index.coordinates_at(&reg, storage_lane);
        let sign = modifier::sign_for(inst, matrix, &reg, mods);
        for coord in coords {
            let reg_lane = reg.with_lane(storage_lane);
            let label = coord.label(inst.shows_blocks());
            if matrix == Matrix::D && output_calc {
                let sources = source_string(inst, coord.i, coord.j, coord.block, true, mods)?;
                lines.push(format!("{reg_lane} = {label} = {sources}"));
            } else {
                lines.push(format!("{reg_lane} = {}", sign.wrap(&label)));
            }
        }
    }

    if lines.is_empty() {
        let culprit = match matrix {
            Matrix::A => "instruction modifiers CBSZ and ABID",
            Matrix::K => "the index set selection",
            _ => "the instruction modifiers",
        };
        lines.push(format!(
            "Due to {culprit}, lane {lane} is not used for this instruction."
        ));
    }
    Ok(QueryReport { lines, warnings })
}

// ---------------------------------------------------------------------------
// D-matrix output calculation
// ---------------------------------------------------------------------------

/// Renders the sum-of-products feeding one D entry: one term per K step plus
/// the C accumulator. `find_element` selects matrix-entry form over
/// register form.
fn source_string(
    inst: &InstructionDescriptor,
    i: u32,
    j: u32,
    block: u32,
    find_element: bool,
    mods: &Modifiers,
) -> Result<String> {
    let zero = Modifiers {
        opsel: mods.opsel,
        ..Modifiers::default()
    };
    let a_mods = Modifiers { blgp: 0, ..*mods };
    let b_mods = Modifiers {
        cbsz: 0,
        abid: 0,
        ..*mods
    };

    // Modifier-free layouts resolve which original entries the transformed
    // registers actually carry.
    let (a_index, b_index) = if find_element {
        (
            Some(RegisterIndex::build(inst, Matrix::A, &zero)?),
            Some(RegisterIndex::build(inst, Matrix::B, &zero)?),
        )
    } else {
        (None, None)
    };

    let mut terms = Vec::new();
    for k in 0..inst.k {
        let a = mapping::locate(inst, Matrix::A, i, j, k, block, &a_mods)?;
        let b = mapping::locate(inst, Matrix::B, i, j, k, block, &b_mods)?;
        let a_lane = a.lanes[0];
        let b_lane = mapping::matching_b_lane(inst, a_lane, &b.lanes);
        let a_sign = modifier::sign_for(inst, Matrix::A, &a.reg, mods);
        let b_sign = modifier::sign_for(inst, Matrix::B, &b.reg, mods);
        match (&a_index, &b_index) {
            (Some(a_index), Some(b_index)) => {
                let a_coords = a_index.coordinates_at(&a.reg, a_lane);
                let b_coord = b_index.coordinates_at(&b.reg, b_lane).first().copied();
                for a_coord in a_coords {
                    if a_coord.k != k {
                        continue;
                    }
                    let a_name = a_sign.wrap(&a_coord.label(inst.shows_blocks()));
                    let b_name = match b_coord {
                        Some(c) => b_sign.wrap(&c.label(inst.shows_blocks())),
                        None => continue,
                    };
                    terms.push(format!("{a_name}·{b_name}"));
                }
            }
            _ => {
                let a_name = a_sign.wrap(&format!("Src0_{}", a.reg.with_lane(a_lane)));
                let b_name = b_sign.wrap(&format!("Src1_{}", b.reg.with_lane(b_lane)));
                terms.push(format!("{a_name}·{b_name}"));
            }
        }
    }

    let mut result = terms.join(" + ");
    let c = mapping::locate(inst, Matrix::C, i, j, 0, block, &zero)?;
    let c_lane = c.lanes[0];
    result.push_str(if mods.neg & 0x4 != 0 && inst.neg == NegMode::FloatNegAbs {
        " - "
    } else {
        " + "
    });
    let bars = if mods.neg_hi & 0x4 != 0 && inst.neg == NegMode::FloatNegAbs {
        "|"
    } else {
        ""
    };
    if find_element {
        result.push_str(&format!(
            "{bars}{}{bars}",
            c.coord.label(inst.shows_blocks())
        ));
    } else {
        result.push_str(&format!("{bars}Src2_{}{bars}", c.reg.with_lane(c_lane)));
    }
    Ok(result)
}

// ---------------------------------------------------------------------------
// register-layout
// ---------------------------------------------------------------------------

/// Registers and lanes for an entire matrix, one table per block. CBSZ
/// broadcast collapses aligned block groups into one table.
pub fn register_layout(
    catalog: &Catalog,
    arch: Architecture,
    mnemonic: &str,
    matrix: Matrix,
    mods: &Modifiers,
    transpose: bool,
) -> Result<LayoutReport> {
    let inst = resolve(catalog, arch, mnemonic)?;
    check_matrix_args(inst, matrix, false)?;
    let warnings = modifier::validate(inst, matrix, mods, false)?;

    let print_blocks = inst.arch.is_gfx9();
    let broadcast = matrix == Matrix::A && inst.cbsz_abid == CbszAbidMode::Broadcast;
    let group = 1u32 << mods.cbsz;

    let mut blocks = Vec::new();
    for b in 0..inst.blocks {
        let label = if print_blocks {
            if broadcast {
                if b % group != 0 {
                    continue;
                }
                let names: Vec<String> = (b..b + group).map(|x| x.to_string()).collect();
                if names.len() > 1 {
                    Some(format!("Blocks {}", names.join(", ")))
                } else {
                    Some(format!("Block {b}"))
                }
            } else {
                Some(format!("Block {b}"))
            }
        } else {
            None
        };

        let (row_axis, col_axis) = axis_names(matrix);
        let corner = if transpose {
            format!("{matrix}[{col_axis}][{row_axis}]")
        } else {
            format!("{matrix}[{row_axis}][{col_axis}]")
        };
        let (rows, cols) = table_dims(inst, matrix);
        let mut header = vec![corner];
        header.extend((0..cols).map(|c| c.to_string()));

        let mut table_rows = Vec::new();
        for r in 0..rows {
            let mut row: Vec<Vec<String>> = vec![vec![r.to_string()]];
            for c in 0..cols {
                let (i, j, k) = cell_coords(matrix, r, c);
                let entry = mapping::locate(inst, matrix, i, j, k, b, mods)?;
                let cell: Vec<String> = entry
                    .lanes
                    .iter()
                    .map(|&lane| entry.sign.wrap(&entry.reg.with_lane(lane)))
                    .collect();
                row.push(cell);
            }
            table_rows.push(row);
        }
        blocks.push(LayoutBlock {
            label,
            header,
            rows: table_rows,
        });
    }
    Ok(LayoutReport { blocks, warnings })
}

/// Row/column axis letters for table corner labels.
fn axis_names(matrix: Matrix) -> (&'static str, &'static str) {
    match matrix {
        Matrix::A | Matrix::K => ("M", "K"),
        Matrix::B => ("K", "N"),
        Matrix::C | Matrix::D => ("M", "N"),
    }
}

/// Displayed (rows, cols) of one block's table.
fn table_dims(inst: &InstructionDescriptor, matrix: Matrix) -> (u32, u32) {
    match matrix {
        Matrix::A => (inst.m, inst.a_cols()),
        Matrix::K => (inst.m, inst.k),
        Matrix::B => (inst.k, inst.n),
        Matrix::C | Matrix::D => (inst.m, inst.n),
    }
}

/// Maps a table (row, col) position back to (i, j, k).
fn cell_coords(matrix: Matrix, r: u32, c: u32) -> (u32, u32, u32) {
    match matrix {
        Matrix::A | Matrix::K => (r, 0, c),
        Matrix::B => (0, c, r),
        Matrix::C | Matrix::D => (r, c, 0),
    }
}

// ---------------------------------------------------------------------------
// matrix-layout
// ---------------------------------------------------------------------------

/// Matrix entries across every register and lane the instruction uses: lanes
/// down, registers across. BLGP broadcasts show the source lane's content on
/// every consuming lane, deduplicated.
pub fn matrix_layout(
    catalog: &Catalog,
    arch: Architecture,
    mnemonic: &str,
    matrix: Matrix,
    mods: &Modifiers,
) -> Result<LayoutReport> {
    let inst = resolve(catalog, arch, mnemonic)?;
    check_matrix_args(inst, matrix, false)?;
    let warnings = modifier::validate(inst, matrix, mods, false)?;

    let index = RegisterIndex::build(inst, matrix, mods)?;
    let wave = inst.wave_size();
    let swizzle = matrix == Matrix::B && inst.blgp == BlgpMode::LaneSwizzle;

    let mut header = vec!["lane".to_string()];
    header.extend(index.registers().iter().map(|r| r.to_string()));

    let mut rows: Vec<Vec<Vec<String>>> = Vec::new();
    for lane in 0..wave {
        let src_lane = if swizzle {
            modifier::blgp_source_lane(lane, mods.blgp, wave)
        } else {
            lane
        };
        let mut row: Vec<Vec<String>> = vec![vec![src_lane.to_string()]];
        for reg in index.registers() {
            let coords = index.coordinates_at(reg, src_lane);
            if coords.is_empty() {
                continue;
            }
            let sign = modifier::sign_for(inst, matrix, reg, mods);
            row.push(
                coords
                    .iter()
                    .map(|c| sign.wrap(&c.label(inst.shows_blocks())))
                    .collect());
        }
        if row.len() > 1 && !rows.contains(&row) {
            rows.push(row);
        }
    }
    rows.sort_by_key(|row| row[0][0].parse::<u32>().unwrap_or(0));

    Ok(LayoutReport {
        blocks: vec![LayoutBlock {
            label: None,
            header,
            rows,
        }],
        warnings,
    })
}

// ---------------------------------------------------------------------------
// detail-instruction
// ---------------------------------------------------------------------------

fn coord_to_reg_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    use crate::mapping::{gfx11, gfx12, gfx9};
    match inst.arch {
        a if a.is_gfx9() => match matrix {
            Matrix::A | Matrix::B => gfx9::input_reg_eqn(inst, matrix),
            Matrix::C | Matrix::D => gfx9::output_reg_eqn(inst),
            Matrix::K => gfx9::index_eqns(inst).0,
        },
        Architecture::Rdna3 => match matrix {
            Matrix::A | Matrix::B => gfx11::input_reg_eqn(inst),
            _ => gfx11::output_reg_eqn(inst),
        },
        _ => match matrix {
            Matrix::A | Matrix::B => gfx12::input_reg_eqn(inst, matrix),
            Matrix::K => gfx12::index_reg_eqn(),
            _ => gfx12::output_reg_eqn(inst),
        },
    }
}

fn coord_to_lane_eqn(inst: &InstructionDescriptor, matrix: Matrix) -> String {
    use crate::mapping::{gfx11, gfx12, gfx9};
    match inst.arch {
        a if a.is_gfx9() => match matrix {
            Matrix::K => gfx9::index_eqns(inst).1,
            _ => gfx9::lane_eqn(inst, matrix),
        },
        Architecture::Rdna3 => gfx11::lane_eqn(matrix),
        _ => gfx12::lane_eqn(inst, matrix),
    }
}

/// Full descriptor report: static fields plus the zero-modifier mapping
/// formulas, rendered as indented text lines.
pub fn detail(catalog: &Catalog, arch: Architecture, mnemonic: &str) -> Result<QueryReport> {
    use crate::mapping::{gfx11, gfx12, gfx9};

    let inst = resolve(catalog, arch, mnemonic)?;
    let mut lines = Vec::new();

    lines.push(format!("Architecture: {}", inst.arch));
    lines.push(format!("Instruction: {}", inst.mnemonic));
    let encoding = inst.encoding().name();
    lines.push(format!("    Encoding: {encoding}"));
    lines.push(format!("    VOP3P Opcode: {:#02x}", inst.opcode));
    if inst.encoding() == crate::catalog::Encoding::Vop3pMai {
        lines.push(format!("    VOP3P-MAI Opcode: {:#02x}", inst.opcode & 0x3f));
    }

    lines.push("    Matrix Dimensions:".to_string());
    lines.push(format!("        M: {}", inst.m));
    lines.push(format!("        N: {}", inst.n));
    lines.push(format!("        K: {}", inst.k));
    if inst.arch.is_gfx9() {
        lines.push(format!("        blocks: {}", inst.blocks));
    }

    let ops = inst.flops();
    let ops_per_cycle = ops / u64::from(inst.cycles);
    let name = inst.ops_name();
    let mut coexec = inst.coexec;
    let coexec_cycles = inst.cycles as i64 - i64::from(inst.coexec_delay);
    if coexec_cycles <= 0 {
        coexec = false;
    }
    lines.push("    Execution statistics:".to_string());
    lines.push(format!("        {name}: {ops}"));
    lines.push(format!("        Execution cycles: {}", inst.cycles));
    lines.push(format!(
            "        {name}/{}/cycle: {}",
            inst.arch.cu_name(),
            ops_per_cycle * 4
        ));
    lines.push(format!("        Can co-execute with VALU: {coexec}"));
    if coexec {
        lines.push(format!("        VALU co-execution cycles possible: {coexec_cycles}"));
    }

    lines.push("    Register usage:".to_string());
    lines.push(format!(
            "        GPRs required for A: {}",
            mapping::gpr_count(inst, Matrix::A)
        ));
    lines.push(format!(
            "        GPRs required for B: {}",
            mapping::gpr_count(inst, Matrix::B)
        ));
    if !inst.sparse {
        lines.push(format!(
                "        GPRs required for C: {}",
                mapping::gpr_count(inst, Matrix::D)
            ));
    }
    lines.push(format!(
            "        GPRs required for D: {}",
            mapping::gpr_count(inst, Matrix::D)
        ));
    if inst.sparse {
        lines.push("        GPRs required for the compression index: 1".to_string());
    }
    lines.push(format!(
            "        GPR alignment requirement: {} bytes",
            inst.gpr_byte_align
        ));

    lines.push(format!("    {encoding} register encoding:"));
    lines.push("        A matrix source field: Src0".to_string());
    lines.push("        B matrix source field: Src1".to_string());
    if inst.sparse {
        lines.push("        Compression index source field: Src2".to_string());
    } else {
        lines.push("        C matrix source field: Src2".to_string());
    }
    lines.push("        D matrix source field: Vdst".to_string());

    lines.push("    Register data types:".to_string());
    lines.push(format!("        Src0: {}", inst.src0.describe()));
    lines.push(format!("        Src1: {}", inst.src1.describe()));
    lines.push(format!("        Src2: {}", inst.src2_type().describe()));
    lines.push(format!("        Vdst: {}", inst.out.describe()));

    let acc = inst.arch.is_gfx9();
    lines.push("    Register capabilities:".to_string());
    lines.push("        A matrix can use ArchVGPRs: true".to_string());
    lines.push(format!("        A matrix can use AccVGPRs: {acc}"));
    lines.push("        B matrix can use ArchVGPRs: true".to_string());
    lines.push(format!("        B matrix can use AccVGPRs: {acc}"));
    lines.push(format!(
            "        C and D matrix can use ArchVGPRs: {}",
            inst.c_d_arch
        ));
    lines.push(format!("        C and D matrix can use AccVGPRs: {acc}"));

    lines.push("    Register modifiers:".to_string());
    if inst.arch.is_gfx9() {
        match inst.cbsz_abid {
            CbszAbidMode::SparseSlot => lines.push("        CBSZ and ABID bits select the compression index slot".to_string(),
            ),
            mode => lines.push(format!(
                    "        CBSZ and ABID bits supported: {}",
                    mode == CbszAbidMode::Broadcast
                ),
            ),
        }
        match inst.blgp {
            BlgpMode::F64Negate => lines.push("        BLGP acts as a negate mask over A, B, and C".to_string(),
            ),
            mode => lines.push(format!(
                    "        BLGP bits supported: {}",
                    mode == BlgpMode::LaneSwizzle
                ),
            ),
        }
    } else {
        lines.push("        OPSEL[1:0] supported: false".to_string());
        match inst.opsel {
            OpselMode::SparseIndexSet => lines.push("        OPSEL selects the compression index lane set".to_string(),
            ),
            mode => lines.push(format!(
                    "        OPSEL[2] supported: {}",
                    mode == OpselMode::OutputHalf
                ),
            ),
        }
        lines.push(format!(
                "        NEG bits supported: {}",
                inst.neg != NegMode::Unsupported
            ));
        if inst.neg == NegMode::IntegerSignedness {
            lines.push("        NEG[1:0] select signed/unsigned A and B inputs".to_string());
        }
    }

    let block = if inst.arch.is_gfx9() { ".block" } else { "" };
    let cd = if inst.sparse { "D" } else { "C or D" };
    lines.push("    Matrix element to register mapping with no modifiers:".to_string());
    lines.push(format!(
            "        A[i][k]{block} GPR: {}",
            coord_to_reg_eqn(inst, Matrix::A)
        ));
    lines.push(format!(
            "        A[i][k]{block} Lane: {}",
            coord_to_lane_eqn(inst, Matrix::A)
        ));
    lines.push(format!(
            "        B[k][j]{block} GPR: {}",
            coord_to_reg_eqn(inst, Matrix::B)
        ));
    lines.push(format!(
            "        B[k][j]{block} Lane: {}",
            coord_to_lane_eqn(inst, Matrix::B)
        ));
    lines.push(format!(
            "        {cd}[i][j]{block} GPR: {}",
            coord_to_reg_eqn(inst, Matrix::D)
        ));
    lines.push(format!(
            "        {cd}[i][j]{block} Lane: {}",
            coord_to_lane_eqn(inst, Matrix::D)
        ));
    if inst.sparse {
        lines.push(format!("        K[i][k] GPR: {}", coord_to_reg_eqn(inst, Matrix::K)));
        lines.push(format!(
                "        K[i][k] Lane: {}",
                coord_to_lane_eqn(inst, Matrix::K)
            ));
    }

    lines.push("    Register to matrix element mapping with no modifiers:".to_string());
    let print_block = inst.arch.is_gfx9();
    match inst.arch {
        a if a.is_gfx9() => {
            lines.push(format!("        A i: {}", gfx9::inv_i_eqn(inst, Matrix::A)));
            lines.push(format!("        A k: {}", gfx9::inv_k_eqn(inst, Matrix::A)));
            if print_block {
                lines.push(format!("        A block: {}", gfx9::inv_block_eqn(inst, Matrix::A)));
            }
            lines.push(format!("        B j: {}", gfx9::inv_j_eqn(inst)));
            lines.push(format!("        B k: {}", gfx9::inv_k_eqn(inst, Matrix::B)));
            if print_block {
                lines.push(format!("        B block: {}", gfx9::inv_block_eqn(inst, Matrix::B)));
            }
            lines.push(format!("        {cd} i: {}", gfx9::inv_i_eqn(inst, Matrix::D)));
            lines.push(format!("        {cd} j: {}", gfx9::inv_j_eqn(inst)));
            if print_block {
                lines.push(format!(
                        "        {cd} block: {}",
                        gfx9::inv_block_eqn(inst, Matrix::D)
                    ));
            }
            if inst.sparse {
                lines.push(format!("        K i: {}", gfx9::inv_i_eqn(inst, Matrix::K)));
                lines.push(format!("        K k: {}", gfx9::inv_k_eqn(inst, Matrix::K)));
            }
        }
        Architecture::Rdna3 => {
            lines.push(format!("        A i: {}", gfx11::inv_i_eqn(inst, Matrix::A)));
            lines.push(format!("        A k: {}", gfx11::inv_k_eqn(inst)));
            lines.push("        B j: (lane % 16)".to_string());
            lines.push(format!("        B k: {}", gfx11::inv_k_eqn(inst)));
            lines.push(format!("        {cd} i: {}", gfx11::inv_i_eqn(inst, Matrix::D)));
            lines.push(format!("        {cd} j: (lane % 16)"));
        }
        _ => {
            lines.push(format!("        A i: {}", gfx12::inv_i_eqn(inst, Matrix::A)));
            lines.push(format!("        A k: {}", gfx12::inv_k_eqn(inst, Matrix::A)));
            lines.push("        B j: (lane % 16)".to_string());
            lines.push(format!("        B k: {}", gfx12::inv_k_eqn(inst, Matrix::B)));
            lines.push(format!("        {cd} i: {}", gfx12::inv_i_eqn(inst, Matrix::D)));
            lines.push(format!("        {cd} j: (lane % 16)"));
            if inst.sparse {
                lines.push("        K i: (lane % 16)".to_string());
                lines.push("        K k: 4 * floor(GPR_bits / 4)".to_string());
            }
        }
    }

    Ok(QueryReport {
        lines,
        warnings: Vec::new(),
    })
}
