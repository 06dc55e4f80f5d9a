//! End-to-end query scenarios and modifier laws, driven through the library
//! API with exact expected output strings.

use mmacalc::render::{render_report, TableFormat};
use mmacalc::{catalog, query, Architecture, Matrix, Modifiers};

fn mods() -> Modifiers {
    Modifiers::default()
}

// ===========================================================================
// End-to-end scenarios
// ===========================================================================

#[test]
fn detail_of_cdna2_4x4x1f32() {
    let report = query::detail(catalog(), Architecture::Cdna2, "V_MFMA_F32_4X4X1F32").unwrap();
    let text = report.lines.join("\n");
    assert!(text.contains("Encoding: VOP3P-MAI"));
    assert!(text.contains("VOP3P Opcode: 0x42"));
    assert!(text.contains("VOP3P-MAI Opcode: 0x2"));
    assert!(text.contains("M: 4"));
    assert!(text.contains("N: 4"));
    assert!(text.contains("K: 1"));
    assert!(text.contains("blocks: 16"));
    assert!(text.contains("FLOPs: 512"));
    assert!(text.contains("Execution cycles: 8"));
    assert!(text.contains("GPRs required for A: 1"));
    assert!(text.contains("GPRs required for B: 1"));
    assert!(text.contains("GPRs required for C: 4"));
    assert!(text.contains("GPRs required for D: 4"));
    assert!(text.contains("GPR alignment requirement: 8 bytes"));
}

#[test]
fn get_register_of_packed_f16_input() {
    let report = query::get_register(
        catalog(),
        Architecture::Cdna2,
        "V_MFMA_F32_4X4X4F16",
        Matrix::A,
        (1, 0, 2, 4),
        &mods(),
        false,
    )
    .unwrap();
    assert_eq!(report.lines, vec!["A[1][2].B4 = v1{17}.[15:0]"]);
}

#[test]
fn matrix_entry_returns_both_packed_halves() {
    let report = query::matrix_entry(
        catalog(),
        Architecture::Cdna2,
        "V_MFMA_F32_4X4X4F16",
        Matrix::A,
        1,
        17,
        &mods(),
        false,
    )
    .unwrap();
    assert_eq!(
        report.lines,
        vec![
            "v1{17}.[15:0] = A[1][2].B4",
            "v1{17}.[31:16] = A[1][3].B4"
        ]
    );
}

#[test]
fn output_calculation_expands_to_sum_of_products() {
    let report = query::get_register(
        catalog(),
        Architecture::Cdna2,
        "V_MFMA_F32_4X4X4F16",
        Matrix::D,
        (3, 2, 0, 1),
        &mods(),
        true,
    )
    .unwrap();
    assert_eq!(
        report.lines,
        vec![
            "D[3][2].B1 = Vdst_v3{6} = \
             Src0_v0{7}.[15:0]·Src1_v0{6}.[15:0] + \
             Src0_v0{7}.[31:16]·Src1_v0{6}.[31:16] + \
             Src0_v1{7}.[15:0]·Src1_v1{6}.[15:0] + \
             Src0_v1{7}.[31:16]·Src1_v1{6}.[31:16] + \
             Src2_v3{6}"
        ]
    );
}

#[test]
fn cbsz_broadcast_collapses_blocks_in_register_layout() {
    let broadcast = Modifiers {
        cbsz: 2,
        abid: 2,
        ..Modifiers::default()
    };
    let report = query::register_layout(
        catalog(),
        Architecture::Cdna2,
        "V_MFMA_F32_16X16X2BF16",
        Matrix::A,
        &broadcast,
        false,
    )
    .unwrap();
    // All four blocks collapse into one table.
    assert_eq!(report.blocks.len(), 1);
    assert_eq!(report.blocks[0].label.as_deref(), Some("Blocks 0, 1, 2, 3"));
    // Every cell carries GPR 0 and a lane in [32, 48): ABID selected block 2.
    for (r, row) in report.blocks[0].rows.iter().enumerate() {
        for cell in &row[1..] {
            for entry in cell {
                assert!(entry.starts_with("v0"), "unexpected register in {entry}");
                assert!(
                    entry.contains(&format!("{{{}}}", 32 + r)),
                    "lane of {entry} outside the broadcast block"
                );
            }
        }
    }
}

#[test]
fn fp64_blgp_negates_without_lane_remap() {
    let negate_b = Modifiers {
        blgp: 6,
        ..Modifiers::default()
    };
    let negated = query::matrix_layout(
        catalog(),
        Architecture::Cdna3,
        "V_MFMA_F64_16X16X4_F64",
        Matrix::B,
        &negate_b,
    )
    .unwrap();
    let plain = query::matrix_layout(
        catalog(),
        Architecture::Cdna3,
        "V_MFMA_F64_16X16X4_F64",
        Matrix::B,
        &mods(),
    )
    .unwrap();
    let nb = &negated.blocks[0];
    let pb = &plain.blocks[0];
    assert_eq!(nb.rows.len(), pb.rows.len());
    for (nrow, prow) in nb.rows.iter().zip(&pb.rows) {
        // Lane labels are identical: the negate mask does not move lanes.
        assert_eq!(nrow[0], prow[0]);
        for (ncell, pcell) in nrow[1..].iter().zip(&prow[1..]) {
            for (nentry, pentry) in ncell.iter().zip(pcell) {
                assert_eq!(nentry, &format!("-{pentry}"));
            }
        }
    }
}

#[test]
fn sparse_index_slot_with_opsel_on_rdna4() {
    let opsel1 = Modifiers {
        opsel: 1,
        ..Modifiers::default()
    };
    let report = query::get_register(
        catalog(),
        Architecture::Rdna4,
        "V_SWMMAC_F32_16X16X32_F16",
        Matrix::K,
        (2, 0, 31, 0),
        &opsel1,
        false,
    )
    .unwrap();
    assert_eq!(report.lines, vec!["K[2][31] = v0{18}.[31:28]"]);
}

#[test]
fn sparse_index_slot_with_abid_on_cdna3() {
    let abid1 = Modifiers {
        abid: 1,
        ..Modifiers::default()
    };
    let report = query::get_register(
        catalog(),
        Architecture::Cdna3,
        "V_SMFMAC_F32_16X16X32_F16",
        Matrix::K,
        (2, 0, 5, 0),
        &abid1,
        false,
    )
    .unwrap();
    assert_eq!(report.lines, vec!["K[2][5] = v0{2}.[15:12]"]);
}

// ===========================================================================
// Modifier laws
// ===========================================================================

#[test]
fn cbsz_zero_abid_zero_is_identity() {
    let c = catalog();
    for inst in c.instructions(Architecture::Cdna2) {
        let zeroed = Modifiers::default();
        for block in 0..inst.blocks {
            let base =
                mmacalc::mapping::locate(inst, Matrix::A, 0, 0, 0, block, &zeroed).unwrap();
            let explicit = mmacalc::mapping::locate(
                inst,
                Matrix::A,
                0,
                0,
                0,
                block,
                &Modifiers {
                    cbsz: 0,
                    abid: 0,
                    ..Modifiers::default()
                },
            )
            .unwrap();
            assert_eq!(base.reg, explicit.reg);
            assert_eq!(base.lanes, explicit.lanes);
        }
    }
}

#[test]
fn full_cbsz_broadcast_maps_every_block_to_abid() {
    let c = catalog();
    let inst = c
        .get(Architecture::Cdna2, "V_MFMA_F32_16X16X1F32")
        .unwrap();
    let full = Modifiers {
        cbsz: 2,
        abid: 1,
        ..Modifiers::default()
    };
    for block in 0..inst.blocks {
        for i in 0..inst.m {
            let broadcast =
                mmacalc::mapping::locate(inst, Matrix::A, i, 0, 0, block, &full).unwrap();
            let direct =
                mmacalc::mapping::locate(inst, Matrix::A, i, 0, 0, 1, &mods()).unwrap();
            assert_eq!(broadcast.reg, direct.reg);
            assert_eq!(broadcast.lanes, direct.lanes);
        }
    }
}

#[test]
fn blgp_zero_is_identity_and_blgp_one_mirrors_half_waves() {
    let c = catalog();
    let name = "V_MFMA_F32_4X4X4F16";
    let plain = query::matrix_entry(
        c,
        Architecture::Cdna2,
        name,
        Matrix::B,
        0,
        8,
        &mods(),
        false,
    )
    .unwrap();
    let low_broadcast = Modifiers {
        blgp: 1,
        ..Modifiers::default()
    };
    // Lane 40 under BLGP=1 reads lane 8's storage.
    let mirrored = query::matrix_entry(
        c,
        Architecture::Cdna2,
        name,
        Matrix::B,
        0,
        40,
        &low_broadcast,
        false,
    )
    .unwrap();
    for line in &plain.lines {
        assert!(
            mirrored.lines.contains(line),
            "{line} missing from BLGP=1 mirror"
        );
    }
}

#[test]
fn opsel_high_half_shifts_bit_ranges() {
    let c = catalog();
    let inst = c.get(Architecture::Rdna3, "V_WMMA_F16_16X16X16_F16").unwrap();
    let high = Modifiers {
        opsel: 4,
        ..Modifiers::default()
    };
    for i in 0..inst.m {
        let lo = mmacalc::mapping::locate(inst, Matrix::D, i, 3, 0, 0, &mods()).unwrap();
        let hi = mmacalc::mapping::locate(inst, Matrix::D, i, 3, 0, 0, &high).unwrap();
        assert_eq!(lo.lanes, hi.lanes);
        assert_eq!(lo.reg.gpr_lo, hi.reg.gpr_lo);
        assert_eq!(lo.reg.bits, Some((0, 15)));
        assert_eq!(hi.reg.bits, Some((16, 31)));
    }
}

#[test]
fn neg_with_neg_hi_on_c_is_negated_absolute() {
    let both = Modifiers {
        neg: 4,
        neg_hi: 4,
        ..Modifiers::default()
    };
    let report = query::matrix_entry(
        catalog(),
        Architecture::Rdna3,
        "V_WMMA_F32_16X16X16_F16",
        Matrix::C,
        0,
        0,
        &both,
        false,
    )
    .unwrap();
    assert_eq!(report.lines, vec!["v0{0} = -|C[0][0]|"]);
}

#[test]
fn integer_neg_does_not_change_the_mapping() {
    let c = catalog();
    let signed = Modifiers {
        neg: 3,
        ..Modifiers::default()
    };
    let with = query::get_register(
        c,
        Architecture::Rdna3,
        "V_WMMA_I32_16X16X16_IU8",
        Matrix::A,
        (3, 0, 7, 0),
        &signed,
        false,
    )
    .unwrap();
    let without = query::get_register(
        c,
        Architecture::Rdna3,
        "V_WMMA_I32_16X16X16_IU8",
        Matrix::A,
        (3, 0, 7, 0),
        &mods(),
        false,
    )
    .unwrap();
    assert_eq!(with.lines, without.lines);
    assert!(!with.warnings.is_empty());
}

// ===========================================================================
// Layout rendering
// ===========================================================================

#[test]
fn register_layout_renders_blocks_as_tables() {
    let report = query::register_layout(
        catalog(),
        Architecture::Cdna2,
        "V_MFMA_F32_4X4X1F32",
        Matrix::D,
        &mods(),
        false,
    )
    .unwrap();
    assert_eq!(report.blocks.len(), 16);
    let text = render_report(&report, TableFormat::Grid, false);
    assert!(text.contains("Block 0"));
    assert!(text.contains("Block 15"));
    assert!(text.contains("D[M][N]"));
    assert!(text.contains("v0{0}"));
}

#[test]
fn rdna3_inputs_are_duplicated_across_half_waves() {
    let report = query::get_register(
        catalog(),
        Architecture::Rdna3,
        "V_WMMA_F32_16X16X16_F16",
        Matrix::A,
        (3, 0, 5, 0),
        &mods(),
        false,
    )
    .unwrap();
    assert_eq!(
        report.lines,
        vec![
            "A[3][5] = v2{3}.[31:16]",
            "A[3][5] = v2{19}.[31:16]"
        ]
    );
}

#[test]
fn wave32_csv_layout_is_stable() {
    let report = query::matrix_layout(
        catalog(),
        Architecture::Rdna3,
        "V_WMMA_F32_16X16X16_F16",
        Matrix::D,
        &mods(),
    )
    .unwrap();
    let text = render_report(&report, TableFormat::Csv, false);
    let lines: Vec<&str> = text.trim_end().lines().collect();
    assert_eq!(lines[0], "lane,v0,v1,v2,v3,v4,v5,v6,v7");
    assert_eq!(lines.len(), 33);
    assert!(lines[1].starts_with("0,D[0][0]"));
}

#[test]
fn sparse_matrix_entry_reports_unused_index_lane() {
    // With OPSEL=0 the index only occupies lanes 0-15.
    let report = query::matrix_entry(
        catalog(),
        Architecture::Rdna4,
        "V_SWMMAC_F32_16X16X32_F16",
        Matrix::K,
        0,
        20,
        &mods(),
        false,
    )
    .unwrap();
    assert_eq!(report.lines.len(), 1);
    assert!(report.lines[0].contains("lane 20 is not used"));
}
