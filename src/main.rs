//! Command-line interface for the matrix instruction calculator.

use clap::{ArgGroup, Parser};
use mmacalc::render::{self, TableFormat};
use mmacalc::{catalog, query, Architecture, CalcError, Matrix, Modifiers};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "mmacalc")]
#[command(disable_version_flag = true)]
#[command(
    about = "Register layout calculator for AMD matrix multiply-accumulate instructions",
    long_about = "Generates information about the register layout for matrix \
multiplication instructions on AMD accelerators: the MFMA instructions of the \
CDNA1, CDNA2, and CDNA3 Instinct architectures, and the WMMA/SWMMAC \
instructions of the RDNA3 and RDNA4 architectures.\n\n\
There are five queries for each matrix multiplication instruction:\n\
- general information about the instruction (--detail-instruction)\n\
- the register and lane for a chosen matrix entry (--get-register)\n\
- the matrix entries for a chosen register and lane (--matrix-entry)\n\
- the registers and lanes for an entire matrix (--register-layout)\n\
- the matrix entries for all registers and lanes (--matrix-layout)"
)]
#[command(group(ArgGroup::new("query").args([
    "detail_instruction",
    "get_register",
    "matrix_entry",
    "register_layout",
    "matrix_layout",
])))]
#[command(group(ArgGroup::new("matrix").args([
    "a_matrix", "b_matrix", "c_matrix", "d_matrix", "compression",
])))]
#[command(group(ArgGroup::new("format").args(["csv", "markdown", "asciidoc"])))]
struct Cli {
    /// Print the version of this tool
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Accelerator architecture or chip to query (e.g. CDNA2, gfx90a, MI250X)
    #[arg(short = 'a', long = "architecture", value_name = "ARCH")]
    architecture: Option<String>,

    /// Instruction mnemonic to query
    #[arg(short = 'i', long = "instruction", value_name = "MNEMONIC")]
    instruction: Option<String>,

    /// Print the available instructions in the chosen architecture
    #[arg(short = 'L', long = "list-instructions")]
    list_instructions: bool,

    /// Print detailed information about the chosen instruction
    #[arg(short = 'd', long = "detail-instruction")]
    detail_instruction: bool,

    /// Print the register and lane for a particular matrix entry
    #[arg(short = 'g', long = "get-register")]
    get_register: bool,

    /// Print the block and I/J/K coordinates held by a register and lane
    #[arg(short = 'm', long = "matrix-entry")]
    matrix_entry: bool,

    /// Print the registers and lanes for the entire chosen matrix
    #[arg(short = 'R', long = "register-layout")]
    register_layout: bool,

    /// Print the matrix entries stored in all registers and lanes
    #[arg(short = 'M', long = "matrix-layout")]
    matrix_layout: bool,

    /// Query the A[] input matrix
    #[arg(short = 'A', long = "A-matrix")]
    a_matrix: bool,

    /// Query the B[] input matrix
    #[arg(short = 'B', long = "B-matrix")]
    b_matrix: bool,

    /// Query the C[] input matrix
    #[arg(short = 'C', long = "C-matrix")]
    c_matrix: bool,

    /// Query the D[] output matrix
    #[arg(short = 'D', long = "D-matrix")]
    d_matrix: bool,

    /// Query the compression-index matrix of a sparse instruction
    #[arg(short = 'k', long = "compression")]
    compression: bool,

    /// Row coordinate for --get-register
    #[arg(short = 'I', long = "I-coordinate", value_name = "N", default_value_t = 0)]
    i_coordinate: u32,

    /// Column coordinate for --get-register
    #[arg(short = 'J', long = "J-coordinate", value_name = "N", default_value_t = 0)]
    j_coordinate: u32,

    /// K coordinate for --get-register
    #[arg(short = 'K', long = "K-coordinate", value_name = "N", default_value_t = 0)]
    k_coordinate: u32,

    /// Block coordinate for --get-register
    #[arg(short = 'b', long = "block", value_name = "N", default_value_t = 0)]
    block: u32,

    /// Register number for --matrix-entry
    #[arg(short = 'r', long = "register", value_name = "N", default_value_t = 0)]
    register: u32,

    /// Wavefront lane for --matrix-entry
    #[arg(short = 'l', long = "lane", value_name = "N", default_value_t = 0)]
    lane: u32,

    /// CBSZ control field (A-matrix block broadcast / sparse index slot)
    #[arg(long, value_name = "N", default_value_t = 0)]
    cbsz: u32,

    /// ABID broadcast field (A-matrix block select / sparse index slot)
    #[arg(long, value_name = "N", default_value_t = 0)]
    abid: u32,

    /// BLGP field (B-matrix lane pattern, or FP64 negate mask)
    #[arg(long, value_name = "N", default_value_t = 0)]
    blgp: u32,

    /// OPSEL field (16-bit output half select, or sparse index set select)
    #[arg(long, value_name = "N", default_value_t = 0)]
    opsel: u32,

    /// NEG field (negate masks, or integer signedness selects)
    #[arg(long, value_name = "N", default_value_t = 0)]
    neg: u32,

    /// NEG_HI field (high-half negate / C absolute value)
    #[arg(long = "neg_hi", value_name = "N", default_value_t = 0)]
    neg_hi: u32,

    /// With the D matrix, also print the inputs that produce each output
    #[arg(short = 'o', long = "output-calculation")]
    output_calc: bool,

    /// Print layouts as CSV instead of a table
    #[arg(short = 'c', long = "csv")]
    csv: bool,

    /// Print layouts as a Markdown table
    #[arg(long)]
    markdown: bool,

    /// Print layouts as an AsciiDoc table
    #[arg(long)]
    asciidoc: bool,

    /// Transpose layout tables
    #[arg(long)]
    transpose: bool,
}

impl Cli {
    fn matrix(&self) -> Option<Matrix> {
        if self.a_matrix {
            Some(Matrix::A)
        } else if self.b_matrix {
            Some(Matrix::B)
        } else if self.c_matrix {
            Some(Matrix::C)
        } else if self.d_matrix {
            Some(Matrix::D)
        } else if self.compression {
            Some(Matrix::K)
        } else {
            None
        }
    }

    fn modifiers(&self) -> Modifiers {
        Modifiers {
            cbsz: self.cbsz,
            abid: self.abid,
            blgp: self.blgp,
            opsel: self.opsel,
            neg: self.neg,
            neg_hi: self.neg_hi,
        }
    }

    fn table_format(&self) -> TableFormat {
        if self.csv {
            TableFormat::Csv
        } else if self.markdown {
            TableFormat::Markdown
        } else if self.asciidoc {
            TableFormat::AsciiDoc
        } else {
            TableFormat::Grid
        }
    }
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}

fn print_arch_inst(arch: Architecture, mnemonic: &str) {
    println!("Architecture: {arch}");
    println!("Instruction: {}", mnemonic.to_uppercase());
}

fn run(cli: &Cli) -> mmacalc::Result<()> {
    let arch_name = cli
        .architecture
        .as_deref()
        .ok_or_else(|| CalcError::bad_usage("the --architecture argument is required"))?;
    let arch = Architecture::resolve(arch_name)?;

    let catalog = catalog();
    catalog.self_check()?;

    if cli.list_instructions {
        println!(
            "Available instructions in the {} architecture:",
            arch.canonical_name()
        );
        for mnemonic in query::list_instructions(catalog, arch) {
            println!("    {mnemonic}");
        }
        return Ok(());
    }

    let mnemonic = cli
        .instruction
        .as_deref()
        .ok_or_else(|| CalcError::bad_usage("the --instruction argument is required"))?;

    if cli.detail_instruction {
        let report = query::detail(catalog, arch, mnemonic)?;
        print_warnings(&report.warnings);
        for line in &report.lines {
            println!("{line}");
        }
        return Ok(());
    }

    let selected =
        [cli.get_register, cli.matrix_entry, cli.register_layout, cli.matrix_layout];
    if selected.iter().filter(|&&x| x).count() != 1 {
        return Err(CalcError::bad_usage(
            "choose one of: --detail-instruction, --get-register, --matrix-entry, \
             --register-layout, --matrix-layout",
        ));
    }

    let matrix = cli.matrix().ok_or_else(|| {
        CalcError::bad_usage(
            "choose one of: --A-matrix, --B-matrix, --C-matrix, --D-matrix, or --compression",
        )
    })?;
    let mods = cli.modifiers();

    print_arch_inst(arch, mnemonic);
    if cli.get_register {
        let report = query::get_register(
            catalog,
            arch,
            mnemonic,
            matrix,
            (
                cli.i_coordinate,
                cli.j_coordinate,
                cli.k_coordinate,
                cli.block,
            ),
            &mods,
            cli.output_calc,
        )?;
        print_warnings(&report.warnings);
        for line in &report.lines {
            println!("{line}");
        }
    } else if cli.matrix_entry {
        let report = query::matrix_entry(
            catalog,
            arch,
            mnemonic,
            matrix,
            cli.register,
            cli.lane,
            &mods,
            cli.output_calc,
        )?;
        print_warnings(&report.warnings);
        for line in &report.lines {
            println!("{line}");
        }
    } else {
        let report = if cli.register_layout {
            query::register_layout(catalog, arch, mnemonic, matrix, &mods, cli.transpose)?
        } else {
            query::matrix_layout(catalog, arch, mnemonic, matrix, &mods)?
        };
        print_warnings(&report.warnings);
        print!(
            "{}",
            render::render_report(&report, cli.table_format(), cli.transpose)
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.version {
        println!("Matrix Instruction Calculator version {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(2)
        }
    }
}
