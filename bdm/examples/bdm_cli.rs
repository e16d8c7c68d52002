use std::path::{Path, PathBuf};
use std::time::Instant;

use bdm::{
    decode_string, encode_string, list_ctm_datasets, parse_boundary, parse_shape,
    string_to_array_with_ndim, Bdm, BdmConfig, CtmDataset, CtmTable, DEFAULT_SEPARATOR,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "BDM CLI - Estimate algorithmic complexity with the Block Decomposition Method")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Approximate the complexity of an array given in canonical string form
    Complexity {
        /// Array such as 0101-1010 (rows separated by '-')
        array: String,

        /// Number of array axes
        #[arg(long, default_value_t = 2)]
        ndim: usize,

        /// Directory with dataset files (<name>.ctm or <name>.json)
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,

        /// Dataset name (defaults to the binary dataset for --ndim)
        #[arg(long)]
        dataset: Option<String>,

        /// Explicit table file, overrides --dataset
        #[arg(long)]
        table: Option<PathBuf>,

        /// Boundary condition: ignore, shift:<n> or shrink:<min_width>
        #[arg(long, default_value = "ignore")]
        boundary: String,

        /// Print every distinct block with its value and multiplicity
        #[arg(long)]
        report: bool,
    },
    /// List the known CTM datasets
    Datasets,
    /// Encode an array string as an integer
    Encode {
        array: String,

        #[arg(long, default_value_t = 2)]
        base: u32,
    },
    /// Decode an integer into an array string
    Decode {
        code: u128,

        /// Shape such as 4x4 or 12
        #[arg(long)]
        shape: String,

        #[arg(long, default_value_t = 2)]
        base: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Complexity {
            array,
            ndim,
            data_dir,
            dataset,
            table,
            boundary,
            report,
        } => {
            let boundary = parse_boundary(&boundary)?;
            let (table, config) = load_table(ndim, &data_dir, dataset.as_deref(), table)?;
            let bdm = Bdm::new(config.with_boundary(boundary), table)?;
            let array = string_to_array_with_ndim(&array, DEFAULT_SEPARATOR, ndim)?;

            let start = Instant::now();
            let value = bdm.complexity(&array)?;
            let elapsed = start.elapsed();

            if report {
                for (key, ctm, n) in bdm.decompose(&array)?.iter() {
                    println!("   {key}: ctm {ctm:.4} x{n}");
                }
            }
            println!("BDM: {value:.4} bits");
            println!("Computed in {:.3}ms", elapsed.as_secs_f64() * 1000.0);
        }
        Commands::Datasets => {
            println!("Known CTM datasets:");
            for dataset in list_ctm_datasets() {
                println!(
                    "   {} (base {}, {}D, width {})",
                    dataset, dataset.base, dataset.ndim, dataset.width
                );
            }
        }
        Commands::Encode { array, base } => {
            println!("{}", encode_string(&array, DEFAULT_SEPARATOR, base)?);
        }
        Commands::Decode { code, shape, base } => {
            let shape = parse_shape(&shape)?;
            println!("{}", decode_string(code, &shape, DEFAULT_SEPARATOR, base)?);
        }
    }

    Ok(())
}

fn load_table(
    ndim: usize,
    data_dir: &Path,
    dataset: Option<&str>,
    table: Option<PathBuf>,
) -> Result<(CtmTable, BdmConfig), Box<dyn std::error::Error>> {
    if let Some(path) = table {
        let table = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => CtmTable::read_json(&path)?,
            _ => CtmTable::read_binary(&path)?,
        };
        let width = table.max_width().ok_or("table has no entries")?;
        let config = BdmConfig::new(table.ndim(), width).with_base(table.base());
        return Ok((table, config));
    }

    let dataset = match dataset {
        Some(name) => CtmDataset::find(name).ok_or_else(|| format!("unknown dataset {name}"))?,
        None => CtmDataset::for_ndim(ndim).ok_or_else(|| format!("no dataset for {ndim}D arrays"))?,
    };
    Ok((dataset.load_from_dir(data_dir)?, dataset.config()))
}
