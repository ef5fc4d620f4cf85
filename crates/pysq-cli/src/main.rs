use clap::{Parser, Subcommand};
use miette::Result;
use std::io;
use std::path::PathBuf;

use pysq_cli::cli;
use pysq_runtime::OverwritePolicy;

#[derive(Parser)]
#[command(name = "pysq")]
#[command(about = "Compile and run py-squared programs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// Input source file
        input: PathBuf,
    },

    /// Print the checked syntax tree of a source file
    Ast {
        /// Input source file
        input: PathBuf,
    },

    /// Compile a source file to C
    EmitC {
        /// Input source file
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interpret a source file against an in-process variable table
    Run {
        /// Input source file
        input: PathBuf,

        /// Number of table slots
        #[arg(long)]
        capacity: Option<usize>,

        /// What re-creating a live slot does (reject, replace)
        #[arg(long, default_value = "reject", value_parser = parse_overwrite)]
        overwrite: OverwritePolicy,

        /// Cap on bytes held by the table at once
        #[arg(long)]
        memory_limit: Option<usize>,
    },
}

fn parse_overwrite(name: &str) -> std::result::Result<OverwritePolicy, String> {
    OverwritePolicy::from_name(name)
        .ok_or_else(|| format!("unknown policy `{name}` (expected `reject` or `replace`)"))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Tokens { input } => cli::tokens::tokens(&input, &mut out)?,
        Commands::Ast { input } => cli::ast::ast(&input, &mut out)?,
        Commands::EmitC { input, output } => {
            cli::emit::emit_c_file(&input, output.as_deref(), &mut out)?
        }
        Commands::Run {
            input,
            capacity,
            overwrite,
            memory_limit,
        } => {
            let args = cli::run::RunArgs {
                capacity,
                overwrite,
                memory_limit,
            };
            let code = cli::run::run(&input, &args, &mut out)?;
            drop(out);
            if code != 0 {
                std::process::exit(code);
            }
        }
    }
    Ok(())
}
