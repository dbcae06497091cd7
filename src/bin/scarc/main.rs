//! # scarc
//!
//! This binary is the compiler of Scar. It combines the parser, module
//! loader, resolver, and C emitter into a single application.
extern crate scarc;

mod cli;

use cli::*;

use std::error::Error;
use std::process::Command;

use log::{error, info};
use scarc::pipeline;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    match args.command {
        Commands::Build(build_args) => build(build_args),
        Commands::Check(check_args) => check(check_args),
    }
}

fn build(args: BuildArgs) -> Result<(), Box<dyn Error>> {
    let output = match pipeline::compile_file(&args.file) {
        Ok(output) => output,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    if args.dump_cleaned {
        info!("Cleaned source:\n{}", output.cleaned);
    }
    if args.dump_parsed {
        info!("Parsed program:\n{:#?}", output.program);
    }

    let c_path = args.file.with_extension("c");
    std::fs::write(&c_path, &output.c_source)?;
    info!("wrote {}", c_path.display());

    if args.emit_c_only {
        return Ok(());
    }

    let binary_path = args.output.unwrap_or_else(|| args.file.with_extension(""));
    compile_c(&c_path, &binary_path)?;
    info!("wrote {}", binary_path.display());

    Ok(())
}

fn check(args: CheckArgs) -> Result<(), Box<dyn Error>> {
    match pipeline::check_file(&args.file) {
        Ok(_) => {
            info!("{} checks out", args.file.display());
            Ok(())
        }
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
}

/// Shell out to `clang`, falling back to `gcc` if `clang` isn't on
/// `PATH` (§A.2); the external toolchain is a boundary concern, never
/// invoked by library code.
fn compile_c(c_path: &std::path::Path, binary_path: &std::path::Path) -> Result<(), Box<dyn Error>> {
    for compiler in ["clang", "gcc"] {
        if which(compiler).is_none() {
            continue;
        }
        let status = Command::new(compiler)
            .arg(c_path)
            .arg("-o")
            .arg(binary_path)
            .arg("-fopenmp")
            .arg("-lm")
            .status()?;
        if !status.success() {
            return Err(format!("{compiler} exited with status {status}").into());
        }
        return Ok(());
    }
    Err("neither 'clang' nor 'gcc' was found on PATH".into())
}

fn which(program: &str) -> Option<std::path::PathBuf> {
    std::env::var_os("PATH").and_then(|paths| {
        std::env::split_paths(&paths).find_map(|dir| {
            let candidate = dir.join(program);
            candidate.is_file().then_some(candidate)
        })
    })
}
