use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Print version information and exit
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Execute the program instead of generating a compiled output
    #[arg(short = 'x', long)]
    execute: bool,

    /// Path of the compiled WebAssembly module
    #[arg(short, long, default_value = "a.wasm")]
    output: PathBuf,

    /// Input files
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    if args.files.is_empty() {
        bail!("missing input files");
    }
    if args.files.len() > 1 {
        bail!("multiple input files not implemented");
    }

    let input = &args.files[0];
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let source_name = input.display().to_string();

    let program = parser::parse(&source, &source_name)?;
    log_program(&program);

    if args.execute {
        let result = interp::execute(&program)?;
        println!("Result from execution: {result}");
        return Ok(());
    }

    let file = fs::File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut out = std::io::BufWriter::new(file);
    let written = wasm::compile(&program, &mut out).and_then(|()| Ok(out.flush()?));
    if let Err(err) = written {
        // an aborted emission leaves a truncated module behind
        drop(out);
        let _ = fs::remove_file(&args.output);
        return Err(err.into());
    }
    Ok(())
}

fn log_program(program: &ast::Program) {
    for (_, ty) in program.types() {
        log::debug!("type: {}", ty.rep);
    }
    for (_, func) in program.functions() {
        log::debug!("function: {}: {}", func.name, program.ty(func.ty).rep);
    }
    if let Some(main) = program.entry_point() {
        log::debug!("main function: {}", program.func(main).name);
    }
}
