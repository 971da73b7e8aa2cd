use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use actorgen_codegen::CConfig;
use actorgen_core::{ActorModel, CompileError, Repr};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Actor state-table compiler toolchain.
#[derive(Parser)]
#[command(name = "actorgen", version, about = "Actor state-table compiler")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a script into info.h / info.c
    Compile {
        /// Path to the actor definition script
        script: PathBuf,
        /// Output directory (created if missing)
        #[arg(long, default_value = ".")]
        outdir: PathBuf,
    },

    /// Compile a script and print the resolved model as JSON
    Inspect {
        /// Path to the actor definition script
        script: PathBuf,
    },

    /// Parse and resolve a script without writing artifacts
    Check {
        /// Path to the actor definition script
        script: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compile { script, outdir } => {
            cmd_compile(&script, &outdir, cli.output, cli.quiet);
        }
        Commands::Inspect { script } => {
            cmd_inspect(&script, cli.output, cli.quiet);
        }
        Commands::Check { script } => {
            cmd_check(&script, cli.output, cli.quiet);
        }
    }
}

fn compile_or_exit(script: &Path, output: OutputFormat, quiet: bool) -> ActorModel {
    match actorgen_core::compile_file(script) {
        Ok(model) => model,
        Err(e) => {
            report_compile_error(&e, output, quiet);
            process::exit(1);
        }
    }
}

fn cmd_compile(script: &Path, outdir: &Path, output: OutputFormat, quiet: bool) {
    let model = compile_or_exit(script, output, quiet);

    let config = CConfig {
        out_dir: outdir.to_path_buf(),
    };
    let files = match actorgen_codegen::generate_c(&model, &config) {
        Ok(files) => files,
        Err(e) => {
            report_error(&format!("code generation error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "header":       files.header.display().to_string(),
                "tables":       files.tables.display().to_string(),
                "states":       model.states.len(),
                "types":        model.types.len(),
                "sprites":      model.sprites.len(),
                "actions":      model.actions.len() - 1,
                "float_fields": count_repr(&model, Repr::Float),
                "int_fields":   count_ints(&model),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&summary)
                    .unwrap_or_else(|e| format!("serialization error: {}", e))
            );
        }
        OutputFormat::Text => {
            println!("Wrote {}", files.header.display());
            println!("Wrote {}", files.tables.display());
            println!(
                "{} states, {} actor types, {} sprites, {} actions, {} float fields, {} int fields",
                model.states.len(),
                model.types.len(),
                model.sprites.len(),
                model.actions.len() - 1,
                count_repr(&model, Repr::Float),
                count_ints(&model),
            );
        }
    }
}

fn cmd_inspect(script: &Path, output: OutputFormat, quiet: bool) {
    let model = compile_or_exit(script, output, quiet);
    let value = actorgen_core::serialize(&model);
    println!(
        "{}",
        serde_json::to_string_pretty(&value)
            .unwrap_or_else(|e| format!("serialization error: {}", e))
    );
}

fn cmd_check(script: &Path, output: OutputFormat, quiet: bool) {
    let model = compile_or_exit(script, output, quiet);
    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({"ok": true, "states": model.states.len()})
            );
        }
        OutputFormat::Text => {
            println!(
                "ok: {} states, {} actor types",
                model.states.len(),
                model.types.len()
            );
        }
    }
}

/// Sound and flags fields emit as ints alongside the unpromoted numerics.
fn count_ints(model: &ActorModel) -> usize {
    model
        .reprs
        .iter()
        .filter(|r| matches!(r, Repr::Sound | Repr::Flags | Repr::Int))
        .count()
}

fn count_repr(model: &ActorModel, repr: Repr) -> usize {
    model.reprs.iter().filter(|r| **r == repr).count()
}

fn report_compile_error(e: &CompileError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", e);
            }
        }
    }
}

fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            eprintln!(
                "{}",
                serde_json::json!({ "error": msg })
            );
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", msg);
            }
        }
    }
}
