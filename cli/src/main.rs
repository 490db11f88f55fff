use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use restruct::{convert_batch, convert_single, dump_to_json, merge_declarations};
use restruct_compiler::{Pipeline, RenderOptions, RestructError};

#[derive(Parser)]
#[command(name = "restruct")]
#[command(about = "Reshape C struct initializers from a full layout into a view layout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Inputs shared by every subcommand.
#[derive(Args, Clone, Debug)]
struct SchemaArgs {
    /// Header with the full `typedef struct` declarations
    #[arg(long, env = "RESTRUCT_HEADER")]
    header: PathBuf,

    /// Header with the view structs
    #[arg(long, env = "RESTRUCT_VIEW_FILE")]
    view_file: PathBuf,

    /// Name of the full struct (e.g. `unit`)
    #[arg(long = "struct")]
    struct_name: String,

    /// Name of the view struct to emit
    #[arg(long)]
    target_view: String,

    /// Optional `path: name` mapping file
    #[arg(long, env = "RESTRUCT_MAPPING_FILE")]
    mapping_file: Option<PathBuf>,
}

/// How converted declarations are written.
#[derive(Args, Clone, Debug)]
struct RenderArgs {
    /// Specifier placed after the declarator (e.g. `PROGMEM`)
    #[arg(long, default_value = "", env = "RESTRUCT_SPECIFIER")]
    specifier: String,

    /// Type name to emit instead of the view struct name
    #[arg(long)]
    emit_type: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the first declaration of the full struct found in `--init-file`
    Convert {
        #[command(flatten)]
        schema: SchemaArgs,

        #[command(flatten)]
        render: RenderArgs,

        /// File containing the initializer declaration
        #[arg(long)]
        init_file: PathBuf,

        /// Rename the emitted variable
        #[arg(long)]
        var_name: Option<String>,

        /// Output file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert every declaration in `--init-file` and merge them into `--output`
    Batch {
        #[command(flatten)]
        schema: SchemaArgs,

        #[command(flatten)]
        render: RenderArgs,

        /// File containing the initializer declarations
        #[arg(long)]
        init_file: PathBuf,

        /// Header to update (created when missing)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the parsed schema, view tree, mapping and flattened names as JSON
    Inspect {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Also show the field map of the first instance in this file
        #[arg(long)]
        init_file: Option<PathBuf>,
    },
}

fn load_pipeline(args: &SchemaArgs) -> Result<Pipeline, RestructError> {
    let header = fs::read_to_string(&args.header)?;
    let view_header = fs::read_to_string(&args.view_file)?;
    let mapping = args.mapping_file.as_ref().map(fs::read_to_string).transpose()?;

    Pipeline::compile(
        &header,
        &args.struct_name,
        &view_header,
        &args.target_view,
        mapping.as_deref(),
    )
}

fn render_options(args: &RenderArgs) -> RenderOptions {
    RenderOptions {
        type_name: args.emit_type.clone(),
        trailing_specifier: Some(args.specifier.clone()).filter(|s| !s.is_empty()),
        ..RenderOptions::default()
    }
}

fn read_existing(path: &Path) -> Result<String, RestructError> {
    if path.exists() {
        Ok(fs::read_to_string(path)?)
    } else {
        Ok(String::new())
    }
}

fn run(cli: Cli) -> Result<(), RestructError> {
    match cli.command {
        Commands::Convert { schema, render, init_file, var_name, output } => {
            let pipeline = load_pipeline(&schema)?;
            let init_text = fs::read_to_string(&init_file)?;
            let options = RenderOptions { var_name, ..render_options(&render) };

            let declaration = convert_single(&pipeline, &init_text, &options)?;
            if let Some(out_path) = output {
                fs::write(&out_path, format!("{}\n", declaration))?;
                tracing::info!(output = %out_path.display(), "declaration written");
            } else {
                println!("{}", declaration);
            }
            Ok(())
        }

        Commands::Batch { schema, render, init_file, output } => {
            let pipeline = load_pipeline(&schema)?;
            let init_text = fs::read_to_string(&init_file)?;
            let options = RenderOptions { force_const: true, ..render_options(&render) };

            let declarations = convert_batch(&pipeline, &init_text, &options)?;
            let existing = read_existing(&output)?;
            fs::write(&output, merge_declarations(&existing, &declarations))?;
            tracing::info!(
                output = %output.display(),
                declarations = declarations.len(),
                "output file updated"
            );
            Ok(())
        }

        Commands::Inspect { schema, init_file } => {
            let pipeline = load_pipeline(&schema)?;
            let init_text = init_file.as_ref().map(fs::read_to_string).transpose()?;
            println!("{}", dump_to_json(&pipeline, init_text.as_deref())?);
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
