use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use viewforge::discovery::collect_inputs;
use viewforge::{generate, Options};

#[derive(Parser)]
#[command(name = "viewforge")]
#[command(about = "Generate TypeScript DOM views and CSS from HTML components")]
#[command(after_help = "Examples:\n  \
    viewforge Button.html SegmentedControl.html\n  \
    viewforge --package ui --out-views src/ui.ts --out-css public/components.css components")]
struct Cli {
    /// Component files or directories (searched recursively for *.html)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write the generated views to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    out_views: Option<PathBuf>,

    /// Write the generated CSS to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    out_css: Option<PathBuf>,

    /// Namespace for the generated code [default: views]
    #[arg(long, value_name = "NAME")]
    package: Option<String>,

    /// Root directory for absolute paths in <include> elements [default: .]
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// JSON file with options ({"packageName": ..., "rootDirectory": ...})
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log compilation progress
    #[arg(short, long)]
    verbose: bool,
}

fn load_options(cli: &Cli) -> Result<Options> {
    let mut options = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            Options::from_json(&json).with_context(|| format!("parse config {}", path.display()))?
        }
        None => Options::default(),
    };
    if let Some(package) = &cli.package {
        options.package_name = package.clone();
    }
    if let Some(root) = &cli.root {
        options.root_directory = root.clone();
    }
    Ok(options)
}

fn write_output(path: Option<&Path>, contents: &str, what: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("create directory {}", dir.display()))?;
            }
            fs::write(path, contents)
                .with_context(|| format!("write output {} to {}", what, path.display()))?;
        }
        None => {
            io::stdout()
                .write_all(contents.as_bytes())
                .with_context(|| format!("write output {}", what))?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let options = load_options(&cli)?;
    let inputs = collect_inputs(&cli.inputs)?;
    if inputs.is_empty() {
        bail!("no component files found");
    }
    log::info!("compiling {} components", inputs.len());

    let output = generate(&inputs, &options)?;

    write_output(cli.out_views.as_deref(), &output.views, "views")?;
    write_output(cli.out_css.as_deref(), &output.css, "css")?;
    Ok(())
}
