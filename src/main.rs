use batchproc::cli::{
    describe_steps, extract_file, read_file, run_demo, write_file, ReadOptions, WriteOptions,
    DEMO_MESSAGE, DEMO_STEPS,
};
use batchproc::{JobConfig, PipelineError, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("BATCHPROC_VERSION");
const BUILD: &str = env!("BATCHPROC_BUILD");
const PROFILE: &str = env!("BATCHPROC_PROFILE");
const GIT_HASH: &str = env!("BATCHPROC_GIT_HASH");

const DEFAULT_DEMO_PATH: &str = "output/my_document.processed";

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "batchproc")]
#[command(author, about = "Process files through a chain of reversible compression and obfuscation steps", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// More log output (-v info, -vv debug traces)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON job file providing default steps and storage path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an input file and store the result
    #[command(alias = "w")]
    Write {
        /// Comma-separated steps, applied first to last (e.g. "zip,encrypt")
        #[arg(long)]
        steps: Option<String>,

        /// Input file to process
        input: PathBuf,

        /// Where to store the processed bytes
        stored: Option<PathBuf>,
    },

    /// Load a stored file and undo its processing
    #[command(alias = "r")]
    Read {
        /// The same steps that were used to write the file
        #[arg(long)]
        steps: Option<String>,

        /// Stored file to read
        stored: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a sample message, read it back and verify the round trip
    #[command(alias = "d")]
    Demo {
        /// Steps to exercise
        #[arg(long)]
        steps: Option<String>,

        /// Where to store the processed message
        #[arg(long)]
        path: Option<PathBuf>,

        /// Message to process instead of the built-in sample
        #[arg(long)]
        message: Option<String>,
    },

    /// Show the chain a step list builds
    #[command(alias = "s")]
    Steps {
        /// Comma-separated step list
        list: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.parse_default_env();
    builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    let _ = builder.try_init();
}

fn required_path(path: Option<PathBuf>, what: &str) -> Result<PathBuf> {
    path.ok_or_else(|| {
        PipelineError::InvalidConfig(format!("no {} path given on the command line or in --config", what))
    })
}

fn run(command: Commands, config: &JobConfig) -> Result<bool> {
    match command {
        Commands::Write { steps, input, stored } => {
            let stored = required_path(config.path_or(stored.as_deref()), "storage")?;
            let options = WriteOptions {
                steps: config.steps_or(steps.as_deref()).to_string(),
            };
            let size = write_file(&input, &stored, &options)?;
            println!("Stored {} bytes to {}", size, stored.display());
            Ok(true)
        }

        Commands::Read { steps, stored, output } => {
            let stored = required_path(config.path_or(stored.as_deref()), "storage")?;
            let options = ReadOptions {
                steps: config.steps_or(steps.as_deref()).to_string(),
            };
            match output {
                Some(output) => {
                    let size = extract_file(&stored, &output, &options)?;
                    println!("Recovered {} bytes to {}", size, output.display());
                }
                None => {
                    let data = read_file(&stored, &options)?;
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&data)?;
                    stdout.flush()?;
                }
            }
            Ok(true)
        }

        Commands::Demo { steps, path, message } => {
            let path = config
                .path_or(path.as_deref())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DEMO_PATH));
            let steps = match steps {
                Some(steps) => steps,
                None if !config.steps.is_empty() => config.steps.clone(),
                None => DEMO_STEPS.to_string(),
            };
            let message = message.unwrap_or_else(|| DEMO_MESSAGE.to_string());

            let report = run_demo(&path, &steps, message.as_bytes())?;
            print!("{}", report);
            Ok(report.succeeded())
        }

        Commands::Steps { list } => {
            print!("{}", describe_steps(&list));
            Ok(true)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<JobConfig> {
    match path {
        Some(path) => JobConfig::load(path),
        None => Ok(JobConfig::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("batchproc {}", get_version());
        return ExitCode::SUCCESS;
    }

    init_logging(cli.verbose);

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = load_config(cli.config.as_deref()).and_then(|config| run(command, &config));

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
