use cli_compiler::config::RuntimeConfig;
use cli_compiler::pipeline::{CompilationSession, PipelineError};
use cli_compiler::traversal::render_outline;
use cli_compiler::{log_info, logging};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Default)]
struct Options {
    include_paths: Vec<PathBuf>,
    config: Option<PathBuf>,
    dump: bool,
    log_json: bool,
    files: Vec<PathBuf>,
}

enum Command {
    Compile(Options),
    Help,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cli-compiler");

    let options = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(Command::Compile(options)) => options,
        Ok(Command::Help) => {
            print_help(program);
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Usage: {} [-I <dir>]... [--config <file>] [--dump] [--log-json] <file.cli>...", program);
            return ExitCode::from(2);
        }
    };

    let config = match &options.config {
        Some(path) => match RuntimeConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {}", err);
                return ExitCode::from(2);
            }
        },
        None => RuntimeConfig::default(),
    };

    init_logging(&config, options.log_json);

    let mut session = CompilationSession::from_config(&config);
    for dir in &options.include_paths {
        session = session.with_include_path(dir.clone());
    }

    let mut failed = 0usize;

    for file in &options.files {
        match session.compile_file(file) {
            Ok(result) => {
                if options.dump {
                    for unit in result.graph.units() {
                        match render_outline(&result.graph, unit) {
                            Ok(text) => print!("{}", text),
                            Err(err) => eprintln!("{}: error: {}", file.display(), err),
                        }
                    }
                }
            }
            // Diagnostics were already printed as they were found.
            Err(PipelineError::InvalidInput { .. }) => failed += 1,
            Err(err) => {
                eprintln!("{}: error: {}", file.display(), err);
                failed += 1;
            }
        }
    }

    log_info!("Compilation finished",
        "files" => options.files.len(),
        "failed" => failed
    );

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(config: &RuntimeConfig, log_json: bool) {
    let mut preferences = config.logging.clone();
    if log_json {
        preferences.use_structured_logging = true;
    }

    if let Err(err) = logging::config::init_runtime_preferences(preferences) {
        eprintln!("warning: {}", err);
    }
    if let Err(err) = logging::init_global_logging() {
        eprintln!("warning: {}", err);
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--dump" => options.dump = true,
            "--log-json" => options.log_json = true,
            "-I" => {
                let dir = iter.next().ok_or("-I requires a directory")?;
                options.include_paths.push(PathBuf::from(dir));
            }
            "--config" => {
                let path = iter.next().ok_or("--config requires a file")?;
                options.config = Some(PathBuf::from(path));
            }
            other if other.starts_with("-I") => {
                options.include_paths.push(PathBuf::from(&other[2..]));
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option '{}'", other));
            }
            file => options.files.push(PathBuf::from(file)),
        }
    }

    if options.files.is_empty() {
        return Err("no input files".to_string());
    }

    Ok(Command::Compile(options))
}

fn print_help(program: &str) {
    println!("CLI option specification compiler v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("    {} [options] <file.cli>...", program);
    println!();
    println!("OPTIONS:");
    println!("    -I <dir>            Add a directory to the <...> include search list");
    println!("    --config <file>     Load runtime preferences from a TOML file");
    println!("    --dump              Print an outline of every parsed unit");
    println!("    --log-json          Emit structured JSON log events");
    println!("    -h, --help          Show this help message");
    println!();
    println!("Exits with status 1 if any file contains errors.");
}
