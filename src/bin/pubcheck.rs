use pubcheck::config::Config;
use pubcheck::context::StandardContext;
use pubcheck::report::OutputFormat;
use pubcheck::runner;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const TOKEN_ENV_VAR: &str = "PUBCHECK_TOKEN";

// Exit statuses: 0 clean, 1 blocking content issues, 2 operational
// failure (auth/transport/protocol/integrity/config), so CI can tell
// "checker broke" apart from "content has issues".
#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let mut root: Option<PathBuf> = None;
    let mut format = OutputFormat::Text;
    let mut out_file: Option<PathBuf> = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" | "help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "--root" | "-r" => {
                i += 1;
                match args.get(i) {
                    Some(value) => root = Some(PathBuf::from(value)),
                    None => return usage_error("--root requires a path"),
                }
            }
            "--output" | "-o" => {
                i += 1;
                match args.get(i).map(|value| value.parse()) {
                    Some(Ok(parsed)) => format = parsed,
                    _ => return usage_error("--output requires 'text' or 'json'"),
                }
            }
            "--file" | "-f" => {
                i += 1;
                match args.get(i) {
                    Some(value) => out_file = Some(PathBuf::from(value)),
                    None => return usage_error("--file requires a path"),
                }
            }
            "--verbose" | "-v" => verbose = true,
            other => return usage_error(&format!("unknown argument '{}'", other)),
        }
        i += 1;
    }

    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let ctx = StandardContext::new(root);
    let config = match Config::load(&ctx) {
        Ok(config) => config,
        Err(e) => {
            if Config::is_missing_config_error(&e) {
                let path =
                    Config::get_path_string(&ctx).unwrap_or_else(|_| "<unknown>".to_string());
                eprintln!(
                    "pubcheck: no configuration found; create {} with api_url and articles_dir",
                    path
                );
            } else {
                eprintln!("pubcheck: {:#}", e);
            }
            return ExitCode::from(2);
        }
    };

    let token = match env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => token,
        _ => {
            eprintln!(
                "pubcheck: set the {} environment variable to an access token",
                TOKEN_ENV_VAR
            );
            return ExitCode::from(2);
        }
    };

    match runner::run_check(&config, &token, format).await {
        Err(e) => {
            eprintln!("pubcheck: {:#}", e);
            ExitCode::from(2)
        }
        Ok(outcome) => {
            if let Some(path) = out_file {
                if let Err(e) = std::fs::write(&path, &outcome.report) {
                    eprintln!(
                        "pubcheck: failed to write report to '{}': {}",
                        path.display(),
                        e
                    );
                    return ExitCode::from(2);
                }
            } else {
                print!("{}", outcome.report);
            }
            if outcome.blocking {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn usage_error(message: &str) -> ExitCode {
    eprintln!("pubcheck: {}", message);
    eprintln!("Run 'pubcheck --help' for usage.");
    ExitCode::from(2)
}

fn print_help() {
    println!(
        "Pubcheck v{} - Reconciles local article drafts against a remote publishing service",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    pubcheck [--root <path>] [--output text|json] [--file <path>]");
    println!("    pubcheck --help");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for configuration.");
    println!("    -o, --output <fmt>    Report format: 'text' (default) or 'json'.");
    println!("    -f, --file <path>     Write the report to a file instead of stdout.");
    println!("    -v, --verbose         Log each catalog page fetch.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXIT STATUS:");
    println!("    0    No blocking issues.");
    println!("    1    Blocking content issues found (invalid/orphaned articles,");
    println!("         plus drifted/new ones depending on configuration).");
    println!("    2    Operational failure: auth, transport, protocol, catalog");
    println!("         integrity, or configuration error.");
    println!();
    println!("CONFIGURATION:");
    println!("    Reads config.toml from the platform config directory (or");
    println!("    <root>/config with --root). Recognized keys: api_url,");
    println!("    articles_dir, request_timeout_secs, block_drifted, block_new.");
    println!();
    println!(
        "    Set the {} environment variable to the access token",
        TOKEN_ENV_VAR
    );
    println!("    before running.");
}
