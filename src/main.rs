use clap::{CommandFactory, Parser};
use pubsubschema_gen::config::{self, ConfigError, Overrides};
use pubsubschema_gen::{generate, output};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "pubsubschema-gen")]
#[command(about = "Generate PubSubSchema manifests and a kustomization from *.pubsub.proto files")]
#[command(long_about = "\
Generate PubSubSchema manifests and a kustomization from *.pubsub.proto files

Every matching input becomes <name>.schema.yaml in the output directory, where
<name> is the filename minus .pubsub.proto, lowercased, with '.' and '_'
turned into '-':

  coreapp.test.v1.TestEvent.pubsub.proto → coreapp-test-v1-testevent.schema.yaml

All existing *.schema.yaml files in the output directory are deleted first.
kustomization.yaml, listing every generated manifest, is written last.

Run 'pubsubschema-gen --print-config' for a documented config file.")]
#[command(version = env!("PUBSUBSCHEMA_GEN_VERSION"))]
struct Cli {
    /// Directory containing `*.pubsub.proto` files [default: gen/proto/infra/pubsub]
    #[arg(long, value_name = "DIR")]
    pubsub_dir: Option<PathBuf>,

    /// Glob pattern within --pubsub-dir to match pubsub proto files [default: *.pubsub.proto]
    #[arg(long, value_name = "GLOB")]
    glob: Option<String>,

    /// Directory to write generated schema YAMLs into (required unless set in --config)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// TOML config file; command-line flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail if two inputs derive the same schema name instead of overwriting
    #[arg(long)]
    deny_duplicates: bool,

    /// Print a documented config file with all defaults and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Enable trace logging (more detailed than --verbose)
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version come through here too
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = err.print();
            return code;
        }
    };

    init_tracing(&cli);

    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            if matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::MissingOutputDir)
            ) {
                eprintln!();
                eprintln!("{}", Cli::command().render_help());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::load_config(cli.config.as_deref())?
        .apply_overrides(Overrides {
            pubsub_dir: cli.pubsub_dir,
            glob: cli.glob,
            output_dir: cli.output_dir,
            deny_duplicates: cli.deny_duplicates,
        })
        .into_settings()?;
    debug!(?settings, "resolved settings");

    let report = generate::generate(&settings, output::print_written)?;
    output::print_summary(&report);
    Ok(())
}

/// Logs go to stderr so stdout carries only progress lines.
///
/// `PUBSUBSCHEMA_GEN_LOG` takes precedence over `--verbose` / `--trace`.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PUBSUBSCHEMA_GEN_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
