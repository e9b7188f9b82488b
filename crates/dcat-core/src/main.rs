//! dcat - Dirichlet-categorical scoring and sampling from the command line
//!
//! Reads categorical observations, builds a collapsed model under a
//! symmetric Dirichlet prior, and reports:
//! - per-category counts and posterior-predictive log-probabilities
//! - the log marginal likelihood of the observations
//! - posterior-predictive draws

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dcat_config::{load_prior, require_categories, PriorConfig, ResolvedPrior};
use dcat_core::error::{Error, ModelError, Result};
use dcat_core::exit_codes::ExitCode;
use dcat_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use dcat_core::observations::{incorporate_all, parse_observations};
use dcat_core::output::{OutputFormat, PriorReport, SampleReport, ScoreReport};
use dcat_core::DirichletCategorical;
use dcat_math::dirichlet::{valid_concentration, valid_symmetric_prior};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Collapsed Dirichlet-categorical model toolkit
#[derive(Parser)]
#[command(name = "dcat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score observations: counts, log marginal likelihood, predictive log-probabilities
    Score(ScoreArgs),

    /// Draw from the posterior predictive given the observations
    Sample(SampleArgs),

    /// Resolve and validate the prior file
    CheckPrior(CheckPriorArgs),
}

/// Prior selection shared by the modelling commands
#[derive(Args, Debug)]
struct PriorArgs {
    /// Number of categories (overrides the prior file)
    #[arg(long, short = 'k')]
    categories: Option<usize>,

    /// Symmetric concentration (overrides the prior file)
    #[arg(long, short = 'a')]
    alpha: Option<f64>,

    /// Prior file (JSON or TOML)
    #[arg(long)]
    prior: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    #[command(flatten)]
    prior: PriorArgs,

    /// Observations; read from stdin when omitted
    #[arg(allow_negative_numbers = true)]
    data: Vec<String>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    prior: PriorArgs,

    /// Number of draws
    #[arg(long, short = 'n', default_value = "1")]
    draws: usize,

    /// Seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Observations; read from stdin when omitted
    #[arg(allow_negative_numbers = true)]
    data: Vec<String>,
}

#[derive(Args, Debug)]
struct CheckPriorArgs {
    /// Prior file (JSON or TOML)
    #[arg(long)]
    prior: Option<PathBuf>,
}

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::ArgsError.into()
            } else {
                ExitCode::Clean.into()
            };
        }
    };

    let log_config = LogConfig::from_env(
        LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet),
        cli.global.log_format,
    );
    init_logging(&log_config);

    let result = match &cli.command {
        Commands::Score(args) => run_score(&cli.global, args),
        Commands::Sample(args) => run_sample(&cli.global, args),
        Commands::CheckPrior(args) => run_check_prior(&cli.global, args),
    };

    match result {
        Ok(()) => ExitCode::Clean.into(),
        Err(err) => report_error(&cli.global, &err).into(),
    }
}

fn report_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    tracing::debug!(code = err.code(), error = %err, "command failed");
    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&err.to_report()) {
            Ok(body) => println!("{}", body),
            Err(_) => eprintln!("dcat: {}", err),
        },
        OutputFormat::Human => eprintln!("dcat: {}", err),
    }
    err.exit_code()
}

fn emit<T: serde::Serialize>(
    global: &GlobalOpts,
    payload: &T,
    human: impl FnOnce() -> String,
) -> Result<()> {
    match global.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(payload)?),
        OutputFormat::Human => print!("{}", human()),
    }
    Ok(())
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_score(global: &GlobalOpts, args: &ScoreArgs) -> Result<()> {
    let (model, resolved) = build_model(&args.prior, &args.data)?;
    let report = ScoreReport::from_model(&model, resolved.source.to_string());
    emit(global, &report, || report.render_human())
}

fn run_sample(global: &GlobalOpts, args: &SampleArgs) -> Result<()> {
    let (model, _) = build_model(&args.prior, &args.data)?;

    let draws = match args.seed {
        Some(seed) => draw(&model, args.draws, &mut StdRng::seed_from_u64(seed)),
        None => draw(&model, args.draws, &mut rand::rng()),
    };

    let report = SampleReport {
        categories: model.k(),
        alpha: model.alpha(),
        n: model.n(),
        seed: args.seed,
        draws,
    };
    emit(global, &report, || report.render_human())
}

fn run_check_prior(global: &GlobalOpts, args: &CheckPriorArgs) -> Result<()> {
    let (prior, resolved) = load_prior(args.prior.as_deref())?;
    let report = PriorReport {
        source: resolved.source.to_string(),
        path: resolved.path.as_ref().map(|p| p.display().to_string()),
        categories: prior.categories,
        alpha: prior.alpha,
    };
    emit(global, &report, || report.render_human())
}

// ============================================================================
// Helpers
// ============================================================================

fn build_model(
    prior_args: &PriorArgs,
    data: &[String],
) -> Result<(DirichletCategorical, ResolvedPrior)> {
    let (prior, resolved) = load_prior(prior_args.prior.as_deref())?;
    let prior = prior.with_overrides(prior_args.categories, prior_args.alpha);
    check_overrides(prior_args, &prior)?;
    let k = require_categories(&prior)?;

    let mut model = DirichletCategorical::try_with_alpha(k, prior.alpha)?;
    let observations = parse_observations(&read_data(data)?)?;
    incorporate_all(&mut model, &observations)?;

    tracing::info!(
        source = %resolved.source,
        k,
        alpha = prior.alpha,
        n = model.n(),
        "model built"
    );
    Ok((model, resolved))
}

/// Check the merged prior when the command line touched it.
///
/// Command-line values are argument errors, not configuration errors.
fn check_overrides(
    prior_args: &PriorArgs,
    merged: &PriorConfig,
) -> std::result::Result<(), ModelError> {
    if prior_args.categories.is_none() && prior_args.alpha.is_none() {
        return Ok(());
    }
    if merged.categories == Some(0) {
        return Err(ModelError::NoCategories);
    }
    let alpha = merged.alpha;
    let usable = match merged.categories {
        Some(k) => valid_symmetric_prior(alpha, k),
        None => valid_concentration(alpha),
    };
    if usable {
        Ok(())
    } else {
        Err(ModelError::InvalidAlpha { alpha })
    }
}

fn read_data(data: &[String]) -> Result<String> {
    if !data.is_empty() {
        return Ok(data.join(" "));
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut text = String::new();
    stdin.lock().read_to_string(&mut text)?;
    Ok(text)
}

fn draw<R: rand::Rng + ?Sized>(
    model: &DirichletCategorical,
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    (0..count).map(|_| model.sample(rng)).collect()
}
