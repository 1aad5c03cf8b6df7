use clap::{Args, Parser, Subcommand};
use eternotes::config::{AppConfig, ConfigError};
use eternotes::core::validation::{form_validators, validate_for_submit};
use eternotes::core::{FieldName, FormFields, InterestSubject, StudentYear};
use eternotes::runtime::Runtime;
use eternotes::runtime::command::Command;
use eternotes::state::{ContactFormController, SubmissionState, SubmitOutcome, ValidationErrors};
use eternotes::ui::animation::{AnimationIntensity, DeviceCapability, animation_profile};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

const SETTLE_GRACE: Duration = Duration::from_secs(1);

/// Contact form pipeline for the club website
#[derive(Parser)]
#[command(name = "eternotes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML config file (sink, timeouts, site profile)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and send a contact message through the configured sink
    Submit(FormArgs),

    /// Validate a contact message without sending it
    Check(FormArgs),

    /// Print the decorative animation profile for a device
    Animation {
        /// Override the site profile's intensity
        #[arg(long, value_parser = parse_intensity)]
        intensity: Option<AnimationIntensity>,

        #[arg(long)]
        reduced_motion: bool,

        #[arg(long)]
        mobile: bool,

        #[arg(long)]
        low_power: bool,
    },
}

#[derive(Args)]
struct FormArgs {
    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "freshman", value_parser = parse_year)]
    year: StudentYear,

    /// Required when --year is "other"
    #[arg(long, default_value = "")]
    other_year: String,

    #[arg(long, default_value = "")]
    instrument: String,

    #[arg(long, default_value = "join", value_parser = parse_subject)]
    subject: InterestSubject,

    #[arg(long, default_value = "")]
    message: String,
}

impl FormArgs {
    fn fields(&self) -> FormFields {
        FormFields {
            name: self.name.clone(),
            email: self.email.clone(),
            student_year: self.year.as_str().to_string(),
            other_year: self.other_year.clone(),
            instrument: self.instrument.clone(),
            interest_subject: self.subject.as_str().to_string(),
            message: self.message.clone(),
        }
    }

    /// Replays the form as a visitor would fill it in: type, then leave the
    /// input.
    fn commands(&self) -> Vec<Command> {
        let fields = self.fields();
        FieldName::ALL
            .into_iter()
            .flat_map(|field| {
                [
                    Command::update(field, fields.get(field)),
                    Command::Blur { field },
                ]
            })
            .collect()
    }
}

#[derive(Serialize)]
struct CheckReport {
    valid: bool,
    errors: ValidationErrors,
}

fn parse_year(value: &str) -> Result<StudentYear, String> {
    value.parse()
}

fn parse_subject(value: &str) -> Result<InterestSubject, String> {
    value.parse()
}

fn parse_intensity(value: &str) -> Result<AnimationIntensity, String> {
    match value {
        "full" => Ok(AnimationIntensity::Full),
        "subtle" => Ok(AnimationIntensity::Subtle),
        other => Err(format!("unknown intensity '{other}' (expected full or subtle)")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Commands::Submit(form) => submit(&config, &form),
        Commands::Check(form) => check(&form),
        Commands::Animation {
            intensity,
            reduced_motion,
            mobile,
            low_power,
        } => {
            let intensity = match intensity {
                Some(intensity) => intensity,
                None => match config.site_profile() {
                    Ok(profile) => profile.animation,
                    Err(err) => {
                        error!("{err}");
                        return ExitCode::from(2);
                    }
                },
            };
            let profile = animation_profile(
                intensity,
                DeviceCapability {
                    reduced_motion,
                    mobile,
                    low_power,
                },
            );
            if print_json(&profile) {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::default()),
    }
}

fn submit(config: &AppConfig, form: &FormArgs) -> ExitCode {
    let brand = match config.site_profile() {
        Ok(profile) => profile.brand,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(2);
        }
    };
    info!(site = %brand, "submitting contact form");

    let controller =
        ContactFormController::with_options(config.build_sink(), config.controller_options());
    let mut runtime = Runtime::new(controller);

    let mut commands = form.commands();
    commands.push(Command::Submit);
    let outcome = runtime.run(commands);

    if let Some(SubmitOutcome::Dispatched { .. }) = outcome
        && !runtime.settle(config.sink_timeout() + SETTLE_GRACE)
    {
        error!("submission did not settle in time");
    }

    let snapshot = runtime.controller().snapshot();
    if !print_json(&snapshot) {
        return ExitCode::from(2);
    }
    match snapshot.submission {
        SubmissionState::Success => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
    }
}

fn check(form: &FormArgs) -> ExitCode {
    let mut errors = ValidationErrors::default();
    errors.replace_all(validate_for_submit(&form.fields(), &form_validators()));
    let report = CheckReport {
        valid: errors.is_empty(),
        errors,
    };
    if !print_json(&report) {
        return ExitCode::from(2);
    }
    if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn print_json<T: Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            true
        }
        Err(err) => {
            error!("failed to encode output: {err}");
            false
        }
    }
}
