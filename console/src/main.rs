//! Console entry-point: loads settings, wires the HTTP adapter into the
//! screens and runs one command.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use console::config::ConsoleSettings;
use console::domain::ports::ApiClient;
use console::domain::{
    AssociateDirectory, ManagerRegistrar, PickerAction, PickerDestination, Section,
};
use console::inbound::cli::{
    AssociatesCommand, CliError, RegisterManagerCommand, run_associates, run_register_manager,
};
use console::outbound::http::ReqwestApiClient;

#[derive(Parser)]
#[command(name = "console", version, about = "Associate lookup and manager registration")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List associates, optionally filtering and selecting one.
    Associates(AssociatesArgs),
    /// Register a new manager account.
    RegisterManager(RegisterManagerArgs),
}

#[derive(Args)]
struct AssociatesArgs {
    /// Case-insensitive name filter.
    #[arg(long)]
    search: Option<String>,
    /// Identifier of the associate to select.
    #[arg(long)]
    select: Option<String>,
    /// Section to continue to with the selected associate.
    #[arg(long, value_enum, requires = "select")]
    section: Option<SectionArg>,
    /// Action within the section (defaults to `view`).
    #[arg(long, value_enum, requires = "section")]
    action: Option<ActionArg>,
    /// Derive section and action from a console path such as `/reports/add`.
    #[arg(long, conflicts_with = "section", requires = "select")]
    from_path: Option<String>,
}

impl AssociatesArgs {
    fn into_command(self) -> AssociatesCommand {
        let destination = match (self.section, self.from_path) {
            (Some(section), _) => {
                let action = self.action.unwrap_or(ActionArg::View);
                Some(PickerDestination::new(section.into(), action.into()))
            }
            (None, Some(path)) => Some(PickerDestination::infer_from_path(&path)),
            (None, None) => None,
        };
        AssociatesCommand {
            search: self.search,
            select: self.select,
            destination,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SectionArg {
    Reports,
    Feedbacks,
}

impl From<SectionArg> for Section {
    fn from(value: SectionArg) -> Self {
        match value {
            SectionArg::Reports => Self::Reports,
            SectionArg::Feedbacks => Self::Feedbacks,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ActionArg {
    Add,
    View,
}

impl From<ActionArg> for PickerAction {
    fn from(value: ActionArg) -> Self {
        match value {
            ActionArg::Add => Self::Add,
            ActionArg::View => Self::View,
        }
    }
}

#[derive(Args)]
struct RegisterManagerArgs {
    /// Display name.
    #[arg(long)]
    name: String,
    /// Login email.
    #[arg(long)]
    email: String,
    /// Initial password.
    #[arg(long, env = "CONSOLE_MANAGER_PASSWORD", hide_env_values = true)]
    password: String,
    /// Password repeated.
    #[arg(long, env = "CONSOLE_MANAGER_PASSWORD_CONFIRM", hide_env_values = true)]
    password_confirm: String,
}

impl From<RegisterManagerArgs> for RegisterManagerCommand {
    fn from(args: RegisterManagerArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            password: args.password,
            password_confirm: args.password_confirm,
        }
    }
}

fn build_client(settings: &ConsoleSettings) -> Result<Arc<dyn ApiClient>, CliError> {
    let mut client = ReqwestApiClient::new(settings.api_base_url()?, settings.request_timeout())?;
    if let Some(token) = settings.api_token() {
        client = client.with_token(token);
    }
    Ok(Arc::new(client))
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let settings = ConsoleSettings::load()?;
    let client = build_client(&settings)?;
    match cli.command {
        Command::Associates(args) => {
            let directory = AssociateDirectory::new(client)
                .with_start_path(settings.associates_path())
                .with_limits(settings.follow_limits());
            run_associates(&directory, &args.into_command()).await
        }
        Command::RegisterManager(args) => {
            let registrar = ManagerRegistrar::new(client).with_path(settings.users_path());
            run_register_manager(&registrar, args.into()).await
        }
    }
}

/// Application bootstrap.
#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(out) => {
            let mut stdout = io::stdout().lock();
            if write!(stdout, "{out}").and_then(|()| stdout.flush()).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "error: {err}");
            ExitCode::FAILURE
        }
    }
}
