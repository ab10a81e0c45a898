use crate::report::{run_curve_report, run_month_report, CurveArgs, MonthArgs};
use crate::server;
use booking_pace::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Booking Pace Analyzer",
    about = "Compute and serve hotel booking-pace curves from reservation transaction logs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute booking-pace curves directly from a CSV export
    Pace {
        #[command(subcommand)]
        command: PaceCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PaceCommand {
    /// Year-over-year booking curve for one target stay night
    Curve(CurveArgs),
    /// Booking curves for every day of a calendar month
    Month(MonthArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured reservation CSV export path
    #[arg(long)]
    pub(crate) reservations_csv: Option<std::path::PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Pace {
            command: PaceCommand::Curve(args),
        } => run_curve_report(args),
        Command::Pace {
            command: PaceCommand::Month(args),
        } => run_month_report(args),
    }
}
