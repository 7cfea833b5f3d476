use crate::demo::{run_demo, run_evaluate, run_questions, DemoArgs, EvaluateArgs, QuestionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobspeak::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "JobSpeak Coach",
    about = "Serve and demo the interview-practice coaching core from the command line",
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
    /// Print a personalised question selection
    Questions(QuestionsArgs),
    /// Score one answer and print the coaching feedback
    Evaluate(EvaluateArgs),
    /// Run a scripted five-question mock interview and print the session summary
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Questions(args) => run_questions(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Demo(args) => run_demo(args),
    }
}
