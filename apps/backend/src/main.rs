use clap::{Parser, Subcommand};
use story_arena::config::db::RuntimeEnv;
use story_arena::services::standings::load_standings;
use story_arena::services::tournament::{run_generation, run_resolution, CycleScope};
use story_arena::{build_state, reset_game_for_testing, AppError, AppState};

mod telemetry;

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Story Arena weekly faceoff cycle trigger")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pair this week's eligible submissions into faceoffs
    Generate {
        /// Only consider submissions of this cohort
        #[arg(long)]
        cohort: Option<i64>,
    },
    /// Tally votes of all open faceoffs and update standings
    Resolve,
    /// Wipe game state (squads, teams, members, faceoffs, votes, points)
    Reset {
        #[arg(long = "i-know-this-is-a-test")]
        confirmed: bool,
    },
    /// Print squad and team standings as JSON
    Standings,
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (ARENA_ENV, ARENA_DB_KIND, DB credentials, cycle tunables).
    let args = Args::parse();

    let state = match build_state().from_process_env() {
        Ok(builder) => match builder.build().await {
            Ok(state) => state,
            Err(e) => fail("Failed to build application state", &e),
        },
        Err(e) => fail("Invalid configuration", &e),
    };

    if let Err(e) = run(args.command, &state).await {
        fail("Cycle failed", &e);
    }
}

async fn run(command: Command, state: &AppState) -> Result<(), AppError> {
    match command {
        Command::Generate { cohort } => {
            let scope = cohort.map_or(CycleScope::All, CycleScope::Cohort);
            let outcome = run_generation(state, scope).await?;
            println!(
                "week {}: {} faceoffs created, {} squads skipped",
                outcome.week,
                outcome.faceoff_ids.len(),
                outcome.skipped_squads.len()
            );
        }
        Command::Resolve => {
            let outcome = run_resolution(state).await?;
            println!(
                "{} faceoffs resolved, {} votes ignored",
                outcome.results.len(),
                outcome.ignored_votes
            );
        }
        Command::Reset { confirmed } => {
            if !confirmed || state.env != RuntimeEnv::Test {
                eprintln!("Refusing to reset: pass --i-know-this-is-a-test with ARENA_ENV=test");
                std::process::exit(2);
            }
            reset_game_for_testing(state).await?;
            println!("game state reset");
        }
        Command::Standings => {
            let standings = load_standings(state.db()).await?;
            let json = serde_json::to_string_pretty(&standings)
                .map_err(|e| AppError::internal(format!("failed to encode standings: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}

fn fail(context: &str, e: &AppError) -> ! {
    eprintln!("{context}: [{}] {e}", e.code());
    std::process::exit(1);
}
