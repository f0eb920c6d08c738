use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use dailymenu::config::Config;
use dailymenu::store::JsonFileStore;
use dailymenu::view;
use dailymenu_menu::{MealSlot, MenuPlanner, SystemClock};

/// dailymenu - What's cooking today
#[derive(Parser)]
#[command(name = "dailymenu")]
#[command(about = "Picks today's meals without repeating last week's", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's menu, picking any meal not yet chosen
    Today,
    /// Reveal today's snack
    Snack,
    /// Reveal today's dessert
    Dessert,
    /// Swap a meal for its easy variant
    Easy {
        /// Which meal to take the easy way out on
        #[arg(value_enum)]
        slot: EasySlot,
    },
    /// Forget all selection history and today's menu
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum EasySlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl From<EasySlot> for MealSlot {
    fn from(slot: EasySlot) -> Self {
        match slot {
            EasySlot::Breakfast => MealSlot::Breakfast,
            EasySlot::Lunch => MealSlot::Lunch,
            EasySlot::Dinner => MealSlot::Dinner,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize logging before any state is touched
    dailymenu::observability::init_observability(&config.observability.log_level)?;

    tracing::debug!(path = %config.storage.path.display(), "using state file");

    let store = JsonFileStore::new(&config.storage.path);
    let mut planner = MenuPlanner::new(config.catalog(), store, SystemClock, None);

    match cli.command.unwrap_or(Commands::Today) {
        Commands::Today => {}
        Commands::Snack => {
            planner.reveal(MealSlot::Snack)?;
        }
        Commands::Dessert => {
            planner.reveal(MealSlot::Dessert)?;
        }
        Commands::Easy { slot } => {
            planner.use_easy(slot.into())?;
        }
        Commands::Reset => {
            planner.reset();
            println!("Menu history cleared.");
            return Ok(());
        }
    }

    let menu = planner.ensure_today();
    println!("{}", view::render(&menu));

    Ok(())
}
