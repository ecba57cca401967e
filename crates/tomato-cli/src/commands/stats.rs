use chrono::Local;
use clap::Subcommand;
use tomato_core::{Database, Stats};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Show totals and today's count
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear all counters
    Reset,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Show { json } => {
            let stats = Stats::load(&db);
            let today = stats.today_count(Local::now().date_naive());
            if json {
                let value = serde_json::json!({
                    "completedPomodoros": stats.completed_pomodoros,
                    "totalWorkTime": stats.total_work_time,
                    "todayPomodoros": today,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Completed pomodoros: {}", stats.completed_pomodoros);
                println!("Today:               {today}");
                println!("Work minutes:        {}", stats.total_work_time);
            }
        }
        StatsAction::Reset => {
            Stats::default().save(&db)?;
            println!("stats reset");
        }
    }
    Ok(())
}
