//! Task checklist commands.

use clap::Subcommand;
use tomato_core::{Database, TaskList};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done, or not done again
    Toggle {
        /// Task ID
        id: u64,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: u64,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut tasks = TaskList::load(&db);

    match action {
        TaskAction::Add { text } => {
            let text = text.join(" ");
            let task = tasks.add(&text).cloned().ok_or("task text is empty")?;
            tasks.save(&db)?;
            println!("Task added: {}", task.id);
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks yet");
            } else {
                for task in &tasks {
                    let mark = if task.completed { "x" } else { " " };
                    println!("[{mark}] {}  {}", task.id, task.text);
                }
                println!("{} of {} pending", tasks.pending(), tasks.len());
            }
        }
        TaskAction::Toggle { id } => {
            if !tasks.toggle(id) {
                return Err(format!("task not found: {id}").into());
            }
            tasks.save(&db)?;
            let done = tasks.get(id).is_some_and(|t| t.completed);
            println!("Task {id} {}", if done { "completed" } else { "reopened" });
        }
        TaskAction::Delete { id } => {
            if !tasks.delete(id) {
                return Err(format!("task not found: {id}").into());
            }
            tasks.save(&db)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
