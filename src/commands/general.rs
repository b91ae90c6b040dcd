//! Prompt commands (start, difficulty, score, help, quit)

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use simon_core::types::Difficulty;

/// Handle `start` command. Harmless mid-round; the engine ignores it.
pub fn cmd_start(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.engine.start();
    CommandResult::Success
}

/// Handle `difficulty [easy|medium|hard]` command
pub fn cmd_difficulty(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Current difficulty: {}",
            ctx.engine.session().difficulty
        ));
    }

    match Difficulty::from_str(args) {
        Some(difficulty) => {
            ctx.engine.set_difficulty(difficulty);
            CommandResult::Message(
                format!("Difficulty set to {}", difficulty)
                    .bright_green()
                    .to_string(),
            )
        }
        None => CommandResult::Error("Invalid difficulty. Use easy, medium, or hard".to_string()),
    }
}

/// Handle `score` command
pub fn cmd_score(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(format!("High score: {}", ctx.engine.session().high_score))
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Print help information
fn print_help() {
    println!("{}", "simon: repeat the pattern".bold());
    println!("{}", "=========================".bold());
    println!();
    println!("{}", "How to play:".green());
    println!(
        "  Press {} (or type '{}') while idle to begin.",
        "Enter".cyan(),
        "start".cyan()
    );
    println!("  Watch the sequence light up, then repeat it in order.");
    println!(
        "  Answer with {}, {}, {}, {}, or just {}, {}, {}, {}.",
        "red".red(),
        "blue".blue(),
        "green".green(),
        "yellow".yellow(),
        "r".red(),
        "b".blue(),
        "g".green(),
        "y".yellow()
    );
    println!("  Each cleared level adds one more color to the pattern.");
    println!();
    println!("{}", "Commands:".green());
    println!("  {}               - Begin a round", "start".cyan());
    println!(
        "  {}  - Playback speed (current shown when no value)",
        "difficulty <level>".cyan()
    );
    println!("  {}               - Show the high score", "score".cyan());
    println!("  {}                - Show this help", "help".bright_green());
    println!("  {}                - Leave the game", "quit".bright_red());
}
