//! Terminal front-end: one line of candidate input per turn.

use colored::Colorize;
use dialoguer::Input;
use tracing::debug;

use talentscout_core::{Controller, InterviewSession};

/// Run the interview until it reaches a terminal stage or input closes.
///
/// A failed read (Ctrl+C, closed stdin) ends the loop and leaves the session
/// where it was.
pub async fn run(controller: &Controller<'_>, session: &mut InterviewSession) {
    print_reply(&controller.begin(session));

    while !session.is_finished() {
        let line = match read_line() {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "Input closed");
                eprintln!();
                break;
            }
        };

        let reply = controller.handle_input(session, &line).await;
        print_reply(&reply);
    }
}

fn read_line() -> dialoguer::Result<String> {
    Input::<String>::new()
        .with_prompt("You")
        .allow_empty(true)
        .interact_text()
}

fn print_reply(reply: &str) {
    println!();
    println!("{}", "TalentScout".bold().bright_cyan());
    for line in reply.lines() {
        println!("  {}", line);
    }
    println!();
}
