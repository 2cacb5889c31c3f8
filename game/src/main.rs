use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use engine::SystemClock;
use game::SessionController;
use game::collab::{Celebration, CodeEntry, CollabError, Navigator};
use game::leaderboard::LeaderboardStore;
use game::participant::Participant;
use game::phase::Phase;
use game::questions::QuestionBankStore;
use game::session::SpeedChallenge;

/// Terminal stand-in for the web page: the code-entry buffer is filled from
/// stdin between prompts and read back by the controller on submit.
struct BufferedCodeEntry(Arc<Mutex<String>>);

impl CodeEntry for BufferedCodeEntry {
    fn current_code(&self) -> String {
        self.0.lock().map(|code| code.clone()).unwrap_or_default()
    }

    fn origin(&self) -> Option<(f32, f32)> {
        // The terminal has no real submit control; report the spot where the
        // prompt sits so the burst lands somewhere sensible.
        Some((0.5, 0.9))
    }
}

struct PrintCelebration;

impl Celebration for PrintCelebration {
    fn burst_at(&mut self, x: f32, y: f32) -> Result<(), CollabError> {
        println!("  *** confetti at ({x:.2}, {y:.2}) ***");
        Ok(())
    }
}

struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn go_to_leaderboard(&mut self, rendered: &str) {
        println!("\n=== Leaderboard ===");
        println!("{rendered}");
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn prompt_line(lines: &mut impl Iterator<Item = io::Result<String>>, label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("flush prompt")?;
    match lines.next() {
        Some(line) => Ok(line.context("read input")?.trim().to_string()),
        None => Err(anyhow!("input closed")),
    }
}

fn read_code_block(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<String> {
    let mut block = Vec::new();
    for line in lines {
        let line = line.context("read code")?;
        if line.is_empty() {
            break;
        }
        block.push(line);
    }
    Ok(block.join("\n"))
}

fn main() -> Result<()> {
    init_logging();

    let bank = QuestionBankStore::from_env().load();
    let store = LeaderboardStore::from_env();
    let typed = Arc::new(Mutex::new(String::new()));

    let mut controller = SessionController::new(
        SpeedChallenge::new(bank),
        Arc::new(SystemClock::new()),
        store,
        Box::new(BufferedCodeEntry(Arc::clone(&typed))),
        Box::new(PrintCelebration),
        Box::new(TerminalNavigator),
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("=== Coding Speed Challenge ===\n");

    loop {
        println!("{}", controller.phase().prompt());
        let name = prompt_line(&mut lines, "Name: ")?;
        let department = prompt_line(&mut lines, "Department: ")?;
        let student_id = prompt_line(&mut lines, "Student ID: ")?;
        let phone = prompt_line(&mut lines, "Phone (optional): ")?;

        let mut participant = Participant::new(name, department, student_id);
        if !phone.is_empty() {
            participant = participant.with_phone_number(phone);
        }

        match controller.start(participant) {
            Ok(()) => break,
            Err(err) => println!("\n{err}\n"),
        }
    }

    while controller.phase() != Phase::Register {
        println!("\n{}", controller.phase().prompt());
        for n in (1..=3).rev() {
            println!("{n}...");
            thread::sleep(Duration::from_secs(1));
        }
        controller.countdown_complete();

        println!("\nQuestion {}: reproduce this code, then finish with an empty line.", controller.question_number());
        println!("    {}\n", controller.current_question().unwrap_or_default());

        let code = read_code_block(&mut lines)?;
        *typed.lock().map_err(|_| anyhow!("code buffer poisoned"))? = code;

        match controller.submit() {
            Some(outcome) if outcome.correct => {
                println!("Correct! {:.3}s", outcome.time_taken);
            }
            Some(outcome) => {
                println!("Not quite. {:.3}s spent.", outcome.time_taken);
            }
            None => {}
        }

        controller.advance();
    }

    controller.view_leaderboard();
    Ok(())
}
