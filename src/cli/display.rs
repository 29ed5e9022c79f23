//! Terminal display and UI rendering
//!
//! Features:
//! - Live HUD (reps, form, joint angle, FPS, time left)
//! - Color-coded form score
//! - Session result and workout history listing

use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};

use super::input::InputHandler;
use crate::record::WorkoutRecord;
use crate::render::{LabelKind, Overlay, RenderSink};
use crate::tracker::SessionResult;

/// First HUD row, below the header
const HUD_ROW: u16 = 3;
const GAUGE_WIDTH: usize = 20;

fn form_color(percentage: f64) -> Color {
    if percentage >= 80.0 {
        Color::Green
    } else if percentage >= 40.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Terminal display manager
pub struct Display {
    exercise: String,
    requested_reps: u32,
}

impl Display {
    pub fn new(exercise: &str, requested_reps: u32) -> Self {
        Display {
            exercise: exercise.to_string(),
            requested_reps,
        }
    }

    /// Clear screen
    pub fn clear(&self) -> io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    /// Exercise name, target and exit hint
    pub fn show_header(&self, session_secs: u64) -> io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Cyan),
            Print(format!("{}  ", self.exercise)),
            ResetColor,
            Print(format!(
                "Target: {} reps | {}s",
                self.requested_reps, session_secs
            )),
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::DarkGrey),
            Print("Press ESC or Ctrl+C to stop early"),
            ResetColor,
        )?;
        stdout.flush()
    }

    fn show_row(&self, row: u16, name: &str, value: &str, color: Color) -> io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, HUD_ROW + row),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Magenta),
            Print(format!("{:<10}", name)),
            ResetColor,
            SetForegroundColor(color),
            Print(value),
            ResetColor,
        )
    }

    /// Print the outcome of a `track` run (raw mode already off)
    pub fn show_result(&self, result: &SessionResult) -> io::Result<()> {
        let mut stdout = stdout();
        let color = match (result.success, result.persisted) {
            (true, Some(false)) => Color::Yellow,
            (true, _) => Color::Green,
            (false, _) => Color::Red,
        };

        execute!(
            stdout,
            cursor::MoveTo(0, HUD_ROW + 7),
            SetForegroundColor(Color::Blue),
            Print("─".repeat(50)),
            Print("\n"),
            SetForegroundColor(color),
            Print(&result.message),
            Print("\n"),
            ResetColor,
        )?;

        if let Some(score) = result.score {
            execute!(stdout, Print(format!("Average form: {:.1}%\n", score)))?;
        }
        if let Some(reference) = &result.render_reference {
            execute!(stdout, Print(format!("Overlay log: {}\n", reference)))?;
        }
        stdout.flush()
    }

    /// Print stored workouts, oldest first
    pub fn show_history(records: &[WorkoutRecord]) -> io::Result<()> {
        let mut stdout = stdout();

        if records.is_empty() {
            execute!(stdout, Print("No past workouts found.\n"))?;
            return stdout.flush();
        }

        execute!(
            stdout,
            SetForegroundColor(Color::Cyan),
            Print(format!(
                "{:<20} {:<14} {:>5} {:>7} {:>9}\n",
                "Date", "Exercise", "Reps", "Score", "Calories"
            )),
            ResetColor,
        )?;

        for record in records {
            execute!(
                stdout,
                Print(format!("{:<20} {:<14} {:>5} ", record.timestamp, record.exercise_name, record.reps)),
                SetForegroundColor(form_color(record.score)),
                Print(format!("{:>6.1}%", record.score)),
                ResetColor,
                Print(format!(" {:>9.2}\n", record.calories)),
            )?;
        }
        stdout.flush()
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> io::Result<()> {
        let mut stdout = stdout();
        execute!(stdout, cursor::Show)?;
        InputHandler::disable_raw_mode()
    }
}

impl RenderSink for Display {
    fn draw(&mut self, overlay: &Overlay) -> io::Result<()> {
        let text = |kind| overlay.label(kind).unwrap_or("--");

        self.show_row(0, "Reps", text(LabelKind::Reps), Color::White)?;

        match overlay.label(LabelKind::Form) {
            Some(form) => {
                let pct = form.trim_end_matches('%').parse::<f64>().unwrap_or(0.0);
                let filled = ((pct / 100.0) * GAUGE_WIDTH as f64).round() as usize;
                let gauge = format!(
                    "{:>4} [{}{}]",
                    form,
                    "█".repeat(filled.min(GAUGE_WIDTH)),
                    " ".repeat(GAUGE_WIDTH - filled.min(GAUGE_WIDTH))
                );
                self.show_row(1, "Form", &gauge, form_color(pct))?;
            }
            None => self.show_row(1, "Form", "no pose", Color::DarkGrey)?,
        }

        self.show_row(2, "Angle", text(LabelKind::Angle), Color::White)?;
        self.show_row(3, "FPS", text(LabelKind::Fps).trim_start_matches("FPS: "), Color::White)?;
        self.show_row(
            4,
            "Time left",
            text(LabelKind::TimeLeft).trim_start_matches("Time Left: "),
            Color::White,
        )?;

        stdout().flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        stdout().flush()
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
