use clap::Parser;

#[derive(Parser)]
#[command(name = "pomo")]
#[command(about = "Pomodoro countdown timer with desktop notification", long_about = None)]
pub struct Cli {
    /// Start with the 10-second test countdown instead of a full work period
    #[arg(long)]
    pub test: bool,

    /// Reveal the test control in the UI (also toggled at runtime with [T])
    #[arg(long)]
    pub show_test: bool,
}
