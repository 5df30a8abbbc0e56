/// A line of user input, parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Roll,
    Reset,
    Help,
    Quit,
}

impl Command {
    /// Empty input rolls, like pressing the roll button.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "r" | "roll" => Some(Command::Roll),
            "n" | "new" | "reset" => Some(Command::Reset),
            "h" | "help" | "?" => Some(Command::Help),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub const HELP: &str = "commands: [Enter]/roll  reset  help  quit";
