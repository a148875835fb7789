/// One line of operator input at the simulation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCommand {
    /// `Y` or `y`: ask how many games to run.
    Confirm,
    /// A count in `1..=max_games`.
    Launch(usize),
    /// A count above `max_games`.
    TooMany(u64),
    /// `Exit`, `exit`, `N` or `n`.
    Quit,
    Unknown(String),
}

impl SimCommand {
    pub fn parse(input: &str, max_games: usize) -> Self {
        let input = input.trim();
        match input {
            "Y" | "y" => return SimCommand::Confirm,
            "Exit" | "exit" | "N" | "n" => return SimCommand::Quit,
            _ => {}
        }

        match input.parse::<i64>() {
            Ok(n) if n >= 1 => {
                let n = n as u64;
                if n <= max_games as u64 {
                    SimCommand::Launch(n as usize)
                } else {
                    SimCommand::TooMany(n)
                }
            }
            _ => SimCommand::Unknown(input.to_string()),
        }
    }
}
