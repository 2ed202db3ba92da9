/// One line typed into the interactive session.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand<'a> {
    /// Anything that is not a `:command` is an identifier to start timing.
    /// A leading `::` submits an identifier that itself starts with `:`.
    Submit(&'a str),
    Done,
    Pending,
    Completed,
    Log,
    Stats,
    Help,
    Quit,
    Empty,
    Unknown(&'a str),
}

impl<'a> SessionCommand<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return SessionCommand::Empty;
        }
        if let Some(identifier) = trimmed.strip_prefix("::") {
            return match identifier.trim() {
                "" => SessionCommand::Empty,
                _ => SessionCommand::Submit(&trimmed[1..]),
            };
        }
        let Some(command) = trimmed.strip_prefix(':') else {
            return SessionCommand::Submit(trimmed);
        };
        match command.trim().to_ascii_lowercase().as_str() {
            "done" | "d" => SessionCommand::Done,
            "pending" | "p" => SessionCommand::Pending,
            "completed" | "c" => SessionCommand::Completed,
            "log" | "l" => SessionCommand::Log,
            "stats" | "s" => SessionCommand::Stats,
            "help" | "h" | "?" => SessionCommand::Help,
            "quit" | "q" | "exit" => SessionCommand::Quit,
            _ => SessionCommand::Unknown(trimmed),
        }
    }
}

pub const SESSION_HELP: &str = "\
### Commands
* paste a **CIMS ID** and press Enter to start its timer
* `:done` (`:d`) stops the oldest pending timer and saves it
* `:pending` (`:p`) lists pending entries
* `:completed` (`:c`) lists entries completed in this session
* `:log` (`:l`) shows the logged entries
* `:stats` (`:s`) shows the time analysis
* `:quit` (`:q`) leaves; pending timers are discarded
* `::ID` starts the timer for an ID that begins with `:`
";
