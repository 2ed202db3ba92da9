/// Whether a mode handled the invocation or the next mode should be tried.
#[derive(Debug, PartialEq, Eq)]
pub enum CliModeResult {
    Finish,
    NothingToDo,
}
