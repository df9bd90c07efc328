use crate::tab::controller::error::SessionError;
use derive_more::Display;
use std::str::FromStr;

pub(crate) const COMMAND_PROMPT: &str = "Your choice: (a: add item) (s: save bill) (t: add tip) - ";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    #[display("add item")]
    AddItem,
    #[display("set tip")]
    SetTip,
    #[display("save")]
    Save,
}

impl FromStr for Command {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(Self::AddItem),
            "t" => Ok(Self::SetTip),
            "s" => Ok(Self::Save),
            token => Err(SessionError::InvalidCommand {
                token: token.to_string(),
            }),
        }
    }
}
