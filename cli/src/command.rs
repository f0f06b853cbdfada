//! Input line parsing and execution.
//!
//! Lines starting with `/` are commands; anything else is sent as chat.
//! Arguments are split with shell rules: wrap them in single or double
//! quotes to include spaces, and escape quotes with a backslash. Empty
//! arguments are rejected. The last argument of `/poll`, `/option`, `/vote`
//! and `/unvote` also takes any remaining words.

use tracing::info;
use vimeet_sdk::{RoomEngine, UserId, WsError};

use crate::report;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/icon <kind>`
    Icon(String),
    /// `/raise <kind>`
    Raise(String),
    /// `/lower <kind>`
    Lower(String),
    /// `/poll <title>`
    Poll(String),
    /// `/option <poll> <title>`
    AddOption {
        /// Poll id.
        poll: String,
        /// Option title.
        title: String,
    },
    /// `/vote <poll> <option>`
    Vote {
        /// Poll id.
        poll: String,
        /// Option id.
        option: String,
    },
    /// `/unvote <poll> <option>`
    Unvote {
        /// Poll id.
        poll: String,
        /// Option id.
        option: String,
    },
    /// `/close <poll>`
    Close(String),
    /// `/elevate <id>`
    Elevate(UserId),
    /// `/recede <id>`
    Recede(UserId),
    /// `/who`
    Who,
    /// `/polls`
    Polls,
    /// `/quit`
    Quit,
    /// Plain text.
    Chat(String),
}

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Leave the room.
    Quit,
}

/// Input parse errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unrecognized slash-command.
    #[error("unknown command: /{0}")]
    UnknownCommand(String),

    /// Required argument not given.
    #[error("/{command} expects {usage}")]
    MissingArgument {
        /// Command name.
        command: String,
        /// Expected arguments.
        usage: &'static str,
    },

    /// More arguments than the command takes.
    #[error("/{0}: too many arguments")]
    TooManyArguments(String),

    /// A quote was opened but never closed.
    #[error("unterminated quote")]
    UnterminatedQuote,

    /// Participant id is not a number.
    #[error("invalid participant id: {0}")]
    InvalidId(String),
}

/// Splits a line into arguments with shell quoting rules.
///
/// # Errors
///
/// Returns `ParseError::UnterminatedQuote` if a quote is left open or the
/// line ends in a dangling escape.
pub fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    shlex::split(input).ok_or(ParseError::UnterminatedQuote)
}

struct Args {
    command: String,
    rest: std::vec::IntoIter<String>,
}

impl Args {
    fn missing(&self, usage: &'static str) -> ParseError {
        ParseError::MissingArgument {
            command: self.command.clone(),
            usage,
        }
    }

    fn next(&mut self, usage: &'static str) -> Result<String, ParseError> {
        match self.rest.next() {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(self.missing(usage)),
        }
    }

    fn remainder(&mut self, usage: &'static str) -> Result<String, ParseError> {
        let words: Vec<String> = self.rest.by_ref().filter(|w| !w.is_empty()).collect();
        if words.is_empty() {
            return Err(self.missing(usage));
        }
        Ok(words.join(" "))
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.rest.next() {
            Some(_) => Err(ParseError::TooManyArguments(self.command)),
            None => Ok(()),
        }
    }

    fn single(mut self, usage: &'static str) -> Result<String, ParseError> {
        let value = self.next(usage)?;
        self.finish()?;
        Ok(value)
    }

    fn user_id(self, usage: &'static str) -> Result<UserId, ParseError> {
        let raw = self.single(usage)?;
        raw.parse::<UserId>().map_err(|_| ParseError::InvalidId(raw))
    }
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands, missing or extra arguments and
    /// unterminated quotes.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let Some(body) = trimmed.strip_prefix('/') else {
            return Ok(Some(Self::Chat(trimmed.to_string())));
        };

        let mut tokens = tokenize(body)?.into_iter();
        let command = tokens.next().unwrap_or_default();
        let mut args = Args {
            command: command.clone(),
            rest: tokens,
        };

        let parsed = match command.as_str() {
            "icon" => Self::Icon(args.single("<kind>")?),
            "raise" => Self::Raise(args.single("<kind>")?),
            "lower" => Self::Lower(args.single("<kind>")?),
            "poll" => Self::Poll(args.remainder("<title>")?),
            "option" => Self::AddOption {
                poll: args.next("<poll> <title>")?,
                title: args.remainder("<poll> <title>")?,
            },
            "vote" => Self::Vote {
                poll: args.next("<poll> <option>")?,
                option: args.remainder("<poll> <option>")?,
            },
            "unvote" => Self::Unvote {
                poll: args.next("<poll> <option>")?,
                option: args.remainder("<poll> <option>")?,
            },
            "close" => Self::Close(args.single("<poll>")?),
            "elevate" => Self::Elevate(args.user_id("<id>")?),
            "recede" => Self::Recede(args.user_id("<id>")?),
            "who" => {
                args.finish()?;
                Self::Who
            }
            "polls" => {
                args.finish()?;
                Self::Polls
            }
            "quit" => {
                args.finish()?;
                Self::Quit
            }
            _ => return Err(ParseError::UnknownCommand(args.command)),
        };

        Ok(Some(parsed))
    }

    /// Runs the command against the engine.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if the command could not be queued.
    pub fn execute(self, engine: &RoomEngine) -> Result<Flow, WsError> {
        match self {
            Self::Icon(kind) => engine.send_instant(&kind)?,
            Self::Raise(kind) => engine.raise_object(&kind)?,
            Self::Lower(kind) => engine.lower_object(&kind)?,
            Self::Poll(title) => engine.create_poll(&title)?,
            Self::AddOption { poll, title } => engine.add_option(&poll, &title)?,
            Self::Vote { poll, option } => engine.vote(&poll, &option)?,
            Self::Unvote { poll, option } => engine.delete_vote(&poll, &option)?,
            Self::Close(poll) => engine.close_poll(&poll)?,
            Self::Elevate(id) => engine.change_permission(id, true)?,
            Self::Recede(id) => engine.change_permission(id, false)?,
            Self::Chat(text) => engine.send_chat_message(&text)?,
            Self::Who => {
                let participants = engine.store().participants.get();
                info!("{} participant(s)", participants.len());
                for participant in participants.iter() {
                    info!("  {}", participant);
                }
            }
            Self::Polls => {
                let polls = engine.store().polls.get();
                info!("{} poll(s)", polls.len());
                for poll in polls.iter() {
                    info!("  {}", report::poll_line(poll));
                }
            }
            Self::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}
