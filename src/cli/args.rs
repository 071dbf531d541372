//! Command-line argument parsing for the Mochi CLI.
//!
//! With no arguments the TUI starts. Otherwise the first argument names a
//! one-shot subcommand and the rest are its positional arguments.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Sign in; prompts for anything not given
    Login { username: Option<String> },
    Logout,
    Register { username: String, email: String },
    /// List chatbots
    List,
    /// List chatbot types
    Types,
    Create {
        name: String,
        chatbot_type: String,
        desc: String,
    },
    Delete { id: String },
    Logs { id: String },
    Settings { id: String },
    Set { id: String, key: String, value: String },
    Unset { id: String, key: String },
    Docs { id: String },
    Upload { id: String, path: String },
    RemoveDocument { id: String, name: String },
    /// Open a thread and send one message
    Chat { id: String, message: String },
    /// Run the TUI application (default)
    RunTui,
    /// Arguments that don't form a command; carries the reason
    Invalid(String),
}

pub const USAGE: &str = "\
usage: mochi [command]

With no command the dashboard opens.

commands:
  login [username]              sign in and store the token
  logout                        sign out and forget the token
  register <username> <email>   create an account
  list                          list chatbots
  types                         list chatbot types
  create <name> <type> [desc]   create a chatbot
  delete <id>                   delete a chatbot
  chat <id> <message>           send one message in a new thread
  logs <id>                     show past conversations
  settings <id>                 show settings
  set <id> <key> <value>        change one setting
  unset <id> <key>              delete one setting
  docs <id>                     list documents
  upload <id> <path>            upload a document
  rmdoc <id> <name>             delete a document

flags:
  -V, --version                 print the version
  -h, --help                    print this message";

/// Parse command-line arguments and return the appropriate command.
///
/// ```
/// use mochi::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["mochi".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let args: Vec<String> = args.skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        return CliCommand::RunTui;
    };

    match command.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "--help" | "-h" | "help" => CliCommand::Help,
        "login" => match rest {
            [] => CliCommand::Login { username: None },
            [username] => CliCommand::Login {
                username: Some(username.clone()),
            },
            _ => too_many("login"),
        },
        "logout" => no_args("logout", rest, CliCommand::Logout),
        "register" => match rest {
            [username, email] => CliCommand::Register {
                username: username.clone(),
                email: email.clone(),
            },
            _ => wrong("register <username> <email>"),
        },
        "list" | "ls" => no_args("list", rest, CliCommand::List),
        "types" => no_args("types", rest, CliCommand::Types),
        "create" => match rest {
            [name, chatbot_type, desc @ ..] => CliCommand::Create {
                name: name.clone(),
                chatbot_type: chatbot_type.clone(),
                desc: desc.join(" "),
            },
            _ => wrong("create <name> <type> [desc]"),
        },
        "delete" | "rm" => one_id(rest, "delete <id>", |id| CliCommand::Delete { id }),
        "logs" => one_id(rest, "logs <id>", |id| CliCommand::Logs { id }),
        "settings" => one_id(rest, "settings <id>", |id| CliCommand::Settings { id }),
        "set" => match rest {
            [id, key, value @ ..] if !value.is_empty() => CliCommand::Set {
                id: id.clone(),
                key: key.clone(),
                value: value.join(" "),
            },
            _ => wrong("set <id> <key> <value>"),
        },
        "unset" => match rest {
            [id, key] => CliCommand::Unset {
                id: id.clone(),
                key: key.clone(),
            },
            _ => wrong("unset <id> <key>"),
        },
        "docs" => one_id(rest, "docs <id>", |id| CliCommand::Docs { id }),
        "upload" => match rest {
            [id, path] => CliCommand::Upload {
                id: id.clone(),
                path: path.clone(),
            },
            _ => wrong("upload <id> <path>"),
        },
        "rmdoc" => match rest {
            [id, name] => CliCommand::RemoveDocument {
                id: id.clone(),
                name: name.clone(),
            },
            _ => wrong("rmdoc <id> <name>"),
        },
        "chat" => match rest {
            [id, message @ ..] if !message.is_empty() => CliCommand::Chat {
                id: id.clone(),
                message: message.join(" "),
            },
            _ => wrong("chat <id> <message>"),
        },
        other => CliCommand::Invalid(format!("unknown command '{}'", other)),
    }
}

fn wrong(usage: &str) -> CliCommand {
    CliCommand::Invalid(format!("usage: mochi {}", usage))
}

fn too_many(command: &str) -> CliCommand {
    CliCommand::Invalid(format!("too many arguments for '{}'", command))
}

fn no_args(command: &str, rest: &[String], parsed: CliCommand) -> CliCommand {
    if rest.is_empty() {
        parsed
    } else {
        too_many(command)
    }
}

fn one_id(rest: &[String], usage: &str, build: impl FnOnce(String) -> CliCommand) -> CliCommand {
    match rest {
        [id] => build(id.clone()),
        _ => wrong(usage),
    }
}
