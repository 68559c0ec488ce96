//! Line parsing for the file system shell

/// A parsed shell line. Missing arguments stay `None` so the dispatcher can
/// check the session before complaining about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ls,
    Pwd,
    Cd(Option<String>),
    Mkdir(Option<String>),
    Touch(Option<String>),
    Rm(Option<String>),
    Rmdir(Option<String>),
    Open(Option<String>),
    Write {
        name: Option<String>,
        content: String,
    },
    SetUrl {
        name: Option<String>,
        url: Option<String>,
    },
    Mv {
        source: Option<String>,
        destination: Option<String>,
    },
    Rename {
        old_name: Option<String>,
        new_name: Option<String>,
    },
    Clear,
    Help,
    About,
    Portfolio,
    SignUp {
        username: Option<String>,
        password: Option<String>,
    },
    SignIn {
        username: Option<String>,
        password: Option<String>,
    },
    SignOut,
    UserDel {
        username: Option<String>,
        password: Option<String>,
    },
    Search(Option<String>),
    Unknown(String),
}

impl Command {
    pub fn verb(&self) -> &str {
        match self {
            Command::Ls => "ls",
            Command::Pwd => "pwd",
            Command::Cd(_) => "cd",
            Command::Mkdir(_) => "mkdir",
            Command::Touch(_) => "touch",
            Command::Rm(_) => "rm",
            Command::Rmdir(_) => "rmdir",
            Command::Open(_) => "open",
            Command::Write { .. } => "write",
            Command::SetUrl { .. } => "seturl",
            Command::Mv { .. } => "mv",
            Command::Rename { .. } => "rename",
            Command::Clear => "clear",
            Command::Help => "help",
            Command::About => "about",
            Command::Portfolio => "portfolio",
            Command::SignUp { .. } => "signup",
            Command::SignIn { .. } => "signin",
            Command::SignOut => "signout",
            Command::UserDel { .. } => "userdel",
            Command::Search(_) => "search",
            Command::Unknown(verb) => verb,
        }
    }
}

/// Parse one line; `None` for a blank line.
///
/// Everything is lower-cased except the text of `write`, which keeps its
/// case and is joined with single spaces.
pub fn parse_command(line: &str) -> Option<Command> {
    let raw: Vec<&str> = line.split_whitespace().collect();
    let (verb, raw_args) = raw.split_first()?;
    let verb = verb.to_lowercase();
    let args: Vec<String> = raw_args.iter().map(|a| a.to_lowercase()).collect();
    let arg = |i: usize| args.get(i).cloned();

    let command = match verb.as_str() {
        "ls" => Command::Ls,
        "pwd" => Command::Pwd,
        "cd" => Command::Cd(arg(0)),
        "mkdir" => Command::Mkdir(arg(0)),
        "touch" => Command::Touch(arg(0)),
        "rm" => Command::Rm(arg(0)),
        "rmdir" => Command::Rmdir(arg(0)),
        "open" => Command::Open(arg(0)),
        "write" => Command::Write {
            name: arg(0),
            content: raw_args.iter().skip(1).copied().collect::<Vec<_>>().join(" "),
        },
        "seturl" => Command::SetUrl {
            name: arg(0),
            url: arg(1),
        },
        "mv" => Command::Mv {
            source: arg(0),
            destination: arg(1),
        },
        "rename" => Command::Rename {
            old_name: arg(0),
            new_name: arg(1),
        },
        "clear" | "cls" => Command::Clear,
        "help" => Command::Help,
        "about" => Command::About,
        "portfolio" => Command::Portfolio,
        "signup" => Command::SignUp {
            username: arg(0),
            password: arg(1),
        },
        "signin" => Command::SignIn {
            username: arg(0),
            password: arg(1),
        },
        "signout" => Command::SignOut,
        "userdel" => Command::UserDel {
            username: arg(0),
            password: arg(1),
        },
        "search" => Command::Search(arg(0)),
        _ => Command::Unknown(raw[0].to_string()),
    };
    Some(command)
}
