//! Line-oriented driver for the portal: parse one command, run it against a [`Portal`],
//! return the text to print.

pub mod outputformatter;

use crate::error::{AppError, AppResult, AuthError};
use crate::forms::{LoginForm, SignupForm};
use crate::identity::Role;
use crate::navigation::{resolve, resolve_str};
use crate::portal::Portal;
use crate::shell::ShellEvent;

use outputformatter::{render_navigation, render_notice, render_session, render_view};

pub const HELP: &str = "Commands:
  login <email> <password> [student|recruiter|admin]      log in (role defaults to student)
  signup [student|recruiter] <email> <password> <confirm> <name...>
                                                          create an account (role defaults to the open signup page's)
  logout                                                  end the session, back to landing
  whoami [--json]                                         show the current session
  nav [role]                                              sidebar entries for the session role (or a given role)
  open <path>                                             navigate to a location
  link <path>                                             activate a sidebar link (closes the drawer)
  view [--json]                                           render the current location
  collapse | menu | dismiss                               sidebar collapse toggle, open drawer, dismiss overlay
  navbar-menu                                             toggle the top bar mobile menu
  status                                                  location, session and shell state
  help                                                    show this help
  quit | exit                                             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String, role: Option<Role> },
    Signup { role: Option<Role>, email: String, password: String, confirm: String, name: String },
    Logout,
    WhoAmI { json: bool },
    Nav { role: Option<String> },
    Open { path: String },
    Link { path: String },
    View { json: bool },
    Shell(ShellEvent),
    NavbarMenu,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Quit,
}

fn arg<'a>(parts: &[&'a str], i: usize, name: &'static str) -> Result<&'a str, AuthError> {
    parts.get(i).copied().ok_or(AuthError::MissingField(name))
}

impl Command {
    /// `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> AppResult<Option<Command>> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((head, rest)) = parts.split_first() else { return Ok(None); };
        let json = rest.first() == Some(&"--json");
        let cmd = match head.to_ascii_lowercase().as_str() {
            "login" => Command::Login {
                email: arg(rest, 0, "email")?.to_string(),
                password: arg(rest, 1, "password")?.to_string(),
                role: rest.get(2).map(|r| r.parse::<Role>()).transpose()?,
            },
            "signup" => {
                let role = rest.first().and_then(|r| Role::parse(r));
                let fields = if role.is_some() { &rest[1..] } else { rest };
                if fields.len() < 4 { return Err(AuthError::MissingField("name").into()); }
                Command::Signup {
                    role,
                    email: fields[0].to_string(),
                    password: fields[1].to_string(),
                    confirm: fields[2].to_string(),
                    name: fields[3..].join(" "),
                }
            }
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI { json },
            "nav" => Command::Nav { role: rest.first().map(|s| s.to_string()) },
            "open" | "go" => Command::Open { path: arg(rest, 0, "path")?.to_string() },
            "link" => Command::Link { path: arg(rest, 0, "path")?.to_string() },
            "view" => Command::View { json },
            "collapse" | "toggle-sidebar" => Command::Shell(ShellEvent::ToggleCollapse),
            "menu" => Command::Shell(ShellEvent::OpenMenu),
            "dismiss" => Command::Shell(ShellEvent::DismissOverlay),
            "navbar-menu" => Command::NavbarMenu,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(AppError::user("unknown_command".to_string(), format!("unknown command '{}' (try 'help')", other))),
        };
        Ok(Some(cmd))
    }
}

fn to_json<T: serde::Serialize>(v: &T) -> AppResult<String> {
    serde_json::to_string_pretty(v).map_err(|e| AppError::internal("serialize".to_string(), e.to_string()))
}

pub fn execute(portal: &mut Portal, cmd: Command) -> AppResult<Outcome> {
    let text = match cmd {
        Command::Login { email, password, role } => {
            let form = LoginForm { email, password, role };
            let landed = portal.login(&form)?;
            format!("{}\n{}", render_notice(&landed.notice), render_view(&landed.view))
        }
        Command::Signup { role, email, password, confirm, name } => {
            let preset = portal.signup_form().role;
            let form = SignupForm { name, email, password, confirm_password: confirm, role: role.or(preset) };
            let landed = portal.signup(&form)?;
            format!("{}\n{}", render_notice(&landed.notice), render_view(&landed.view))
        }
        Command::Logout => render_view(&portal.logout()),
        Command::WhoAmI { json: true } => to_json(&portal.session().identity())?,
        Command::WhoAmI { json: false } => render_session(&portal.session()),
        Command::Nav { role: Some(r) } => render_navigation(resolve_str(&r), None),
        Command::Nav { role: None } => match portal.session().role() {
            Some(role) => render_navigation(resolve(role), Some(portal.location())),
            None => "not logged in; use 'nav <role>' to inspect a role".to_string(),
        },
        Command::Open { path } => render_view(&portal.navigate(&path)),
        Command::Link { path } => render_view(&portal.follow_link(&path)),
        Command::View { json: true } => to_json(&portal.render())?,
        Command::View { json: false } => render_view(&portal.render()),
        Command::Shell(event) => match portal.dispatch(event) {
            Some(s) => format!("sidebar_collapsed={} mobile_drawer_open={}", s.sidebar_collapsed, s.mobile_drawer_open),
            None => "no shell mounted (log in first)".to_string(),
        },
        Command::NavbarMenu => format!("mobile_menu_open={}", portal.toggle_navbar_menu()),
        Command::Status => {
            let shell = match portal.shell_state() {
                Some(s) => format!("collapsed={} drawer_open={}", s.sidebar_collapsed, s.mobile_drawer_open),
                None => "unmounted".to_string(),
            };
            format!("location: {}\nsession: {}\nshell: {}", portal.location(), render_session(&portal.session()), shell)
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Print(text))
}
