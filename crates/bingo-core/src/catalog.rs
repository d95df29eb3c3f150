//! The bot's fixed command catalog and the fragments it is assembled from.

use crate::error::SchemaError;
use crate::schema;
use bingo_types::{Command, CommandOption, OptionChoice};
use serde::Serialize;
use tracing::debug;

/// Permission bitmask for administrator-only commands.
pub const ADMINISTRATOR: &str = "8";

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// An ordered, validated set of commands.
///
/// The only constructor runs the schema checks, so holding a `Catalog`
/// means every name is unique at its level and every bound is ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Command>);

impl Catalog {
    pub fn new(commands: Vec<Command>) -> Result<Self, SchemaError> {
        schema::validate(&commands)?;
        debug!(target: "bingo::catalog", "Validated catalog of {} commands", commands.len());
        Ok(Self(commands))
    }

    pub fn commands(&self) -> &[Command] {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.0.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the complete catalog registered for the bot.
pub fn build() -> Result<Catalog, SchemaError> {
    Catalog::new(vec![
        bingo_command(),
        signup_command(),
        Command::new("myteam", "Check your assigned team."),
        Command::new("listunpaired", "View all free agents waiting for pairing."),
        Command::new("leave_team", "Leave your current signup or team."),
        Command::new("list_teams", "View all registered teams."),
        Command::new("help", "Show bot help."),
        Command::new("invite", "Get the bot's invite link"),
        Command::new("add_team_member", "Add a member to your team.")
            .option(CommandOption::user("member", "Mention the member to add").required())
            .option(timezone_option("Member's time zone (e.g., GMT, PST, EST)")),
        Command::new("setup", "One-time setup command to populate guild data.")
            .default_member_permissions(ADMINISTRATOR),
        admin_command(),
    ])
}

/// The standard autocompleted game selector.
pub fn game_option() -> CommandOption {
    CommandOption::string("game", "Name of the bingo game")
        .required()
        .autocomplete()
}

/// `January` → `"01"` through `December` → `"12"`.
pub fn month_choices() -> Vec<OptionChoice> {
    MONTHS
        .iter()
        .enumerate()
        .map(|(i, month)| OptionChoice::new(*month, format!("{:02}", i + 1)))
        .collect()
}

pub fn month_option(name: &str, description: &str) -> CommandOption {
    CommandOption::string(name, description)
        .required()
        .choices(month_choices())
}

pub fn day_option(name: &str, description: &str) -> CommandOption {
    CommandOption::integer(name, description)
        .required()
        .min_value(1)
        .max_value(31)
}

pub fn year_option(name: &str, description: &str) -> CommandOption {
    CommandOption::integer(name, description)
        .required()
        .min_value(2000)
        .max_value(3000)
}

pub fn timezone_option(description: &str) -> CommandOption {
    CommandOption::string("timezone", description).required()
}

/// Required, autocompleted team selector.
pub fn team_option(name: &str, description: &str) -> CommandOption {
    CommandOption::string(name, description)
        .required()
        .autocomplete()
}

/// Required, autocompleted board square selector.
pub fn square_option(description: &str) -> CommandOption {
    CommandOption::string("square", description)
        .required()
        .autocomplete()
}

fn bingo_command() -> Command {
    let create_game = CommandOption::subcommand("create_game", "Create a new OSRS bingo game")
        .option(CommandOption::string("name", "Name of the bingo game").required())
        .option(bounded("max_teams", "Maximum number of teams allowed", 1, 100))
        .option(bounded("min_team_size", "Minimum players per team", 1, 10))
        .option(bounded("max_team_size", "Maximum players per team", 1, 999))
        .option(month_option("start_month", "Start month"))
        .option(day_option("start_day", "Start day"))
        .option(year_option("start_year", "Start year"))
        .option(month_option("end_month", "End month"))
        .option(day_option("end_day", "End day"))
        .option(year_option("end_year", "End year"))
        .option(CommandOption::string("description", "Description of the bingo game"))
        .option(
            CommandOption::integer("size", "Board size (3-10)")
                .min_value(3)
                .max_value(10),
        );

    let add_square = CommandOption::subcommand("add_square", "Add a square to the bingo board")
        .option(game_option())
        .option(CommandOption::string("goal", "Goal to achieve (e.g., 'Get a Fire cape')").required())
        .option(
            CommandOption::integer("points", "Points for completing this goal")
                .required()
                .min_value(1),
        );

    let view = CommandOption::subcommand(
        "view",
        "View a bingo board (defaults to your team's board in current game)",
    )
    .option(game_option())
    .option(team_option(
        "team",
        "Team to view (admin only, leave empty to view your own team)",
    ));

    let submit = CommandOption::subcommand("submit", "Submit proof for completing a square")
        .option(game_option())
        .option(square_option(
            "Which square did you complete? (e.g., '1,1' for top-left)",
        ))
        .option(CommandOption::attachment("image", "Screenshot or image showing your completion").required());

    let verify = CommandOption::subcommand("verify", "Verify a square completion")
        .option(game_option())
        .option(team_option("team", "Team name"))
        .option(square_option("Which square to verify?"));

    let end_game = CommandOption::subcommand("end_game", "End a bingo game")
        .option(game_option())
        .option(team_option("winner_team", "Team that won the game"));

    let list_games = CommandOption::subcommand("list_games", "List all bingo games").option(
        CommandOption::boolean("all", "Show all games (not just the most recent 10)"),
    );

    let join = CommandOption::subcommand("join", "Join an active bingo game with your team")
        .option(game_option());

    let view_square =
        CommandOption::subcommand("view_square", "View all submissions for a specific square")
            .option(team_option("game", "Game name"))
            .option(team_option("team", "Team name"))
            .option(square_option("Square (position or name)"));

    Command::new("bingo", "Play and manage OSRS bingo games")
        .option(create_game)
        .option(add_square)
        .option(view)
        .option(submit)
        .option(verify)
        .option(end_game)
        .option(list_games)
        .option(join)
        .option(view_square)
}

fn signup_command() -> Command {
    const TIMEZONE: &str = "Your time zone (e.g., GMT, PST, EST)";

    Command::new(
        "signup",
        "Sign up for the event by creating a team, joining a team, or as a free agent.",
    )
    .option(
        CommandOption::subcommand("create_team", "Create a new team.")
            .option(game_option())
            .option(team_option("team_name", "Enter your team name"))
            .option(timezone_option(TIMEZONE)),
    )
    .option(
        CommandOption::subcommand("join_team", "Join an existing team.")
            .option(game_option())
            .option(team_option("team_name", "Name of the team to join"))
            .option(timezone_option(TIMEZONE)),
    )
    .option(
        CommandOption::subcommand("free_agent", "Sign up as a free agent and wait for a team to join.")
            .option(game_option())
            .option(timezone_option(TIMEZONE)),
    )
}

fn admin_command() -> Command {
    Command::new("admin", "Manage admin roles for the bot.")
        .default_member_permissions(ADMINISTRATOR)
        .option(
            CommandOption::subcommand("add_role", "Add a role as admin.")
                .option(CommandOption::role("role", "The role to add as admin.").required()),
        )
        .option(
            CommandOption::subcommand("remove_role", "Remove a role from admin.")
                .option(CommandOption::role("role", "The role to remove from admin.").required()),
        )
        .option(CommandOption::subcommand("list_roles", "List all admin roles."))
}

fn bounded(name: &str, description: &str, min: i64, max: i64) -> CommandOption {
    CommandOption::integer(name, description)
        .required()
        .min_value(min)
        .max_value(max)
}
