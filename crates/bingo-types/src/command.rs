//! Types for application command definitions as the registry expects them.

use serde::{Deserialize, Serialize};

/// Kind of a command option, encoded on the wire as a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OptionType {
    SubCommand,
    String,
    Integer,
    Boolean,
    User,
    Role,
    Attachment,
}

impl OptionType {
    /// Wire value used by the registry.
    pub const fn code(self) -> u8 {
        match self {
            OptionType::SubCommand => 1,
            OptionType::String => 3,
            OptionType::Integer => 4,
            OptionType::Boolean => 5,
            OptionType::User => 6,
            OptionType::Role => 8,
            OptionType::Attachment => 11,
        }
    }

    /// Whether a fixed list of choices makes sense for this kind.
    pub const fn accepts_choices(self) -> bool {
        matches!(self, OptionType::String | OptionType::Integer)
    }

    /// Whether `min_value`/`max_value` make sense for this kind.
    pub const fn accepts_bounds(self) -> bool {
        matches!(self, OptionType::Integer)
    }
}

impl From<OptionType> for u8 {
    fn from(kind: OptionType) -> Self {
        kind.code()
    }
}

impl TryFrom<u8> for OptionType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(OptionType::SubCommand),
            3 => Ok(OptionType::String),
            4 => Ok(OptionType::Integer),
            5 => Ok(OptionType::Boolean),
            6 => Ok(OptionType::User),
            8 => Ok(OptionType::Role),
            11 => Ok(OptionType::Attachment),
            other => Err(format!("unsupported option type: {}", other)),
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OptionType::SubCommand => "SUB_COMMAND",
            OptionType::String => "STRING",
            OptionType::Integer => "INTEGER",
            OptionType::Boolean => "BOOLEAN",
            OptionType::User => "USER",
            OptionType::Role => "ROLE",
            OptionType::Attachment => "ATTACHMENT",
        };
        f.write_str(name)
    }
}

/// Value carried by a predefined choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Integer(i64),
    String(String),
}

impl From<&str> for ChoiceValue {
    fn from(value: &str) -> Self {
        ChoiceValue::String(value.to_string())
    }
}

impl From<String> for ChoiceValue {
    fn from(value: String) -> Self {
        ChoiceValue::String(value)
    }
}

impl From<i64> for ChoiceValue {
    fn from(value: i64) -> Self {
        ChoiceValue::Integer(value)
    }
}

/// A predefined (label, value) pair offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChoice {
    /// Label shown to the user
    pub name: String,
    pub value: ChoiceValue,
}

impl OptionChoice {
    pub fn new(name: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One input slot of a command, or a sub-command branch when
/// `kind` is [`OptionType::SubCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Lowercase name, unique among its siblings
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: OptionType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Mutually exclusive with `choices` on the platform side; not enforced here.
    #[serde(default, skip_serializing_if = "is_false")]
    pub autocomplete: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
    /// Nested parameters of a sub-command branch
    #[serde(rename = "options", default, skip_serializing_if = "Vec::is_empty")]
    pub sub_options: Vec<CommandOption>,
}

impl CommandOption {
    pub fn new(kind: OptionType, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            required: false,
            autocomplete: false,
            choices: Vec::new(),
            min_value: None,
            max_value: None,
            sub_options: Vec::new(),
        }
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(OptionType::String, name, description)
    }

    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(OptionType::Integer, name, description)
    }

    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(OptionType::Boolean, name, description)
    }

    pub fn user(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(OptionType::User, name, description)
    }

    pub fn role(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(OptionType::Role, name, description)
    }

    pub fn attachment(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(OptionType::Attachment, name, description)
    }

    pub fn subcommand(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(OptionType::SubCommand, name, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn autocomplete(mut self) -> Self {
        self.autocomplete = true;
        self
    }

    pub fn choices(mut self, choices: impl IntoIterator<Item = OptionChoice>) -> Self {
        self.choices.extend(choices);
        self
    }

    pub fn min_value(mut self, min: i64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn max_value(mut self, max: i64) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Append a nested option to a sub-command branch.
    pub fn option(mut self, option: CommandOption) -> Self {
        self.sub_options.push(option);
        self
    }

    pub fn is_subcommand(&self) -> bool {
        self.kind == OptionType::SubCommand
    }
}

/// A top-level invocable command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Globally unique name within the catalog
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    /// Permission bitmask (decimal string) required to see the command, e.g. "8" for administrators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            default_member_permissions: None,
        }
    }

    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn default_member_permissions(mut self, mask: impl Into<String>) -> Self {
        self.default_member_permissions = Some(mask.into());
        self
    }

    /// A dispatcher has only sub-command branches and no direct parameters.
    pub fn is_dispatcher(&self) -> bool {
        !self.options.is_empty() && self.options.iter().all(CommandOption::is_subcommand)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
