//! Structural validation of a command catalog.
//!
//! Checks the rules the registry enforces on upload, so a broken catalog
//! fails locally with the offending path instead of as a remote 400:
//! - names are unique among siblings and follow the naming pattern
//! - descriptions are present and short enough
//! - numeric bounds, choices and nested options only appear where they apply

use crate::error::SchemaError;
use bingo_types::{ChoiceValue, Command, CommandOption, OptionType};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Maximum number of top-level commands per application
pub const MAX_COMMANDS: usize = 100;
/// Maximum number of options at one nesting level
pub const MAX_OPTIONS: usize = 25;
/// Maximum number of choices on one option
pub const MAX_CHOICES: usize = 25;
/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 100;

static NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-_a-z0-9]{1,32}$").unwrap());

/// Validate a full catalog, stopping at the first violation.
pub fn validate(commands: &[Command]) -> Result<(), SchemaError> {
    if commands.len() > MAX_COMMANDS {
        return Err(SchemaError::new(
            "",
            format!("{} commands exceeds the limit of {}", commands.len(), MAX_COMMANDS),
        ));
    }

    let mut seen = HashSet::new();
    for command in commands {
        if !seen.insert(command.name.as_str()) {
            return Err(SchemaError::new(&command.name, "duplicate command name"));
        }
        validate_command(command)?;
    }

    Ok(())
}

fn validate_command(command: &Command) -> Result<(), SchemaError> {
    let path = command.name.as_str();
    check_name(path, &command.name)?;
    check_description(path, &command.description)?;

    if let Some(mask) = &command.default_member_permissions {
        if mask.is_empty() || !mask.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SchemaError::new(
                path,
                format!("default_member_permissions '{}' is not a decimal bitmask", mask),
            ));
        }
    }

    let branches = command.options.iter().filter(|o| o.is_subcommand()).count();
    if branches > 0 && branches != command.options.len() {
        return Err(SchemaError::new(
            path,
            "sub-commands cannot be mixed with plain options",
        ));
    }

    validate_level(path, &command.options, false)
}

/// Validate one sibling list. `nested` is true inside a sub-command branch.
fn validate_level(parent: &str, options: &[CommandOption], nested: bool) -> Result<(), SchemaError> {
    if options.len() > MAX_OPTIONS {
        return Err(SchemaError::new(
            parent,
            format!("{} options exceeds the limit of {}", options.len(), MAX_OPTIONS),
        ));
    }

    let mut seen = HashSet::new();
    let mut optional_seen = false;
    for option in options {
        let path = format!("{}/{}", parent, option.name);
        if !seen.insert(option.name.as_str()) {
            return Err(SchemaError::new(path, "duplicate option name"));
        }

        if !option.is_subcommand() {
            if option.required && optional_seen {
                return Err(SchemaError::new(
                    path,
                    "required options must come before optional ones",
                ));
            }
            optional_seen |= !option.required;
        }

        validate_option(&path, option, nested)?;
    }

    Ok(())
}

fn validate_option(path: &str, option: &CommandOption, nested: bool) -> Result<(), SchemaError> {
    check_name(path, &option.name)?;
    check_description(path, &option.description)?;

    if option.is_subcommand() {
        if nested {
            return Err(SchemaError::new(path, "sub-commands cannot be nested"));
        }
        if !option.choices.is_empty() || option.min_value.is_some() || option.max_value.is_some() {
            return Err(SchemaError::new(path, "sub-commands take no choices or bounds"));
        }
        if let Some(inner) = option.sub_options.iter().find(|o| o.is_subcommand()) {
            return Err(SchemaError::new(
                format!("{}/{}", path, inner.name),
                "sub-commands cannot be nested",
            ));
        }
        return validate_level(path, &option.sub_options, true);
    }

    if !option.sub_options.is_empty() {
        return Err(SchemaError::new(
            path,
            format!("{} option cannot carry nested options", option.kind),
        ));
    }

    validate_choices(path, option)?;
    validate_bounds(path, option)
}

fn validate_choices(path: &str, option: &CommandOption) -> Result<(), SchemaError> {
    if option.choices.is_empty() {
        return Ok(());
    }
    if !option.kind.accepts_choices() {
        return Err(SchemaError::new(
            path,
            format!("{} option cannot have choices", option.kind),
        ));
    }
    if option.choices.len() > MAX_CHOICES {
        return Err(SchemaError::new(
            path,
            format!("{} choices exceeds the limit of {}", option.choices.len(), MAX_CHOICES),
        ));
    }

    for choice in &option.choices {
        if choice.name.is_empty() || choice.name.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(SchemaError::new(
                path,
                format!("choice label '{}' must be 1-{} characters", choice.name, MAX_DESCRIPTION_LEN),
            ));
        }
        let matches_kind = matches!(
            (option.kind, &choice.value),
            (OptionType::String, ChoiceValue::String(_)) | (OptionType::Integer, ChoiceValue::Integer(_))
        );
        if !matches_kind {
            return Err(SchemaError::new(
                path,
                format!("choice '{}' has a value that is not {}", choice.name, option.kind),
            ));
        }
    }

    Ok(())
}

fn validate_bounds(path: &str, option: &CommandOption) -> Result<(), SchemaError> {
    if option.min_value.is_none() && option.max_value.is_none() {
        return Ok(());
    }
    if !option.kind.accepts_bounds() {
        return Err(SchemaError::new(
            path,
            format!("{} option cannot have min_value/max_value", option.kind),
        ));
    }
    if let (Some(min), Some(max)) = (option.min_value, option.max_value) {
        if min > max {
            return Err(SchemaError::new(
                path,
                format!("min_value {} is greater than max_value {}", min, max),
            ));
        }
    }

    Ok(())
}

fn check_name(path: &str, name: &str) -> Result<(), SchemaError> {
    if NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(SchemaError::new(
            path,
            format!("name '{}' must be 1-32 lowercase letters, digits, '-' or '_'", name),
        ))
    }
}

fn check_description(path: &str, description: &str) -> Result<(), SchemaError> {
    let len = description.chars().count();
    if description.trim().is_empty() {
        Err(SchemaError::new(path, "description is empty"))
    } else if len > MAX_DESCRIPTION_LEN {
        Err(SchemaError::new(
            path,
            format!("description is {} characters, limit is {}", len, MAX_DESCRIPTION_LEN),
        ))
    } else {
        Ok(())
    }
}
