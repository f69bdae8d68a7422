use crate::error::IdentifierError as Error;
use crate::identifiers::CHANNEL_PREFIX;

/// Characters allowed in ICS-24 identifiers besides ASCII alphanumerics.
const ICS24_SPECIAL_CHARS: &str = "._+-#[]<>";

/// Longest decimal rendering of a `u64` counter.
const MAX_COUNTER_DIGITS: u64 = 20;

/// Rejects any character outside the ICS-24 identifier alphabet.
pub fn validate_identifier_chars(id: &str) -> Result<(), Error> {
    let is_allowed = |c: char| c.is_ascii_alphanumeric() || ICS24_SPECIAL_CHARS.contains(c);

    if !id.chars().all(is_allowed) {
        return Err(Error::InvalidCharacter { id: id.into() });
    }

    Ok(())
}

/// Checks `min <= len(id) <= max`. A `min` of zero is raised to one.
pub fn validate_identifier_length(id: &str, min: u64, max: u64) -> Result<(), Error> {
    let min = min.max(1);
    let length = u64::try_from(id.len()).unwrap_or(u64::MAX);

    if length < min || length > max {
        return Err(Error::InvalidLength {
            id: id.into(),
            min,
            max,
        });
    }

    Ok(())
}

/// Checks that `{prefix}-{counter}` fits in `min_id..=max_id` characters for
/// every possible counter, from a single digit up to `u64::MAX`.
pub fn validate_prefix_length(prefix: &str, min_id: u64, max_id: u64) -> Result<(), Error> {
    let separator_and_shortest = 2;
    let separator_and_longest = MAX_COUNTER_DIGITS + 1;

    validate_identifier_length(
        prefix,
        min_id.saturating_sub(separator_and_shortest),
        max_id.saturating_sub(separator_and_longest),
    )
}

/// Checks that `id` reads `{name}-{counter}`, where the counter is a `u64`
/// written without leading zeros.
pub fn validate_named_u64_index(id: &str, name: &str) -> Result<(), Error> {
    let invalid = || Error::InvalidPrefix { prefix: id.into() };

    let counter = id
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(invalid)?;

    let canonical = counter == "0" || !counter.starts_with('0');
    if !canonical || counter.parse::<u64>().is_err() {
        return Err(invalid());
    }

    Ok(())
}

/// Client types registered on the handler double as client id prefixes on
/// chain, so they follow the same length rule as ICS-24 client id prefixes.
pub fn validate_client_type(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_prefix_length(id, 9, 64)
}

/// Port ids are 2 to 128 characters of the ICS-24 alphabet.
pub fn validate_port_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 2, 128)
}

/// Channel ids are `channel-{N}` and 8 to 64 characters long.
pub fn validate_channel_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 8, 64)?;
    validate_named_u64_index(id, CHANNEL_PREFIX)
}

/// Network names select a configured chain endpoint and name the address
/// record file, so they are kept to characters that are safe in file names.
pub fn validate_network_name(id: &str) -> Result<(), Error> {
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidCharacter { id: id.into() });
    }
    validate_identifier_length(id, 1, 64)
}

/// Role keys become shell variable names in the address record.
pub fn validate_role_key(key: &str) -> Result<(), Error> {
    let mut chars = key.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_uppercase() || first == '_')
                && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidRoleKey { key: key.into() })
    }
}
