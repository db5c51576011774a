//! Map text parser.
//!
//! One city definition per line:
//!
//! ```text
//! Foo north=Bar west=Baz south=Qu-ux
//! ```
//!
//! Leading and trailing whitespace is trimmed and blank lines are skipped.
//! Tokens are separated by single spaces; every token after the city name
//! must be `direction=CityName` with exactly one `=`. Cities are
//! registered the first time they are mentioned, as source or destination.
//! The first bad line aborts the load; whatever was registered before it
//! stays in the world.

use std::io::BufRead;

use invasion_types::Direction;
use invasion_world::WorldMap;
use tracing::debug;

use crate::error::SimulationError;

/// Parse map text from `reader` into `world`.
///
/// Returns the number of city definition lines read.
///
/// # Errors
///
/// - [`SimulationError::ParseCityDefinition`] for a malformed token or an
///   unknown direction,
/// - [`SimulationError::World`] if the world rejects a city or link (for
///   instance an empty destination name or a conflicting direction),
/// - [`SimulationError::Io`] if reading fails.
pub fn load_map<R: BufRead>(reader: R, world: &mut WorldMap) -> Result<usize, SimulationError> {
    let mut definitions: usize = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index.saturating_add(1);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split(' ');
        let from_name = tokens
            .next()
            .ok_or_else(|| SimulationError::parse(line_number, "missing city name"))?;
        let from = world.get_or_add_city(from_name)?;

        for token in tokens {
            let (direction, to_name) = parse_link(token, line_number)?;
            let to = world.get_or_add_city(to_name)?;
            world.add_link(from, to, direction)?;
        }

        definitions = definitions.saturating_add(1);
        debug!(line = line_number, city = from_name, "parsed city definition");
    }

    Ok(definitions)
}

/// Split a `direction=CityName` token.
fn parse_link(token: &str, line: usize) -> Result<(Direction, &str), SimulationError> {
    let mut parts = token.trim().split('=');
    let (Some(direction), Some(city), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SimulationError::parse(
            line,
            format!("malformed link token {token:?}"),
        ));
    };
    let direction = Direction::parse(direction)
        .map_err(|err| SimulationError::parse(line, err.to_string()))?;
    Ok((direction, city))
}
