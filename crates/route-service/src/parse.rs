use dossier_types::RouteSteps;
use lazy_static::lazy_static;
use regex::Regex;

/// Most steps a lookup returns
pub const MAX_ROUTE_STEPS: usize = 10;

/// Lines this short are headings or stray bullets, not directions
const MIN_STEP_CHARS: usize = 6;

lazy_static! {
    static ref LEADING_MARKER: Regex =
        Regex::new(r"^[*\-\d.\s]+").unwrap();
}

/// Turn a free-text answer into direction steps.
///
/// Bullets and numbering are stripped from each line. An answer with no
/// usable lines becomes a single direct-route step.
pub fn parse_route_lines(raw: &str, origin: &str, destination: &str) -> RouteSteps {
    let steps: Vec<String> = raw
        .lines()
        .map(|line| LEADING_MARKER.replace(line.trim(), "").into_owned())
        .filter(|line| line.chars().count() >= MIN_STEP_CHARS)
        .take(MAX_ROUTE_STEPS)
        .collect();

    if steps.is_empty() {
        return RouteSteps::new(vec![format!(
            "Direct route from {} to {} via NH44",
            origin, destination
        )]);
    }
    RouteSteps::new(steps)
}
