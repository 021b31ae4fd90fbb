use std::{fs::File, path::Path};

use indexmap::IndexMap;
use itertools::Itertools;
use ptfs_feed::{Advisory, atis_parser::find_runways_in_atis};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_unwrap::ResultExt;

const ATIS_URL: &str = "https://24data.ptfs.app/atis";

/// Which side the parser came up empty on, keyed by the joined ATIS text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Missing {
    departure: bool,
    arrival: bool,
}

type Unparsed = IndexMap<String, Missing>;

async fn get_atis_text() -> reqwest::Result<String> {
    reqwest::get(ATIS_URL).await?.error_for_status()?.text().await
}

/// Decodes the ATIS list entry by entry, logging and skipping the ones that
/// do not decode. A body that is not a JSON array gives an empty list.
fn parse_atis_list(body: &str) -> Vec<Advisory> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(body) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("ATIS list did not decode: {e}");
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .map(serde_json::from_value::<Advisory>)
        .filter_map(Result::ok_or_log)
        .collect()
}

fn get_already_unparsed(path: &Path) -> Unparsed {
    File::open(path)
        .ok()
        .and_then(|rdr| serde_json::from_reader(rdr).ok())
        .unwrap_or_default()
}

fn write_unparsed(path: &Path, unparsed: &Unparsed) {
    if let Ok(file) = File::create(path) {
        let _ = serde_json::to_writer_pretty(file, unparsed);
    }
}

fn check_lines(lines: &[String]) -> Option<Missing> {
    let runways = find_runways_in_atis(lines);
    let missing = Missing {
        departure: runways.departure.is_none(),
        arrival: runways.arrival.is_none(),
    };
    (missing.departure || missing.arrival).then_some(missing)
}

/// Re-checks everything recorded by earlier runs together with the fresh
/// advisories, so entries the parser now handles drop out of the file.
fn find_unparsed_atis(advisories: &[Advisory], path: &Path) -> Unparsed {
    let mut to_test = get_already_unparsed(path)
        .into_keys()
        .map(|text| text.split('\n').map(str::to_owned).collect_vec())
        .collect_vec();
    to_test.extend(advisories.iter().map(|a| {
        let mut lines = vec![format!("[{}]", a.airport)];
        lines.extend(a.lines.iter().cloned());
        lines
    }));

    let unparsed: Unparsed = to_test
        .into_iter()
        .filter_map(|lines| check_lines(&lines).map(|missing| (lines.join("\n"), missing)))
        .collect();
    write_unparsed(path, &unparsed);
    unparsed
}

#[tokio::main]
async fn main() -> reqwest::Result<()> {
    tracing_subscriber::fmt::init();
    let text = get_atis_text().await?;
    let advisories = parse_atis_list(&text);
    let p = Path::new("unparsed_atis.json");
    let unparsed = find_unparsed_atis(&advisories, p);
    info!(
        checked = advisories.len(),
        unparsed = unparsed.len(),
        "Wrote {}",
        p.display()
    );
    Ok(())
}
