use std::convert::Infallible;
use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use serde_derive::Serialize;
use structopt::StructOpt;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bkindex::{BkTree, Dist, HammingMetric, LevenshteinMetric, TryMetric};

#[derive(Debug, Error)]
enum BkfindError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}:{line}: not an unsigned integer: {source}", .path.display())]
    ParseKey {
        path: PathBuf,
        line: usize,
        #[source]
        source: ParseIntError,
    },
    #[error("query `{query}` is not an unsigned integer: {source}")]
    ParseQuery {
        query: String,
        #[source]
        source: ParseIntError,
    },
    #[error("unknown metric `{0}`; expected `levenshtein` or `hamming`")]
    UnknownMetric(String),
    #[error("failed to write results: {0}")]
    Write(#[from] io::Error),
    #[error("failed to encode results: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to install tracing subscriber: {0}")]
    Logging(String),
}

#[derive(Debug, Clone, Copy)]
enum MetricName {
    Levenshtein,
    Hamming,
}

impl FromStr for MetricName {
    type Err = BkfindError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "levenshtein" => Ok(MetricName::Levenshtein),
            "hamming" => Ok(MetricName::Hamming),
            other => Err(BkfindError::UnknownMetric(other.to_string())),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "bkfind",
    about = "Index the lines of a file in a BK tree and find the keys close to each query"
)]
struct CommandLineArgs {
    /// `levenshtein` for words, `hamming` for unsigned 64 bit integers
    #[structopt(short = "m", long = "metric", default_value = "levenshtein")]
    metric: MetricName,

    /// Largest distance from a query that still counts as a match
    #[structopt(short = "t", long = "tolerance", default_value = "1")]
    tolerance: Dist,

    /// One JSON object per query instead of tab separated lines
    #[structopt(long = "json")]
    json: bool,

    /// Log tree statistics; `RUST_LOG` overrides
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,

    /// One key per line, blank lines are skipped
    #[structopt(parse(from_os_str))]
    input_filename: PathBuf,

    queries: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Match<'a, K> {
    distance: Dist,
    key: &'a K,
}

#[derive(Debug, Serialize)]
struct QueryReport<'a, K> {
    query: &'a K,
    tolerance: Dist,
    matches: Vec<Match<'a, K>>,
}

fn init_logging(verbose: bool) -> Result<(), BkfindError> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| BkfindError::Logging(err.to_string()))
}

fn read_keys<K, F>(path: &Path, parse: F) -> Result<Vec<K>, BkfindError>
where
    F: Fn(&str, usize) -> Result<K, BkfindError>,
{
    let file = File::open(path).map_err(|source| BkfindError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let keys = parse_keys(path, BufReader::new(file), parse)?;
    info!(path = %path.display(), keys = keys.len(), "read keys");
    Ok(keys)
}

/// One key per line, trimmed; blank lines are skipped. `parse` gets the
/// 1-based line number for error reports.
fn parse_keys<K, R, F>(path: &Path, reader: R, parse: F) -> Result<Vec<K>, BkfindError>
where
    R: BufRead,
    F: Fn(&str, usize) -> Result<K, BkfindError>,
{
    let mut keys = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| BkfindError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            keys.push(parse(trimmed, index + 1)?);
        }
    }
    Ok(keys)
}

fn parse_int_key(path: &Path, line: &str, number: usize) -> Result<u64, BkfindError> {
    line.parse().map_err(|source| BkfindError::ParseKey {
        path: path.to_path_buf(),
        line: number,
        source,
    })
}

fn parse_int_query(query: &str) -> Result<u64, BkfindError> {
    query.trim().parse().map_err(|source| BkfindError::ParseQuery {
        query: query.to_string(),
        source,
    })
}

fn search<K, M, W>(
    mut tree: BkTree<K, M>,
    keys: Vec<K>,
    queries: &[K],
    tolerance: Dist,
    json: bool,
    out: &mut W,
) -> Result<(), BkfindError>
where
    K: Ord + Display + serde::Serialize,
    M: TryMetric<K, Error = Infallible>,
    W: Write,
{
    tree.update(keys);
    debug!(
        nodes = tree.len(),
        max_depth = tree.max_depth(),
        "built index"
    );

    for query in queries {
        let mut matches: Vec<Match<K>> = tree
            .find(query, tolerance)
            .map(|(distance, key)| Match { distance, key })
            .collect();
        matches.sort_by(|a, b| (a.distance, a.key).cmp(&(b.distance, b.key)));
        debug!(%query, matches = matches.len(), "searched");

        if json {
            let report = QueryReport {
                query,
                tolerance,
                matches,
            };
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
        } else {
            for found in &matches {
                writeln!(out, "{}\t{}\t{}", query, found.distance, found.key)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn run(opts: &CommandLineArgs) -> Result<(), BkfindError> {
    init_logging(opts.verbose)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let path = opts.input_filename.as_path();
    match opts.metric {
        MetricName::Levenshtein => {
            let keys = read_keys(path, |line, _| Ok(line.to_string()))?;
            let queries: Vec<String> = opts
                .queries
                .iter()
                .map(|query| query.trim().to_string())
                .collect();
            search(
                BkTree::new(LevenshteinMetric),
                keys,
                &queries,
                opts.tolerance,
                opts.json,
                &mut out,
            )
        }
        MetricName::Hamming => {
            let keys = read_keys(path, |line, number| parse_int_key(path, line, number))?;
            let queries = opts
                .queries
                .iter()
                .map(|query| parse_int_query(query))
                .collect::<Result<Vec<u64>, _>>()?;
            let metric: HammingMetric<u64> = Default::default();
            search(
                BkTree::new(metric),
                keys,
                &queries,
                opts.tolerance,
                opts.json,
                &mut out,
            )
        }
    }
}

fn main() {
    let opts = CommandLineArgs::from_args();
    if let Err(err) = run(&opts) {
        eprintln!("bkfind: {}", err);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    const WORDS: &str = "  book\n\nbooks\ncake\n   \nboo\ncape\n";

    fn words() -> Vec<String> {
        parse_keys(Path::new("words.txt"), Cursor::new(WORDS), |line, _| {
            Ok(line.to_string())
        })
        .unwrap()
    }

    fn render(queries: &[&str], json: bool) -> String {
        let queries: Vec<String> = queries.iter().map(|q| q.to_string()).collect();
        let mut out = Vec::new();
        search(
            BkTree::new(LevenshteinMetric),
            words(),
            &queries,
            1,
            json,
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn keys_are_trimmed_and_blank_lines_skipped() {
        assert_eq!(vec!["book", "books", "cake", "boo", "cape"], words());
    }

    #[rstest]
    #[case("7\n\n  12 \nx1\n", 4)]
    #[case("seven\n", 1)]
    #[case("\n\n\n-3\n", 4)]
    fn bad_integer_keys_report_their_line(#[case] input: &str, #[case] expected: usize) {
        let path = Path::new("ints.txt");
        let err = parse_keys(path, Cursor::new(input), |line, number| {
            parse_int_key(path, line, number)
        })
        .unwrap_err();
        assert!(err
            .to_string()
            .starts_with(&format!("ints.txt:{}: not an unsigned integer", expected)));
        match err {
            BkfindError::ParseKey { line, .. } => assert_eq!(expected, line),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[rstest]
    #[case(" 42 ", Some(42))]
    #[case("0x2a", None)]
    #[case("", None)]
    fn integer_queries_are_trimmed_and_checked(#[case] query: &str, #[case] expected: Option<u64>) {
        match parse_int_query(query) {
            Ok(value) => assert_eq!(expected, Some(value)),
            Err(BkfindError::ParseQuery { query: reported, .. }) => {
                assert!(expected.is_none());
                assert_eq!(query, reported);
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn tab_separated_matches_sort_by_distance_then_key() {
        assert_eq!(
            "boo\t0\tboo\nboo\t1\tbook\ncake\t0\tcake\ncake\t1\tcape\n",
            render(&["boo", "cake"], false)
        );
    }

    #[test]
    fn json_reports_one_object_per_query() {
        let output = render(&["boo", "zzzz"], true);
        let reports: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            vec![
                json!({
                    "query": "boo",
                    "tolerance": 1,
                    "matches": [
                        {"distance": 0, "key": "boo"},
                        {"distance": 1, "key": "book"},
                    ],
                }),
                json!({"query": "zzzz", "tolerance": 1, "matches": []}),
            ],
            reports
        );
    }

    #[test]
    fn unknown_metric_names_are_rejected() {
        assert!(matches!(
            "jaccard".parse::<MetricName>(),
            Err(BkfindError::UnknownMetric(name)) if name == "jaccard"
        ));
    }
}
