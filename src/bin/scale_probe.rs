use std::collections::BTreeMap;
use std::env;
use std::time::Instant;

use contextual_levenshtein::cost::{CostFn, InsertFn};
use contextual_levenshtein::{Levenshtein, Mode};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Contextual Levenshtein scaling probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!("  wall_s         wall-clock seconds for process + path walk");
    eprintln!("  rss_delta_kib  resident memory delta around the run");
    eprintln!(
        "  status         'passed' = matches full-table baseline (len <= {}), 'not_checked' otherwise",
        options.verify_limit
    );
    eprintln!("{}\n", "=".repeat(80));

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/3] Whole-string distance, unit costs");
    measurements.extend(run_scenario(&options, &mut sys, Scenario::Whole));
    eprintln!("[2/3] Substring search, unit costs");
    measurements.extend(run_scenario(&options, &mut sys, Scenario::Substring));
    eprintln!("[3/3] Whole-string distance, contextual insertions");
    measurements.extend(run_scenario(&options, &mut sys, Scenario::Contextual));

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("scale_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    max_len: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 512usize;
        let mut max_len = 1000usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            }
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            let mut value = || -> Result<String, String> {
                match &inline {
                    Some(v) => Ok(v.clone()),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {flag}")),
                }
            };
            match flag.as_str() {
                "--format" => format = OutputFormat::from_str(&value()?)?,
                "--verify-limit" => verify_limit = parse_count(&value()?, "verify limit")?,
                "--max-len" => max_len = parse_count(&value()?, "max len")?,
                _ => return Err(format!("unrecognized argument '{arg}'")),
            }
        }

        Ok(Self {
            format,
            verify_limit,
            max_len,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --features probe --bin scale_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Longest input checked against the full-table baseline (default: 512)
  --max-len <N>                 Engine input cap; larger sizes are truncated (default: 1000)
  -h, --help                    Print this help message
"
        );
    }
}

fn parse_count(value: &str, what: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{what} must be a non-negative integer"))
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Copy, Clone)]
enum Scenario {
    Whole,
    Substring,
    Contextual,
}

impl Scenario {
    fn label(self) -> &'static str {
        match self {
            Scenario::Whole => "whole_unit",
            Scenario::Substring => "substring_unit",
            Scenario::Contextual => "whole_contextual_insert",
        }
    }

    fn engine(self, max_len: usize) -> Levenshtein {
        let mode = match self {
            Scenario::Substring => Mode::Substring,
            _ => Mode::Whole,
        };
        let mut lev = Levenshtein::builder()
            .with_case_sensitive(true)
            .with_mode(mode)
            .with_max_len(max_len)
            .build()
            .unwrap_or_default();
        if let Scenario::Contextual = self {
            let _ = lev.set_insert_cost(CostFn::<InsertFn>::custom(boundary_insert));
        }
        lev
    }

    /// Source and target of length `len`; substring sources are a slice of
    /// the target with a few mutations.
    fn inputs(self, len: usize) -> (Vec<char>, Vec<char>) {
        let target = deterministic_text(len, 1);
        let source = match self {
            Scenario::Substring => {
                let start = len / 3;
                let end = (start + len / 4).min(len);
                let mut s = target[start..end].to_vec();
                for k in (0..s.len()).step_by(7) {
                    s[k] = 'z';
                }
                s
            }
            _ => deterministic_text(len, 0),
        };
        (source, target)
    }
}

fn boundary_insert(_: char, before: Option<char>, after: Option<char>) -> f64 {
    if before == Some(' ') || after == Some(' ') {
        0.5
    } else {
        1.0
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    size_desc: String,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

fn run_scenario(options: &Options, sys: &mut System, scenario: Scenario) -> Vec<Measurement> {
    const SIZES: &[usize] = &[16, 64, 128, 256, 512, 1000, 2000];
    let total = SIZES.len();
    SIZES
        .iter()
        .enumerate()
        .map(|(idx, &len)| {
            eprint!("      [{}/{}] len {}... ", idx + 1, total, len);
            let (source, target) = scenario.inputs(len);
            let s: String = source.iter().collect();
            let t: String = target.iter().collect();
            let mut cost_result = 0.0;
            let mut path_len_result = 0;

            let m = measure(scenario.label(), format!("len={len}"), sys, || {
                let mut lev = scenario.engine(options.max_len);
                lev.process(&s, &t);
                cost_result = lev.total_cost();
                lev.for_each_path_node(|_| path_len_result += 1);

                if len > options.verify_limit || len > options.max_len {
                    return (VerificationStatus::NotChecked, None);
                }
                let baseline = full_table_cost(&source, &target, scenario);
                if (baseline - cost_result).abs() <= 1e-9 {
                    (VerificationStatus::Passed, None)
                } else {
                    (
                        VerificationStatus::Failed,
                        Some(format!("expected {baseline}, got {cost_result}")),
                    )
                }
            });
            eprintln!(
                "{} cost={}, path_len={}, time={:.3}s, status={}",
                m.verification_status.icon(),
                cost_result,
                path_len_result,
                m.wall_s,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Summary");
    eprintln!("{}", "=".repeat(80));

    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }
    let total = measurements.len().max(1) as f64;
    eprintln!("  ✓ Passed: {} ({:.1}%)", passed, 100.0 * passed as f64 / total);
    eprintln!("  ✗ Failed: {} ({:.1}%)", failed, 100.0 * failed as f64 / total);
    eprintln!(
        "  ○ Not checked (len > {}): {} ({:.1}%)",
        options.verify_limit,
        not_checked,
        100.0 * not_checked as f64 / total
    );

    for m in measurements {
        if matches!(m.verification_status, VerificationStatus::Failed) {
            eprintln!("  ✗ {} ({})", m.scenario, m.size_desc);
            if let Some(ref detail) = m.verification_detail {
                eprintln!("     Error: {detail}");
            }
        }
    }

    let mut by_scenario: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements {
        by_scenario.entry(m.scenario).or_default().push(m);
    }
    for (scenario, ms) in &by_scenario {
        let max_time = ms.iter().map(|m| m.wall_s).fold(0.0, f64::max);
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        eprintln!("  {scenario}: max_time={max_time:.3}s, max_rss_delta={max_mem} KiB");
    }
    eprintln!("{}\n", "=".repeat(80));
}

fn measure<F>(
    scenario: &'static str,
    size_desc: String,
    sys: &mut System,
    compute: F,
) -> Measurement
where
    F: FnOnce() -> (VerificationStatus, Option<String>),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (status, detail) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        size_desc,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        verification_status: status,
        verification_detail: detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size_desc,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .fold("scenario".len(), usize::max);
    let col2 = measurements
        .iter()
        .map(|m| m.size_desc.len())
        .fold("size".len(), usize::max);

    println!(
        "{:<col1$}  {:<col2$}  {:>12}  {:>14}  {:>12}  detail",
        "scenario", "size", "wall_s", "rss_delta_kib", "status"
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<12}  {:-<14}  {:-<12}  {:-<12}",
        "", "", "", "", "", ""
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>12.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = match &m.verification_detail {
            Some(d) => format!("\"{}\"", d.replace('"', "'")),
            None => "null".to_string(),
        };
        println!(
            "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"wall_s\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail,
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map(|process| process.memory() / 1024)
        .unwrap_or(0)
}

/// Word-like text: letters cycled with a space every few characters.
fn deterministic_text(len: usize, offset: usize) -> Vec<char> {
    const ALPHABET: &[u8] = b"acgtu";
    (0..len)
        .map(|i| {
            if (i + offset) % 6 == 5 {
                ' '
            } else {
                ALPHABET[(i * 7 + offset) % ALPHABET.len()] as char
            }
        })
        .collect()
}

/// Plain full-table DP, independent of the engine's matrix reuse.
fn full_table_cost(s: &[char], t: &[char], scenario: Scenario) -> f64 {
    let substring = matches!(scenario, Scenario::Substring);
    let insert = |c: char, before: Option<char>, after: Option<char>| match scenario {
        Scenario::Contextual => boundary_insert(c, before, after),
        _ => 1.0,
    };
    let n = s.len();
    let m = t.len();
    let mut dp = vec![vec![0f64; m + 1]; n + 1];
    for i in 1..=n {
        dp[i][0] = i as f64;
    }
    for j in 1..=m {
        dp[0][j] = if substring {
            0.0
        } else {
            dp[0][j - 1] + insert(t[j - 1], None, s.first().copied())
        };
    }
    for i in 1..=n {
        let (before, after) = (Some(s[i - 1]), s.get(i).copied());
        for j in 1..=m {
            let sub = if s[i - 1] == t[j - 1] { 0.0 } else { 1.0 };
            let diag = dp[i - 1][j - 1] + sub;
            let up = dp[i - 1][j] + 1.0;
            let left = dp[i][j - 1] + insert(t[j - 1], before, after);
            dp[i][j] = diag.min(up).min(left);
        }
    }
    if n == 0 {
        return t.iter().map(|&c| insert(c, None, None)).sum();
    }
    if m == 0 {
        return n as f64;
    }
    if substring {
        dp[n].iter().copied().fold(f64::INFINITY, f64::min)
    } else {
        dp[n][m]
    }
}
