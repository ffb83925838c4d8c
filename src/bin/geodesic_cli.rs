use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use geodesic_engine::funnel::{Funnel, funnel_tree, shortest_distances};
use geodesic_engine::geom::{TriangleMesh, VertexIdx};
use geodesic_engine::parse::load_mesh;

const USAGE: &str = r#"geodesic_cli (geodesic-engine)

Computes single-source geodesic distances for triangle meshes and checks
them against expected distance files.

USAGE:
  geodesic_cli [OPTIONS] [FILE...]

Each FILE is resolved under the input directory. With no FILE arguments the
built-in benchmark corpus is run. When an expected file
<expected-dir>/<FILE>_s=<source>.txt exists, the computed distances are
compared against it (absolute tolerance 1e-9); mismatches print NOT PASSED
and dump the computed distances into the output directory.

OPTIONS:
  --source <idx>        source vertex index (default 0)
  --input-dir <dir>     mesh directory (default "input")
  --expected-dir <dir>  expected-distance directory (default "expected")
  --output-dir <dir>    mismatch dump directory (default "output")
  --repeat <n>          solve each mesh n times, report avg +/- spread
  --generate            write the expected file instead of comparing
  -h, --help            show this help

The worker pool size follows RAYON_NUM_THREADS; logging follows RUST_LOG.
"#;

const CORPUS: &[&str] = &[
    "cube1.geom",
    "cube2.geom",
    "cube3.geom",
    "cube4.geom",
    "sphere1.geom",
    "sphere2.geom",
    "sphere3.geom",
    "sphere4.geom",
    "spiral1.geom",
    "spiral2.geom",
    "J17.geom",
];

const EPSILON: f64 = 1e-9;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("geodesic_cli error: {err}");
        std::process::exit(1);
    }
}

struct Config {
    source: VertexIdx,
    input_dir: PathBuf,
    expected_dir: PathBuf,
    output_dir: PathBuf,
}

fn run() -> Result<(), String> {
    let mut args = Args::new(std::env::args().skip(1).collect());
    let mut config = Config {
        source: 0,
        input_dir: PathBuf::from("input"),
        expected_dir: PathBuf::from("expected"),
        output_dir: PathBuf::from("output"),
    };
    let mut files: Vec<String> = Vec::new();
    let mut repeat: Option<usize> = None;
    let mut generate = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--source" => config.source = parse_num(&args.value("--source")?, "--source")?,
            "--input-dir" => config.input_dir = PathBuf::from(args.value("--input-dir")?),
            "--expected-dir" => config.expected_dir = PathBuf::from(args.value("--expected-dir")?),
            "--output-dir" => config.output_dir = PathBuf::from(args.value("--output-dir")?),
            "--repeat" => repeat = Some(parse_num(&args.value("--repeat")?, "--repeat")?),
            "--generate" => generate = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option `{other}`\n\n{USAGE}"));
            }
            other => files.push(other.to_string()),
        }
    }

    if generate && repeat.is_some() {
        return Err("--generate and --repeat are mutually exclusive".to_string());
    }
    if files.is_empty() {
        files = CORPUS.iter().map(ToString::to_string).collect();
    }

    for file in &files {
        if generate {
            generate_file(&config, file)?;
        } else if let Some(n) = repeat {
            time_file(&config, file, n)?;
        } else {
            run_file(&config, file)?;
        }
    }
    Ok(())
}

fn load(config: &Config, name: &str) -> Result<TriangleMesh, String> {
    let path = config.input_dir.join(name);
    load_mesh(&path).map_err(|e| format!("{}: {e}", path.display()))
}

fn run_file(config: &Config, name: &str) -> Result<(), String> {
    let mesh = load(config, name)?;

    let start = Instant::now();
    let tree = funnel_tree(&mesh, config.source);
    let elapsed = start.elapsed();

    println!(
        "File \"{name}\": funnel tree with root {} initialized with {} nodes in {} ms",
        config.source,
        tree.len(),
        elapsed.as_millis()
    );
    if compare(config, name, &mesh, &tree, 0)? == Some(false) {
        println!("---------- NOT PASSED ----------");
    }
    Ok(())
}

fn time_file(config: &Config, name: &str, n: usize) -> Result<(), String> {
    let mesh = load(config, name)?;

    let mut durations = Vec::with_capacity(n);
    let mut passed = 0usize;
    for attempt in 0..n {
        let start = Instant::now();
        let tree = funnel_tree(&mesh, config.source);
        durations.push(start.elapsed());

        if compare(config, name, &mesh, &tree, attempt)? != Some(false) {
            passed += 1;
        }
    }

    let total: Duration = durations.iter().sum();
    let avg = total / n.max(1) as u32;
    let spread: Duration = durations
        .iter()
        .map(|&d| if d < avg { avg - d } else { d - avg })
        .sum::<Duration>()
        / n.max(1) as u32;

    println!(
        "File \"{name}\" ran {n} times. Avg: {} +/- {} microseconds ({passed} passed)",
        avg.as_micros(),
        spread.as_micros()
    );
    Ok(())
}

fn generate_file(config: &Config, name: &str) -> Result<(), String> {
    let mesh = load(config, name)?;
    let tree = funnel_tree(&mesh, config.source);
    let lengths = shortest_distances(&mesh, config.source, &tree);

    fs::create_dir_all(&config.expected_dir)
        .map_err(|e| format!("create {}: {e}", config.expected_dir.display()))?;
    let path = config.expected_dir.join(format!("{name}_s={}.txt", config.source));
    fs::write(&path, render_lengths(&lengths)).map_err(|e| format!("{}: {e}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Compare against the expected file, if one exists. `Ok(None)` means there
/// was nothing to compare with; `Ok(Some(false))` dumps the computed
/// distances for inspection.
fn compare(
    config: &Config,
    name: &str,
    mesh: &TriangleMesh,
    tree: &[Funnel],
    attempt: usize,
) -> Result<Option<bool>, String> {
    let path = config.expected_dir.join(format!("{name}_s={}.txt", config.source));
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut expected = Vec::new();
    for token in text.split_ascii_whitespace() {
        let value: f64 = token
            .parse()
            .map_err(|_| format!("{}: invalid distance `{token}`", path.display()))?;
        expected.push(value);
    }

    let lengths = shortest_distances(mesh, config.source, tree);
    let ok = expected.len() == lengths.len()
        && expected.iter().zip(&lengths).all(|(a, b)| (a - b).abs() < EPSILON);

    if !ok {
        fs::create_dir_all(&config.output_dir)
            .map_err(|e| format!("create {}: {e}", config.output_dir.display()))?;
        let dump = config
            .output_dir
            .join(format!("{name}_s={} ({attempt}).txt", config.source));
        fs::write(&dump, render_lengths(&lengths)).map_err(|e| format!("{}: {e}", dump.display()))?;
    }
    Ok(Some(ok))
}

fn render_lengths(lengths: &[f64]) -> String {
    let mut out = String::with_capacity(lengths.len() * 20);
    for d in lengths {
        let _ = writeln!(out, "{d:.17}");
    }
    out
}

fn parse_num<T: FromStr>(token: &str, flag: &str) -> Result<T, String> {
    token
        .parse()
        .map_err(|_| format!("invalid value `{token}` for {flag}"))
}

struct Args {
    args: Vec<String>,
    pos: usize,
}

impl Args {
    fn new(args: Vec<String>) -> Self {
        Self { args, pos: 0 }
    }

    fn next(&mut self) -> Option<String> {
        let arg = self.args.get(self.pos)?.clone();
        self.pos += 1;
        Some(arg)
    }

    fn value(&mut self, flag: &str) -> Result<String, String> {
        self.next().ok_or_else(|| format!("missing value for {flag}"))
    }
}
