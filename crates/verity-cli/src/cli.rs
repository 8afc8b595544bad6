//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use verity::{ComplementScope, Distribution, SweepAxis};

/// Verity: synthetic benchmarks for truth-discovery algorithms
#[derive(Parser)]
#[command(name = "verity")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a synthetic claim set and its ground truth
    Generate {
        #[command(flatten)]
        size: SizeArgs,

        #[command(flatten)]
        laws: LawArgs,

        /// Output path for claims (source,item,value)
        #[arg(long, default_value = "claims.csv")]
        claims: PathBuf,

        /// Output path for the ground truth (item,value)
        #[arg(long, default_value = "truth.csv")]
        truth: PathBuf,
    },

    /// Resolve a claims file with one engine
    Resolve {
        /// Path to a claims CSV (source,item,value)
        #[arg(value_name = "CLAIMS")]
        file: PathBuf,

        /// Engine to run
        #[arg(short, long, default_value = "truthfinder")]
        engine: EngineChoice,

        #[command(flatten)]
        params: EngineParams,

        /// Ground-truth CSV to score against (required for the optimal engine)
        #[arg(short, long)]
        truth: Option<PathBuf>,

        /// Write the resolved table as JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate one dataset and score every engine on it
    Run {
        #[command(flatten)]
        size: SizeArgs,

        #[command(flatten)]
        laws: LawArgs,

        #[command(flatten)]
        params: EngineParams,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sweep every preset law combination and save the results
    Sweep {
        #[command(flatten)]
        size: SizeArgs,

        #[command(flatten)]
        params: EngineParams,

        /// Engines to run, comma separated
        #[arg(
            long,
            value_delimiter = ',',
            default_values = ["majority", "truthfinder", "twoestimates", "threeestimates"]
        )]
        engines: Vec<EngineChoice>,

        /// Law set swept on every axis: standard (7 laws) or extended (5 laws)
        #[arg(long, default_value = "standard")]
        presets: PresetChoice,

        /// Keep only this spread law (adds -part<N> to the file name)
        #[arg(short = 'x', long)]
        index: Option<usize>,

        /// Swap this axis for the extension laws (adds -ext<axis> to the file name)
        #[arg(long)]
        extension: Option<AxisChoice>,

        /// Base file name of the sweep record
        #[arg(short, long, default_value = "sweep")]
        name: String,

        /// Directory for the sweep record (the file must not exist)
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// First combination to run
        #[arg(long, default_value = "0")]
        start: usize,

        /// Stop before this combination
        #[arg(long)]
        stop: Option<usize>,

        /// Save after this many experiments
        #[arg(long, default_value = "20")]
        save_interval: usize,
    },
}

/// Dataset dimensions.
#[derive(Args, Clone, Debug)]
pub struct SizeArgs {
    /// Number of sources
    #[arg(long, default_value = "1000")]
    pub sources: usize,

    /// Number of data items
    #[arg(long, default_value = "1000")]
    pub items: usize,

    /// Upper bound on distinct false values per item
    #[arg(long, default_value = "20")]
    pub distinct: usize,

    /// Seed for reproducible generation
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Distribution laws for the generator.
///
/// Laws are written `name` or `name=arg[,arg]`: uniform, constant=v,
/// exponential=lambda, exponential-flipped=lambda, normal=mean,stdv,
/// pareto[=alpha], pareto-flipped[=alpha].
#[derive(Args, Clone, Debug)]
pub struct LawArgs {
    /// Law of per-source coverage
    #[arg(long, default_value = "uniform")]
    pub coverage_law: DistributionChoice,

    /// Law of per-source accuracy
    #[arg(long, default_value = "uniform")]
    pub truth_law: DistributionChoice,

    /// Law of per-item distinctness
    #[arg(long, default_value = "uniform")]
    pub distinct_law: DistributionChoice,

    /// Law of false-value spread weights
    #[arg(long, default_value = "uniform")]
    pub spread_law: DistributionChoice,
}

/// Engine parameters shared by every command that resolves.
#[derive(Args, Clone, Debug)]
pub struct EngineParams {
    /// Initial trustworthiness of every source
    #[arg(long, default_value = "0.001")]
    pub base_trust: f64,

    /// Convergence tolerance (engine default when omitted)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Iteration cap
    #[arg(long, default_value = "100")]
    pub max_iter: usize,

    /// Number of ranked values per item
    #[arg(long, default_value = "1")]
    pub top_k: usize,

    /// Complement set used by the estimates engines
    #[arg(long, default_value = "unclaimed")]
    pub complement: ComplementChoice,
}

/// A parsed distribution law.
#[derive(Clone, Debug)]
pub struct DistributionChoice(pub Distribution);

impl std::str::FromStr for DistributionChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, args) = match s.split_once('=') {
            Some((name, args)) => (name, Some(args)),
            None => (s, None),
        };
        let args: Vec<f64> = match args {
            Some(args) => args
                .split(',')
                .map(|a| {
                    a.trim()
                        .parse::<f64>()
                        .map_err(|_| format!("Invalid number '{}' in law '{}'", a, s))
                })
                .collect::<Result<_, _>>()?,
            None => Vec::new(),
        };
        let arg = |i: usize| {
            args.get(i)
                .copied()
                .ok_or_else(|| format!("Law '{}' needs {} argument(s)", name, i + 1))
        };

        let dist = match name.to_lowercase().as_str() {
            "uniform" => Distribution::uniform(
                args.first().copied().unwrap_or(0.0),
                args.get(1).copied().unwrap_or(1.0),
            ),
            "constant" => Distribution::constant(arg(0)?),
            "exponential" | "exp" => {
                Distribution::trunc_exponential(args.first().copied().unwrap_or(1.0))
            }
            "exponential-flipped" | "exp-flipped" => {
                Distribution::trunc_exponential(args.first().copied().unwrap_or(1.0))
                    .map(Distribution::flipped)
            }
            "normal" => Distribution::trunc_normal(arg(0)?, arg(1)?),
            "pareto" => Distribution::trunc_pareto(args.first().copied()),
            "pareto-flipped" => {
                Distribution::trunc_pareto(args.first().copied()).map(Distribution::flipped)
            }
            _ => {
                return Err(format!(
                    "Unknown law: {}. Use: uniform, constant, exponential, exponential-flipped, normal, pareto, or pareto-flipped.",
                    name
                ));
            }
        };

        dist.map(DistributionChoice).map_err(|e| e.to_string())
    }
}

impl std::fmt::Display for DistributionChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.label())
    }
}

/// Engine selection
#[derive(Clone, Debug, Default)]
pub enum EngineChoice {
    #[default]
    TruthFinder,
    TwoEstimates,
    ThreeEstimates,
    Majority,
    /// Oracle baseline (needs the ground truth)
    Optimal,
}

impl std::str::FromStr for EngineChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truthfinder" | "tf" => Ok(EngineChoice::TruthFinder),
            "twoestimates" | "two" => Ok(EngineChoice::TwoEstimates),
            "threeestimates" | "three" => Ok(EngineChoice::ThreeEstimates),
            "majority" | "vote" => Ok(EngineChoice::Majority),
            "optimal" | "oracle" => Ok(EngineChoice::Optimal),
            _ => Err(format!(
                "Unknown engine: {}. Use: truthfinder, twoestimates, threeestimates, majority, or optimal.",
                s
            )),
        }
    }
}

impl std::fmt::Display for EngineChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineChoice::TruthFinder => write!(f, "truthfinder"),
            EngineChoice::TwoEstimates => write!(f, "twoestimates"),
            EngineChoice::ThreeEstimates => write!(f, "threeestimates"),
            EngineChoice::Majority => write!(f, "majority"),
            EngineChoice::Optimal => write!(f, "optimal"),
        }
    }
}

/// Complement set choice for the estimates engines
#[derive(Clone, Debug, Default)]
pub struct ComplementChoice(pub ComplementScope);

impl std::str::FromStr for ComplementChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "unclaimed" => Ok(ComplementChoice(ComplementScope::Unclaimed)),
            "claimed-by-others" | "others" => Ok(ComplementChoice(ComplementScope::ClaimedByOthers)),
            _ => Err(format!(
                "Unknown complement: {}. Use: unclaimed or claimed-by-others.",
                s
            )),
        }
    }
}

impl std::fmt::Display for ComplementChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            ComplementScope::Unclaimed => write!(f, "unclaimed"),
            ComplementScope::ClaimedByOthers => write!(f, "claimed-by-others"),
        }
    }
}

/// Law set swept on every axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresetChoice {
    #[default]
    Standard,
    Extended,
}

impl std::str::FromStr for PresetChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(PresetChoice::Standard),
            "extended" => Ok(PresetChoice::Extended),
            _ => Err(format!("Unknown preset set: {}. Use: standard or extended.", s)),
        }
    }
}

impl std::fmt::Display for PresetChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetChoice::Standard => write!(f, "standard"),
            PresetChoice::Extended => write!(f, "extended"),
        }
    }
}

/// Sweep axis choice
#[derive(Clone, Copy, Debug)]
pub struct AxisChoice(pub SweepAxis);

impl std::str::FromStr for AxisChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        SweepAxis::ALL
            .into_iter()
            .find(|axis| axis.as_str() == wanted)
            .map(AxisChoice)
            .ok_or_else(|| {
                format!(
                    "Unknown axis: {}. Use: coverage, truth, distinct, or spread.",
                    s
                )
            })
    }
}

impl std::fmt::Display for AxisChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
