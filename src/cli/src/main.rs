use std::path::PathBuf;

use brownian::{DataModule, DataModuleConfig, PathSampler, Split, start, success};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::eyre;
use cube_core::Cube3;
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};

/// Generates labeled next-move samples from scrambled 3x3 antipodal paths
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The data module configuration file to use, in TOML format. The
    /// built-in defaults are used when omitted.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print samples of a split, one per line as `label features`
    Samples {
        #[arg(value_enum, default_value_t = SplitArg::Train)]
        split: SplitArg,
        /// How many samples to print; defaults to the declared size
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Walk a single episode and print every state as a facelet string
    Episode {
        #[arg(value_enum, default_value_t = SplitArg::Train)]
        split: SplitArg,
        /// Override the split's seed
        #[arg(long)]
        seed: Option<u64>,
        /// Override the split's scramble length
        #[arg(short, long)]
        wander: Option<usize>,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Print the canonical path table, one path per line
    Paths,
}

#[derive(Clone, Copy, ValueEnum)]
enum SplitArg {
    Train,
    Val,
}

impl From<SplitArg> for Split {
    fn from(split: SplitArg) -> Self {
        match split {
            SplitArg::Train => Split::Train,
            SplitArg::Val => Split::Val,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = match &cli.config {
        Some(path) => {
            info!(start!("Loading configuration from {}"), path.display());
            DataModuleConfig::load(path)?
        }
        None => DataModuleConfig::default(),
    };
    let module = DataModule::new(config)?;

    match cli.command {
        Commands::Samples { split, count } => print_samples(&module, split.into(), count)?,
        Commands::Episode {
            split,
            seed,
            wander,
        } => print_episode(&module, split.into(), seed, wander)?,
        Commands::Config => print!("{}", module.config().to_toml_string()?),
        Commands::Paths => print!("{}", module.paths()),
    }

    Ok(())
}

fn print_samples(module: &DataModule, split: Split, count: Option<usize>) -> color_eyre::Result<()> {
    let generator = module.samples(split)?;
    let count = count.unwrap_or(generator.len());
    if count > generator.len() {
        return Err(eyre!(
            "Asked for {count} samples but the split only declares {}",
            generator.len()
        ));
    }

    for sample in generator.take(count) {
        let sample = sample?;
        let action = sample
            .action()
            .ok_or_else(|| eyre!("Sample has no label"))?;
        let bits = sample
            .features
            .iter()
            .map(|&x| if x > 0.5 { '1' } else { '0' })
            .collect::<String>();
        println!("{action}\t{bits}");
    }

    info!(success!("Printed {} samples"), count);
    Ok(())
}

fn print_episode(
    module: &DataModule,
    split: Split,
    seed: Option<u64>,
    wander: Option<usize>,
) -> color_eyre::Result<()> {
    let config = module.split_config(split);
    let mut rng = fastrand::Rng::with_seed(seed.unwrap_or(config.seed));
    let mut sampler = PathSampler::new(Cube3::new(), module.paths().clone());

    let episode = sampler.begin_episode(&mut rng, wander.unwrap_or(config.wander))?;
    println!("path {}: {}", episode.path_index(), episode.path().iter().join(" "));
    println!("start  {}", episode.start());
    let finish = *episode.finish();

    while !sampler.needs_episode() {
        let step = sampler.next_step()?;
        println!("{:<6} {}", step.action.to_string(), step.post);
    }
    println!("finish {finish}");

    Ok(())
}
