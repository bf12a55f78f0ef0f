use clap::Parser;
use shallowequal::functions::builtins::{Recorder, Traced};
use shallowequal::{logging, parse_json, shallow_equal_by, CompareOptions, Customizer, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Compare two JSON documents for shallow equality.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Left-hand JSON document
    left: String,
    /// Right-hand JSON document
    right: String,
    /// Treat values under this key as equal (repeatable)
    #[arg(long = "ignore-key", value_name = "KEY")]
    ignore_keys: Vec<String>,
    /// Numbers within this distance are equal
    #[arg(long)]
    epsilon: Option<f64>,
    /// JSON file with comparison options; flags extend it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log every compared pair and print them to stderr
    #[arg(long)]
    explain: bool,
    /// Only report through the exit code
    #[arg(long, short)]
    quiet: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn options(&self) -> Result<CompareOptions> {
        let base = match &self.config {
            Some(path) => CompareOptions::from_file(path)?,
            None => CompareOptions::default(),
        };
        let flags = CompareOptions {
            ignore_keys: self.ignore_keys.clone(),
            epsilon: self.epsilon,
            explain: self.explain,
        };
        let opts = base.merge(flags);
        opts.validate()?;
        Ok(opts)
    }
}

fn run(args: &Args) -> Result<bool> {
    let opts = args.options()?;
    let left = parse_json(&args.left)?;
    let right = parse_json(&args.right)?;

    // Traced logs each pair once, even when the chain is empty.
    let mut chain = Traced { inner: opts.customizer()? };
    let mut recorder = Recorder::new();
    let equal = shallow_equal_by(&left, &right, |a, b, key| {
        if !opts.explain {
            return chain.inner.customize(a, b, key);
        }
        recorder.customize(a, b, key);
        chain.customize(a, b, key)
    });

    if opts.explain {
        for call in &recorder.calls {
            eprintln!("{}: {} vs {}", call.key.as_deref().unwrap_or("<root>"), call.a, call.b);
        }
    }
    info!(equal, "comparison finished");
    Ok(equal)
}

fn main() -> ExitCode {
    // Parse CLI arguments.
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(equal) => {
            if !args.quiet {
                println!("{equal}");
            }
            if equal {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
