use std::{env, fs};

use anyhow::{bail, Context};
use log::info;

use perceptron::{builder::TrainerBuilder, specs::TrainerSpec, Outcome};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        bail!("usage: perceptron <trainer spec json>");
    };

    let raw = fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let spec: TrainerSpec =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {path}"))?;
    info!("loaded trainer spec from {path}");

    let mut trainer = TrainerBuilder::new()
        .build(&spec)
        .context("failed to build the trainer")?;

    match trainer.train(&spec.exemplars)? {
        Outcome::Converged { cycles } => println!("converged after {cycles} cycles"),
        Outcome::Halted { cycles } => println!("halted after {cycles} cycles"),
    }

    for exemplar in &spec.exemplars {
        let outputs = trainer.network_mut().predict(exemplar.inputs())?;
        println!(
            "{:?} -> {:?} (desired {:?})",
            exemplar.inputs(),
            outputs,
            exemplar.desired()
        );
    }

    Ok(())
}
