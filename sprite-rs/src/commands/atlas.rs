//! Atlas definition command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::time::Instant;

use sprite_sheet::{Animator, Atlas, FrameTracker};

use crate::utils::create_table;

#[derive(Subcommand)]
pub enum AtlasCommands {
    /// Display information about an atlas definition
    Info {
        /// Path to the atlas JSON file
        file: PathBuf,
    },

    /// Validate an atlas definition
    Validate {
        /// Path to the atlas JSON file
        file: PathBuf,
    },

    /// Step an animator through an atlas and print frame transitions
    Simulate {
        /// Path to the atlas JSON file
        file: PathBuf,

        /// Simulated time step per update, in milliseconds
        #[arg(long, default_value_t = 16.0)]
        step: f32,

        /// Total simulated time, in milliseconds
        #[arg(long, default_value_t = 1000.0)]
        duration: f32,

        /// Frame to start on (defaults to the atlas's declared start frame)
        #[arg(long, value_name = "FRAME")]
        start: Option<String>,
    },
}

pub fn execute(command: AtlasCommands) -> Result<()> {
    match command {
        AtlasCommands::Info { file } => execute_info(file),
        AtlasCommands::Validate { file } => execute_validate(file),
        AtlasCommands::Simulate {
            file,
            step,
            duration,
            start,
        } => execute_simulate(file, step, duration, start),
    }
}

fn load_atlas(path: &Path) -> Result<Atlas> {
    Atlas::from_path(path).with_context(|| format!("Failed to load atlas: {}", path.display()))
}

fn execute_info(path: PathBuf) -> Result<()> {
    use console::style;
    use prettytable::row;

    let atlas = load_atlas(&path)?;

    // Display basic information
    println!("\n{}", style("Atlas Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!(
        "Sheet Size: {}",
        style(format!("{}x{}", atlas.size[0], atlas.size[1])).yellow()
    );
    println!("Start Frame: {}", style(&atlas.start).yellow());
    println!("Sprites: {}", style(atlas.sprites.len()).green());
    println!("Frames: {}", style(atlas.frames.len()).green());

    println!("\n{}", style("Sprites").bold());
    let mut table = create_table(vec!["Name", "Location", "Size"]);
    for (name, sprite) in &atlas.sprites {
        table.add_row(row![
            style(name).cyan(),
            format!("{}, {}", sprite.location[0], sprite.location[1]),
            format!("{}x{}", sprite.size[0], sprite.size[1])
        ]);
    }
    table.printstd();

    println!("\n{}", style("Frames").bold());
    let mut table = create_table(vec!["Name", "Sprite", "Duration", "Next"]);
    for (name, frame) in &atlas.frames {
        table.add_row(row![
            style(name).cyan(),
            &frame.sprite,
            format!("{:.1}", frame.duration),
            &frame.next
        ]);
    }
    table.printstd();

    Ok(())
}

fn execute_validate(path: PathBuf) -> Result<()> {
    use console::style;

    match Atlas::from_path(&path) {
        Ok(atlas) => {
            println!(
                "✓ Atlas '{}' is valid ({} sprites, {} frames)",
                style(path.display()).cyan(),
                style(atlas.sprites.len()).green(),
                style(atlas.frames.len()).green()
            );
        }
        Err(err) => {
            anyhow::bail!("Validation failed: {}", err);
        }
    }

    Ok(())
}

fn execute_simulate(
    path: PathBuf,
    step: f32,
    duration: f32,
    start: Option<String>,
) -> Result<()> {
    use console::style;

    if step <= 0.0 || !step.is_finite() {
        anyhow::bail!("Step must be a positive number of milliseconds, got {step}");
    }

    let atlas = load_atlas(&path)?;
    let mut animator = match start {
        Some(ref frame) => Animator::with_start(&atlas, frame)?,
        None => Animator::new(&atlas)?,
    };
    let mut tracker = FrameTracker::new();

    println!("\n{}", style("Animation Simulation").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!(
        "Step: {} Duration: {}",
        style(format!("{step}ms")).yellow(),
        style(format!("{duration}ms")).yellow()
    );

    println!(
        "{:>10}  {}",
        style("0.0ms").dim(),
        style(animator.current_frame()).cyan()
    );

    let mut clock = 0.0f32;
    let mut transitions = 0u32;

    while clock < duration {
        let previous = animator.current_frame().to_string();

        let begin = Instant::now();
        animator.update(step);
        tracker.record(begin.elapsed().as_secs_f32() * 1000.0);

        clock += step;

        if animator.current_frame() != previous {
            transitions += 1;
            let t = animator.uv_transform();
            println!(
                "{:>10}  {} -> {}  uv scale ({:.3}, {:.3}) translate ({:.3}, {:.3})",
                style(format!("{clock:.1}ms")).dim(),
                previous,
                style(animator.current_frame()).cyan(),
                t[0],
                t[5],
                t[8],
                t[9]
            );
        }
    }

    println!(
        "\nFinal frame: {} ({} transitions)",
        style(animator.current_frame()).cyan(),
        style(transitions).green()
    );
    if let Some(average) = tracker.average() {
        println!(
            "Average update cost: {}",
            style(format!("{:.4}ms", average)).green()
        );
    }

    Ok(())
}
