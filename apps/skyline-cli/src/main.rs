use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skyline_input::{InputScript, KeyboardState};
use skyline_kernel::{FlightScene, MovementEvent, SceneConfig};
use skyline_render::{DebugTextRenderer, DrawListRenderer, Renderer};
use skyline_tools::SceneInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skyline-cli", about = "Headless runner for the skyline flight scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config file (.yaml, .yml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the default scene config
    Info,
    /// Run the frame loop headlessly with scripted steering
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Time step passed to every update, in milliseconds
        #[arg(short, long, default_value = "16")]
        delta: f32,
        /// Override the layout seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Steering script: R=right, L=left, B=both, -=none; loops
        #[arg(long, default_value = "-")]
        steer: String,
        /// Print a scene dump every N frames (0 disables)
        #[arg(long, default_value = "0")]
        report_every: u64,
        /// Keep running after the first collision
        #[arg(long)]
        keep_going: bool,
    },
    /// Build the scene and inspect it without running frames
    Inspect {
        /// Override the layout seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Show a single object instead of the whole scene
        #[arg(short, long)]
        object: Option<String>,
        /// Print the per-object draw list
        #[arg(long)]
        draw_list: bool,
    },
}

fn load_config(path: Option<&PathBuf>, seed: Option<u64>) -> anyhow::Result<SceneConfig> {
    let mut config = match path {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("skyline-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", skyline_kernel::crate_info());
            println!("input: {}", skyline_input::crate_info());
            println!("render: {}", skyline_render::crate_info());
            println!("tools: {}", skyline_tools::crate_info());
            let config = load_config(cli.config.as_ref(), None)?;
            println!("{config:#?}");
        }
        Commands::Simulate {
            frames,
            delta,
            seed,
            steer,
            report_every,
            keep_going,
        } => {
            if !delta.is_finite() || delta < 0.0 {
                anyhow::bail!("delta must be a non-negative number, got {delta}");
            }
            let config = load_config(cli.config.as_ref(), seed)?;
            let script = InputScript::parse(&steer)?;
            let mut scene = FlightScene::build(&config, script);
            println!(
                "Simulating: seed={}, frames={frames}, delta={delta}, steer={steer:?}",
                config.seed
            );

            let mut hit_frame = None;
            for _ in 0..frames {
                scene.input_mut().advance();
                let report = scene.frame(delta)?;

                for event in scene.drain_events() {
                    match event {
                        MovementEvent::Collided { obstacle } if report.newly_collided => {
                            println!("Frame {}: collided with {obstacle}", report.frame);
                        }
                        MovementEvent::Wrapped { object, to_z, .. } => {
                            tracing::debug!(frame = report.frame, object = %object, to_z, "wrap");
                        }
                        _ => {}
                    }
                }
                if report_every > 0 && report.frame % report_every == 0 {
                    print!("{}", DebugTextRenderer::new().render(&scene));
                }
                if report.newly_collided {
                    hit_frame = Some(report.frame);
                    if !keep_going {
                        break;
                    }
                }
            }

            println!("{}", SceneInspector::summary(&scene));
            if let Some(info) = SceneInspector::inspect_object(&scene, skyline_kernel::VEHICLE) {
                println!("{info}");
            }
            match hit_frame {
                Some(frame) => println!("Result: collided at frame {frame}"),
                None => println!("Result: clear after {} frames", scene.frame_count()),
            }
            println!("State hash: {:#018x}", scene.state_hash());
        }
        Commands::Inspect {
            seed,
            object,
            draw_list,
        } => {
            let config = load_config(cli.config.as_ref(), seed)?;
            let scene = FlightScene::build(&config, KeyboardState::new());

            match object {
                Some(name) => match SceneInspector::inspect_object(&scene, &name) {
                    Some(info) => println!("{info}"),
                    None => anyhow::bail!("no object named {name:?}"),
                },
                None => {
                    println!("{}", SceneInspector::summary(&scene));
                    for name in SceneInspector::list_objects(&scene) {
                        if let Some(info) = SceneInspector::inspect_object(&scene, &name) {
                            println!("  {info}");
                        }
                    }
                }
            }

            if draw_list {
                for cmd in DrawListRenderer::new().render(&scene) {
                    let t = cmd.model.w_axis;
                    println!(
                        "  draw {:<12} mesh={:?} texture={:?} translate=({:.2}, {:.2}, {:.2}) shininess={}",
                        cmd.name,
                        cmd.mesh,
                        cmd.texture,
                        t.x,
                        t.y,
                        t.z,
                        cmd.material.shininess
                    );
                }
            }
        }
    }

    Ok(())
}
