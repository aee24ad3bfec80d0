use anyhow::Context;
use clap::{Parser, Subcommand};
use cubestage_author::{Demo, DemoOptions};
use cubestage_render::{DebugTextRenderer, FixedContainer, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubestage-cli", about = "Headless tool for the cubestage demo scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build the demo scene and print it
    Dump {
        /// Container width in CSS pixels
        #[arg(long, default_value = "800")]
        width: u32,
        /// Container height in CSS pixels
        #[arg(long, default_value = "600")]
        height: u32,
        /// Override a control, e.g. `DirectionLight/Position/x=2`
        #[arg(long = "set", value_name = "PATH/LABEL=VALUE")]
        overrides: Vec<String>,
        /// Print the scene as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the render loop for a bounded number of frames
    Frames {
        /// Number of frames to run before disposing
        #[arg(short, long, default_value = "3")]
        count: u64,
        /// Enable orbit damping
        #[arg(long)]
        damping: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("cubestage-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("scene: {}", cubestage_scene::crate_info());
            println!("input: {}", cubestage_input::crate_info());
            println!("render: {}", cubestage_render::crate_info());
            println!("panel: {}", cubestage_panel::crate_info());
            println!("author: {}", cubestage_author::crate_info());
        }
        Commands::Dump {
            width,
            height,
            overrides,
            json,
        } => {
            let mut demo = Demo::new(&FixedContainer::new(width, height), DemoOptions::default())?;
            for entry in &overrides {
                let (path, value) = entry
                    .split_once('=')
                    .with_context(|| format!("expected PATH/LABEL=VALUE, got {entry:?}"))?;
                let applied = demo
                    .panel
                    .set_by_path(path.trim(), value, &mut demo.scene)
                    .with_context(|| format!("applying {entry:?}"))?;
                tracing::info!("{} = {applied}", path.trim());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&demo.scene)?);
            } else {
                print!("{}", DebugTextRenderer::new().render(&demo.scene, &demo.camera));
            }
            demo.dispose();
        }
        Commands::Frames { count, damping } => {
            let mut demo = Demo::new(&FixedContainer::new(800, 600), DemoOptions { damping })?;
            let renderer = DebugTextRenderer::new();
            for _ in 0..count {
                let mut lines = 0;
                demo.frame(|scene, camera| {
                    lines = renderer.render(scene, camera).lines().count();
                    for (_, cube) in scene.cubes_mut() {
                        cube.mark_uploaded();
                    }
                });
                println!(
                    "frame {}: {lines} lines",
                    demo.render_loop().frames()
                );
            }
            demo.dispose();
            println!(
                "Loop: {:?} after {} frames",
                demo.render_loop().state(),
                demo.render_loop().frames()
            );
        }
    }

    Ok(())
}
