use alpha_remap::{
    color_mode,
    config::{Config, resolve_output},
    open_image, pad_image, remap_image, save_image,
};
use clap::{Parser, Subcommand};
use log::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[clap(long, global = true, help = "TOML file with default paths")]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild an image from its alpha channel (the default)
    Remap {
        #[clap(help = "Input image")]
        input: Option<PathBuf>,

        #[clap(long, short, help = "Output image, defaults to overwriting the input")]
        output: Option<PathBuf>,
    },
    /// Add transparent rows above and below an image
    Pad {
        #[clap(help = "Input image")]
        input: Option<PathBuf>,

        #[clap(long, short, help = "Output image, defaults to overwriting the input")]
        output: Option<PathBuf>,

        #[clap(long, help = "Rows added on each side")]
        rows: Option<u32>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::new_from_file(path).unwrap_or_else(|e| {
            warn!("Failed to read config file, using defaults. Error: {e}");
            Config::default()
        }),
        None => Config::default(),
    };

    let command = args.command.unwrap_or(Command::Remap {
        input: None,
        output: None,
    });

    match command {
        Command::Remap { input, output } => {
            let input = input.unwrap_or(config.remap.input);
            let output = resolve_output(&input, output.or(config.remap.output).as_deref());

            let image = open_image(&input).inspect_err(|e| error!("{e}"))?;
            println!("{}", color_mode(image.color()));

            let remapped = remap_image(&image).inspect_err(|e| error!("{e}"))?;
            save_image(&remapped, &output).inspect_err(|e| error!("{e}"))?;
        }
        Command::Pad {
            input,
            output,
            rows,
        } => {
            let input = input.unwrap_or(config.pad.input);
            let output = resolve_output(&input, output.or(config.pad.output).as_deref());
            let rows = rows.unwrap_or(config.pad.rows);

            let image = open_image(&input).inspect_err(|e| error!("{e}"))?;
            let padded = pad_image(&image, rows).inspect_err(|e| error!("{e}"))?;
            save_image(&padded, &output).inspect_err(|e| error!("{e}"))?;
            println!(
                "Completed: {} ({}x{})",
                output.display(),
                padded.width(),
                padded.height()
            );
        }
    }

    Ok(())
}
