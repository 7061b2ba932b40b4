// What you GET:
// • A stippled texture (flat base color + 4000 jittered dots) written to disk.
// • With --preview: a window showing it. R rolls a new one, S saves, ESC quits.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::{Path, PathBuf};
use stipple_texture::draw::Drawer;
use stipple_texture::{BaseColor, Canvas, Error, StippleParams, generate_with_rng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stipple", about = "Generate a stippled (mottled) texture map")]
struct Cli {
    /// Base color as `r,g,b` in [0,1] or `#rrggbb`
    #[arg(short, long, default_value = "1,0,0", value_parser = parse_color)]
    color: BaseColor,

    /// Texture width in pixels
    #[arg(long, default_value_t = stipple_texture::DEFAULT_SIZE)]
    width: u32,

    /// Texture height in pixels
    #[arg(long, default_value_t = stipple_texture::DEFAULT_SIZE)]
    height: u32,

    /// Number of dots to scatter
    #[arg(long, default_value_t = stipple_texture::stipple::DEFAULT_DOT_COUNT)]
    dots: usize,

    /// RNG seed for a reproducible texture (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output image; format follows the extension
    #[arg(short, long, default_value = "stipple.png")]
    output: PathBuf,

    /// Show the texture in a window (R: regenerate, S: save, ESC: quit)
    #[arg(long)]
    preview: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// `-v` forces debug; otherwise RUST_LOG if set, else info.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn parse_color(s: &str) -> Result<BaseColor, String> {
    s.parse().map_err(|e: Error| e.to_string())
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let filter = log_filter(cli.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let params = StippleParams {
        dot_count: cli.dots,
        ..StippleParams::default()
    };

    // Seeded runs are reproducible; otherwise every run looks a little different.
    let mut rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let mut canvas = generate_with_rng(rng.as_mut(), cli.color, cli.width, cli.height, &params)?;
    save(&canvas, &cli.output)?;

    if !cli.preview {
        return Ok(());
    }

    /* --- Preview window ---
       Visual: the texture fills a window of the same size. */
    let mut drawer = Drawer::new("Stipple texture", cli.width as usize, cli.height as usize)?;
    let mut screen = canvas.to_frame_buffer();

    while drawer.is_open() && !drawer.esc_pressed() {
        if drawer.r_pressed_once() {
            // Visual: same color, fresh speckle layout.
            canvas = generate_with_rng(rng.as_mut(), cli.color, cli.width, cli.height, &params)?;
            screen = canvas.to_frame_buffer();
            tracing::info!("regenerated texture");
        }
        if drawer.s_pressed_once() {
            save(&canvas, &cli.output)?;
        }
        drawer.present(&screen)?;
    }

    Ok(())
}

fn save(canvas: &Canvas, path: &Path) -> Result<(), Error> {
    canvas.save(path)?;
    tracing::info!(
        path = %path.display(),
        width = canvas.width(),
        height = canvas.height(),
        "wrote texture"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library_defaults() {
        let cli = Cli::try_parse_from(["stipple"]).unwrap();
        assert_eq!(cli.color, BaseColor::new(1.0, 0.0, 0.0));
        assert_eq!((cli.width, cli.height, cli.dots), (512, 512, 4000));
        assert_eq!(cli.output, PathBuf::from("stipple.png"));
        assert!(cli.seed.is_none() && !cli.preview);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "stipple", "--color", "#336699", "--width", "64", "--height", "32", "--dots", "10",
            "--seed", "9", "-o", "out/tex.jpg", "--preview",
        ])
        .unwrap();
        assert!((cli.color.g - 0.4).abs() < 1e-6);
        assert_eq!((cli.width, cli.height, cli.dots, cli.seed), (64, 32, 10, Some(9)));
        assert_eq!(cli.output, PathBuf::from("out/tex.jpg"));
        assert!(cli.preview);
    }

    #[test]
    fn verbose_flag_selects_debug_filter() {
        assert_eq!(
            log_filter(true).max_level_hint(),
            Some(tracing_subscriber::filter::LevelFilter::DEBUG)
        );
    }

    #[test]
    fn save_writes_image_at_output_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("tex.png");
        let canvas = stipple_texture::generate(BaseColor::new(0.1, 0.2, 0.3), 16, 8).unwrap();
        save(&canvas, &path).unwrap();
        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back.dimensions(), (16, 8));
    }

    #[test]
    fn rejects_malformed_color() {
        assert!(Cli::try_parse_from(["stipple", "--color", "red"]).is_err());
    }
}
