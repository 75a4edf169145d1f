use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use image::DynamicImage;

use huffimage_rust::codec::EncodedImage;
use huffimage_rust::raster::Raster;
use huffimage_rust::ImmutableImage;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Compress an image into the binary and config artifacts
    #[value(alias = "e")]
    Encode,
    /// Rebuild the image from the binary and config artifacts
    #[value(alias = "d")]
    Decode,
}

#[derive(Parser, Debug)]
#[command(about = "Lossless Huffman encoding and decoding of images")]
struct Args {
    /// Mode (encoding or decoding)
    #[arg(short, long, value_enum)]
    mode: Mode,
    /// Path to the image file
    #[arg(short, long)]
    image: Option<PathBuf>,
    /// Path to the encoded file
    #[arg(short, long)]
    encoded: Option<PathBuf>,
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Path to store result files
    #[arg(short, long, default_value = "./")]
    output: PathBuf,
}

fn main() {
    let args = Args::parse();

    let result = match args.mode {
        Mode::Encode => encode(&args),
        Mode::Decode => decode(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn encode(args: &Args) -> Result<()> {
    let image_path = args.image.as_ref().context("encode mode requires --image")?;
    let img = image::open(image_path)
        .with_context(|| format!("failed opening {}", image_path.display()))?;

    let raster = match img {
        DynamicImage::ImageLuma8(gray) => {
            let (width, height) = gray.dimensions();
            Raster::new(width as usize, height as usize, 1, gray.into_raw())?
        }
        other => {
            let rgb = other.to_rgb8();
            let (width, height) = rgb.dimensions();
            Raster::new(width as usize, height as usize, 3, rgb.into_raw())?
        }
    };

    let comp_time = Instant::now();
    let encoded = EncodedImage::encode(&raster);
    let comp_time = comp_time.elapsed().as_nanos() as f64;
    println!("compressed the image in {}ns", comp_time);

    let basename = artifact_basename(&args.output, image_path)?;
    encoded
        .store(&basename)
        .with_context(|| format!("failed storing artifacts under {basename}"))?;
    println!("stored {basename}.vh and {basename}.config");

    Ok(())
}

fn decode(args: &Args) -> Result<()> {
    let encoded_path = args.encoded.as_ref().context("decode mode requires --encoded")?;
    let config_path = args.config.as_ref().context("decode mode requires --config")?;

    let bytes = fs::read(encoded_path)
        .with_context(|| format!("failed reading {}", encoded_path.display()))?;
    let config = fs::read_to_string(config_path)
        .with_context(|| format!("failed reading {}", config_path.display()))?;
    let encoded = EncodedImage::from_parts(bytes, &config)?;

    let comp_time = Instant::now();
    let raster = encoded.decode()?;
    let comp_time = comp_time.elapsed().as_nanos() as f64;
    println!("decompressed the image in {}ns", comp_time);

    let out_path = Path::new(&artifact_basename(&args.output, encoded_path)?).with_extension("png");
    write_image(&raster, &out_path)?;
    println!("stored the decoded image in {}", out_path.display());

    Ok(())
}

fn write_image(raster: &Raster, path: &Path) -> Result<()> {
    let width = raster.width() as u32;
    let height = raster.height() as u32;
    let samples = raster.samples().to_vec();

    match raster.channels() {
        1 => image::GrayImage::from_raw(width, height, samples)
            .context("raster does not fill a grayscale buffer")?
            .save(path)?,
        3 => image::RgbImage::from_raw(width, height, samples)
            .context("raster does not fill an RGB buffer")?
            .save(path)?,
        4 => image::RgbaImage::from_raw(width, height, samples)
            .context("raster does not fill an RGBA buffer")?
            .save(path)?,
        channels => bail!("cannot write an image with {channels} channels"),
    }

    Ok(())
}

fn artifact_basename(output_dir: &Path, source: &Path) -> Result<String> {
    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("no usable file stem in {}", source.display()))?;
    let basename = output_dir.join(stem);

    basename
        .to_str()
        .map(str::to_string)
        .with_context(|| format!("output path {} is not valid UTF-8", basename.display()))
}
