use argh::FromArgs;
use dogeicon::{
    consts::{ICON_LEN, ICON_SIZE, STYLE_MASK},
    decode::{decompress_to_vec, records},
    ChromaPolicy, EncodeOptions, IconEncodeContext, Style, Topology,
};
use image::{imageops::FilterType, ImageFormat, RgbImage};
use std::str::FromStr;

/// DogeIcon cli encoder and decoder.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Encode(Encode),
    Decode(Decode),
    Info(Info),
}

/// Encodes an image as a DogeIcon. Images that are not 48x48 are resized first.
#[derive(FromArgs)]
#[argh(subcommand, name = "encode")]
struct Encode {
    /// chroma policy (top-left, average, top-average, weighted). Defaults to top-left.
    #[argh(option, default = "Chroma(ChromaPolicy::TopLeft)")]
    chroma: Chroma,

    /// force a style (flat, linear) instead of picking the better one
    #[argh(option)]
    style: Option<StyleArg>,

    /// also write the decoded result as PNG to this path
    #[argh(option)]
    preview: Option<String>,

    /// the input file (PNG, JPG, BMP or TIFF)
    #[argh(positional)]
    input: String,
    /// the output file
    #[argh(positional)]
    output: String,
}

/// Decodes a DogeIcon.
#[derive(FromArgs)]
#[argh(subcommand, name = "decode")]
struct Decode {
    /// output format (png, jpg, bmp)
    #[argh(option)]
    format: Format,

    /// the input file
    #[argh(positional)]
    input: String,
    /// the output file
    #[argh(positional)]
    output: String,
}

/// Prints the style and tile topologies of a DogeIcon.
#[derive(FromArgs)]
#[argh(subcommand, name = "info")]
struct Info {
    /// the input file
    #[argh(positional)]
    input: String,
}

#[derive(Debug)]
enum Format {
    Png,
    Jpg,
    Bmp,
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(format) = s.eq_ignore_ascii_case("png").then_some(Format::Png)
               .or_else(|| s.eq_ignore_ascii_case("jpg").then_some(Format::Jpg))
               .or_else(|| s.eq_ignore_ascii_case("bmp").then_some(Format::Bmp))
        else { return Err("invalid string"); };

        Ok(format)
    }
}

struct Chroma(ChromaPolicy);

impl FromStr for Chroma {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let policy = match s.to_ascii_lowercase().as_str() {
            "top-left" => ChromaPolicy::TopLeft,
            "average" => ChromaPolicy::Average4,
            "top-average" => ChromaPolicy::AverageTop2,
            "weighted" => ChromaPolicy::IntensityWeighted,
            _ => return Err("expected one of top-left, average, top-average, weighted"),
        };

        Ok(Chroma(policy))
    }
}

struct StyleArg(Style);

impl FromStr for StyleArg {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(style) = s.eq_ignore_ascii_case("flat").then_some(Style::Flat)
               .or_else(|| s.eq_ignore_ascii_case("linear").then_some(Style::Linear))
        else { return Err("expected flat or linear"); };

        Ok(StyleArg(style))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Cli { command } = argh::from_env();

    match command {
        Command::Encode(options) => encode(options),
        Command::Decode(options) => decode(options),
        Command::Info(options) => info(options),
    }
}

fn encode(options: Encode) -> Result<(), Box<dyn std::error::Error>> {
    let Encode {
        chroma: Chroma(chroma),
        style,
        preview,
        input,
        output,
    } = options;

    let mut image = image::io::Reader::open(&input)?
        .with_guessed_format()?
        .decode()?;

    let size = ICON_SIZE as u32;
    if image.width() != size || image.height() != size {
        println!(
            "Resizing {}x{} image to {size}x{size}",
            image.width(),
            image.height()
        );
        image = image.resize_to_fill(size, size, FilterType::Lanczos3);
    }

    let (raster, components) = if image.color().has_alpha() {
        (image.into_rgba8().into_raw(), 4)
    } else {
        (image.into_rgb8().into_raw(), 3)
    };

    let mut encode_options = EncodeOptions::new().with_chroma(chroma);
    if let Some(StyleArg(style)) = style {
        encode_options = encode_options.with_forced_style(style);
    }

    let compressed = IconEncodeContext::new(encode_options).compress_to_vec(&raster, components)?;

    std::fs::write(&output, &compressed.icon)?;
    println!(
        "Written {} bytes ({:?} style) to `{output}`",
        compressed.icon.len(),
        compressed.style
    );

    if let Some(preview) = preview {
        RgbImage::from_vec(size, size, compressed.preview)
            .ok_or("failed to create image")?
            .save_with_format(&preview, ImageFormat::Png)?;
        println!("Written preview to `{preview}`");
    }

    Ok(())
}

fn decode(options: Decode) -> Result<(), Box<dyn std::error::Error>> {
    let Decode {
        format,
        input,
        output,
    } = options;

    let icon = std::fs::read(&input)?;

    println!("Decoding `{input}`");

    let (style, raster) = decompress_to_vec(&icon)?;
    let size = ICON_SIZE as u32;

    RgbImage::from_vec(size, size, raster)
        .ok_or("failed to create image")?
        .save_with_format(
            &output,
            match format {
                Format::Png => ImageFormat::Png,
                Format::Jpg => ImageFormat::Jpeg,
                Format::Bmp => ImageFormat::Bmp,
            },
        )?;

    println!("Written {size}x{size} {style:?} image to `{output}`");

    Ok(())
}

fn info(options: Info) -> Result<(), Box<dyn std::error::Error>> {
    let icon = std::fs::read(&options.input)?;

    let mut histogram = [0usize; 4];
    for record in records(&icon)? {
        histogram[usize::from(record.topology.bits())] += 1;
    }

    println!("size:     {} bytes ({ICON_LEN} used)", icon.len());
    println!("style:    {:?}", Style::from_byte(icon[0]));
    println!("reserved: {:#09b}", icon[0] & !STYLE_MASK);
    for topology in Topology::ALL {
        println!(
            "{:<10}{}",
            format!("{topology:?}:"),
            histogram[usize::from(topology.bits())]
        );
    }

    Ok(())
}
