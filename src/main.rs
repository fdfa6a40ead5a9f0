use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use log::info;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pixelsort::rotate::{self, Rotation};
use pixelsort::{SortConfig, SortEngine};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = App::new("pixelsort")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .arg(
            Arg::with_name("input")
                .help("The input image to sort.")
                .required(true)
                .takes_value(true),
        )
        .args(&[
            arg_output(),
            arg_sorting(),
            arg_strength(),
            arg_direction(),
            arg_section(),
            arg_gap(),
            arg_noise(),
            arg_orientation(),
            arg_chunk(),
            arg_rotation(),
        ])
        .get_matches();

    let input = Path::new(matches.value_of_os("input").context("missing input path")?);
    let output = matches
        .value_of_os("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let extension = input
                .extension()
                .and_then(std::ffi::OsStr::to_str)
                .unwrap_or("png");
            input.with_extension(["sorted", ".", extension].concat())
        });
    let rotation: Rotation = parse(&matches, "rotation")?;
    let config = config_from_matches(&matches)?;

    let image = image::open(input)
        .with_context(|| format!("failed to read input image {}", input.display()))?
        .into_rgba8();

    let mut engine = SortEngine::with_image(image);
    engine.rotate(rotation);
    engine.run(config, |progress, _| {
        info!(
            "{:>5.1}% ({}/{} lines)",
            progress.percent, progress.processed_lines, progress.total_lines
        );
    })?;
    let sorted = engine
        .into_output()
        .context("sort did not produce an image")?;
    // rotate back
    let sorted = rotate::rotate(&sorted, rotation.inverse());
    sorted
        .save(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

fn parse<T>(matches: &ArgMatches, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = matches
        .value_of(name)
        .with_context(|| format!("missing value for {}", name))?;
    value
        .parse()
        .with_context(|| format!("invalid value for {}: {}", name, value))
}

fn config_from_matches(matches: &ArgMatches) -> Result<SortConfig> {
    let config = SortConfig {
        mode: parse(matches, "sorting")?,
        strength: parse(matches, "strength")?,
        direction: parse(matches, "direction")?,
        section_length: parse(matches, "section")?,
        gap_width: parse(matches, "gap")?,
        noise_threshold: parse(matches, "noise")?,
        orientation: parse(matches, "orientation")?,
        chunk_lines: parse(matches, "chunk")?,
    };
    config.validate()?;
    Ok(config)
}

fn arg_sorting() -> Arg<'static, 'static> {
    Arg::with_name("sorting")
        .short("s")
        .long("sorting")
        .help("The metric to sort pixels by.")
        .long_help(
            "The metric to sort pixels by.\n\
                \n\
                `brightness` sorts by the mean of the color channels, `hue` and `saturation` by the HSL\n\
                components and `color` groups pixels by their dominant channel.",
        )
        .possible_values(&["brightness", "hue", "saturation", "color"])
        .default_value("brightness")
        .takes_value(true)
}

fn arg_strength() -> Arg<'static, 'static> {
    Arg::with_name("strength")
        .short("t")
        .long("strength")
        .help("How strongly to sort, from 0 to 100.")
        .long_help(
            "How strongly to sort, from 0 to 100.\n\
                \n\
                Pixels whose metric falls below strength percent of the full range are left out of the sort,\n\
                and only the leading strength percent of every section gets sorted.",
        )
        .default_value("50")
        .takes_value(true)
}

fn arg_direction() -> Arg<'static, 'static> {
    Arg::with_name("direction")
        .short("d")
        .long("direction")
        .help("Whether sections are sorted ascending or descending.")
        .possible_values(&["ascending", "asc", "descending", "desc"])
        .default_value("ascending")
        .takes_value(true)
}

fn arg_section() -> Arg<'static, 'static> {
    Arg::with_name("section")
        .short("l")
        .long("section")
        .help("The length in pixels of a sorted section.")
        .default_value("64")
        .takes_value(true)
}

fn arg_gap() -> Arg<'static, 'static> {
    Arg::with_name("gap")
        .short("g")
        .long("gap")
        .help("The number of unsorted pixels between two sections.")
        .default_value("0")
        .takes_value(true)
}

fn arg_noise() -> Arg<'static, 'static> {
    Arg::with_name("noise")
        .short("n")
        .long("noise")
        .help("Smooths out metric differences below this value before sorting.")
        .long_help(
            "Smooths out metric differences below this value before sorting.\n\
                \n\
                A pixel whose metric is within this distance of both neighbours gets the average of the three,\n\
                which keeps near-identical pixels from being shuffled around. 0 disables smoothing.",
        )
        .default_value("0")
        .takes_value(true)
}

fn arg_orientation() -> Arg<'static, 'static> {
    Arg::with_name("orientation")
        .short("O")
        .long("orientation")
        .help("Whether to sort along rows or columns.")
        .possible_values(&["horizontal", "vertical"])
        .default_value("horizontal")
        .takes_value(true)
}

fn arg_chunk() -> Arg<'static, 'static> {
    Arg::with_name("chunk")
        .short("c")
        .long("chunk")
        .help("The number of lines sorted between two progress reports.")
        .default_value("16")
        .takes_value(true)
}

fn arg_rotation() -> Arg<'static, 'static> {
    Arg::with_name("rotation")
        .short("r")
        .long("rotation")
        .help("The rotation to apply to the image prior sorting.")
        .long_help(
            "The rotation to apply to the image prior sorting.\n\
                \n\
                This value defines the angle at which pixels will be sorted. This may be any multiple of 90 degrees.\n\
                The image is rotated back before it is saved.",
        )
        .default_value("0")
        .allow_hyphen_values(true)
        .takes_value(true)
}

fn arg_output() -> Arg<'static, 'static> {
    Arg::with_name("output")
        .short("o")
        .long("output")
        .help("A file path to save the output image to.")
        .takes_value(true)
}
