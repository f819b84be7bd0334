use chart_xkcd::api::{ChartContext, DocumentFormat, write_document};
use chart_xkcd::core::options::DEFAULT_FONT_FAMILY;
use chart_xkcd::core::{ChartKind, ChartSpec, Viewport};
use chart_xkcd::error::ChartResult;
use chart_xkcd::render::{FontFace, FontLoader};
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: render_chart <Bar|StackedBar|Line|Scatter|Pie|Radar> --input <config.json> --output <chart.svg|chart.html> [--width <px>] [--height <px>] [--unxkcdify] [--strict] [--font-url <url>]";

#[derive(Debug)]
struct CliArgs {
    kind: ChartKind,
    input: PathBuf,
    output: PathBuf,
    width: u32,
    height: u32,
    unxkcdify: bool,
    strict: bool,
    font_url: Option<String>,
}

struct UrlFontLoader<'a> {
    url: &'a str,
}

impl FontLoader for UrlFontLoader<'_> {
    fn load(&self) -> ChartResult<FontFace> {
        Ok(FontFace::new(DEFAULT_FONT_FAMILY, self.url))
    }
}

fn main() {
    let _ = chart_xkcd::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let mut spec = ChartSpec::from_json_str(&raw).map_err(|err| format!("invalid config: {err}"))?;
    if args.strict {
        spec.validate(args.kind).map_err(|err| err.to_string())?;
    }
    if args.unxkcdify {
        spec.options.unxkcdify = Some(true);
    }

    let context = ChartContext::new(Viewport::new(args.width, args.height));
    if let Some(url) = args.font_url.as_deref() {
        context
            .fonts
            .ensure_registered(&UrlFontLoader { url })
            .map_err(|err| format!("failed to register font: {err}"))?;
    }

    let format = write_document(&args.output, args.kind, spec, &context)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))?;
    let label = match format {
        DocumentFormat::Svg => "svg",
        DocumentFormat::Html => "html",
    };
    println!("{} chart written to {} ({label})", args.kind, args.output.display());
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let kind = args
        .next()
        .ok_or_else(|| USAGE.to_owned())?
        .parse::<ChartKind>()
        .map_err(|err| format!("{err}\n{USAGE}"))?;

    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut width = 600;
    let mut height = 400;
    let mut unxkcdify = false;
    let mut strict = false;
    let mut font_url = None::<String>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--width" => width = parse_pixels(args.next(), "--width")?,
            "--height" => height = parse_pixels(args.next(), "--height")?,
            "--unxkcdify" => unxkcdify = true,
            "--strict" => strict = true,
            "--font-url" => {
                font_url = Some(
                    args.next()
                        .ok_or_else(|| "missing value for --font-url".to_owned())?,
                );
            }
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        kind,
        input: input.ok_or_else(|| format!("missing --input\n{USAGE}"))?,
        output: output.ok_or_else(|| format!("missing --output\n{USAGE}"))?,
        width,
        height,
        unxkcdify,
        strict,
        font_url,
    })
}

fn parse_pixels(value: Option<String>, flag: &str) -> Result<u32, String> {
    let value = value.ok_or_else(|| format!("missing value for {flag}"))?;
    value
        .parse::<u32>()
        .map_err(|err| format!("invalid {flag} `{value}`: {err}"))
}
