use std::path::PathBuf;

use anyhow::{Context, bail};
use markpea::capture::ImageFileSource;
use markpea::domain::{AnnotationKind, Point};
use markpea::export::{PngFileSink, normalize_png_path};
use markpea::{EngineConfig, ImageCompositor, Session, ShapeColor};

const USAGE: &str = "usage: markpea OUTPUT INPUT... [--rect X1,Y1,X2,Y2] [--line X1,Y1,X2,Y2] \
                     [--highlight X1,Y1,X2,Y2] [--color RRGGBB]";

/// One replayed drag
struct DragSpec {
    kind: AnnotationKind,
    color: ShapeColor,
    from: Point,
    to: Point,
}

struct Args {
    output: PathBuf,
    inputs: Vec<String>,
    drags: Vec<DragSpec>,
}

fn parse_points(value: &str) -> anyhow::Result<(Point, Point)> {
    let coords = value
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid coordinates '{value}'"))?;
    match coords.as_slice() {
        [x1, y1, x2, y2] => Ok((Point::new(*x1, *y1), Point::new(*x2, *y2))),
        _ => bail!("expected X1,Y1,X2,Y2 but got '{value}'"),
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let output = args.next().context(USAGE)?;
    let mut inputs = Vec::new();
    let mut drags = Vec::new();
    let mut color = EngineConfig::default().default_color;

    while let Some(arg) = args.next() {
        let kind = match arg.as_str() {
            "--rect" => AnnotationKind::Rect,
            "--line" => AnnotationKind::Line,
            "--highlight" => AnnotationKind::Highlight,
            "--color" => {
                let value = args.next().context("--color needs a value")?;
                color = ShapeColor::from_hex(&value)
                    .with_context(|| format!("invalid color '{value}'"))?;
                continue;
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ => {
                inputs.push(arg.clone());
                continue;
            }
        };
        let value = args.next().with_context(|| format!("{arg} needs a value"))?;
        let (from, to) = parse_points(&value)?;
        drags.push(DragSpec {
            kind,
            color,
            from,
            to,
        });
    }

    if inputs.is_empty() {
        bail!("no input images\n{USAGE}");
    }

    Ok(Args {
        output: normalize_png_path(output),
        inputs,
        drags,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = EngineConfig::default();

    let mut source = ImageFileSource::new();
    let mut compositor = ImageCompositor::new((&config).into());
    for input in &args.inputs {
        compositor.capture(&mut source, input);
    }
    let mut session = Session::from_compositor(&mut compositor, config)
        .context("failed to build composite")?;

    for drag in &args.drags {
        session.set_kind(drag.kind);
        session.set_color(drag.color);
        session.pointer_down(drag.from);
        session.pointer_move(drag.to);
        if !session.pointer_up(drag.to) {
            log::warn!(
                "{:?} from {:?} to {:?} is too small, skipped",
                drag.kind,
                drag.from,
                drag.to
            );
        }
    }

    let img = session
        .save_to(&mut PngFileSink, &args.output)
        .map_err(|failure| failure.error)
        .with_context(|| format!("failed to save {}", args.output.display()))?;
    println!(
        "{} ({}x{})",
        args.output.display(),
        img.width(),
        img.height()
    );
    Ok(())
}
