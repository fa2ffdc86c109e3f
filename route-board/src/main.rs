use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use serde::Deserialize;

use route_core::{
    BoardState, EditorMeta, EditorRow, RenderConfig, Route, build_route, layout_route,
    render_board_svg,
};

mod cli;

use cli::{Cli, Commands, LayoutArgs};

/// Input of the `build` subcommand: the editor form as JSON.
#[derive(Debug, Deserialize)]
struct EditorInput {
    #[serde(default)]
    meta: EditorMeta,
    rows: Vec<EditorRow>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Build { input, output } => {
            let text = read(&input)?;
            let json = build(&text)?;
            write_output(output.as_deref(), &json)
        }
        Commands::Layout {
            input,
            output,
            layout,
        } => {
            let route = Route::from_json(&read(&input)?)?;
            let cfg = resolve_config(&layout)?;
            let json = relayout(&route, &cfg)?;
            write_output(output.as_deref(), &json)
        }
        Commands::Render {
            input,
            output,
            width,
            height,
            solved,
            layout,
        } => {
            let route = Route::from_json(&read(&input)?)?;
            let cfg = resolve_config(&layout)?;
            let svg = board_svg(&route, &cfg, width, height, solved)?;
            match output.extension().and_then(|e| e.to_str()) {
                Some("svg") => write_output(Some(&output), &svg),
                Some("png") => render_png(&svg, width, height, &output),
                _ => bail!("output must end in .svg or .png: {}", output.display()),
            }
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(p) => {
            fs::write(p, text).with_context(|| format!("writing {}", p.display()))?;
            log::info!("wrote {}", p.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Config file (if any) with flag overrides on top, validated.
fn resolve_config(args: &LayoutArgs) -> Result<RenderConfig> {
    let mut cfg = match &args.config {
        Some(path) => RenderConfig::from_json(&read(path)?)
            .with_context(|| format!("config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(v) = args.zoom {
        cfg.zoom = v;
    }
    if let Some(v) = args.pan_x {
        cfg.pan.x = v;
    }
    if let Some(v) = args.pan_y {
        cfg.pan.y = v;
    }
    if let Some(v) = args.scale {
        cfg.distance_scale = v;
    }
    if let Some(v) = args.gap {
        cfg.min_gap = v;
    }
    if let Some(v) = args.margin {
        cfg.margin = v;
    }
    cfg.validate()?;
    log::debug!("render config {cfg:?}");
    Ok(cfg)
}

fn build(text: &str) -> Result<String> {
    let input: EditorInput = serde_json::from_str(text).context("editor input")?;
    let built = build_route(&input.rows, &input.meta)?;
    log::info!("{}", built.summary());
    Ok(built.route.to_json_pretty()?)
}

fn relayout(route: &Route, cfg: &RenderConfig) -> Result<String> {
    let laid = layout_route(route, cfg)?;
    log::info!(
        "{}: {} nodes from {:?} coordinates",
        laid.id,
        laid.nodes.len(),
        laid.source
    );
    Ok(laid.to_route(route).to_json_pretty()?)
}

fn board_svg(route: &Route, cfg: &RenderConfig, width: u32, height: u32, solved: bool) -> Result<String> {
    if width == 0 || height == 0 {
        bail!("board size must be non-zero, got {width}x{height}");
    }
    let laid = layout_route(route, cfg)?;
    let mut state = BoardState::new(route);
    if solved {
        state.give_up();
    }
    Ok(render_board_svg(&laid, &state, cfg, width, height))
}

/// Family names that cover the Japanese labels, best first.
const CJK_FAMILIES: [&str; 6] = [
    "Noto Sans CJK",
    "Noto Sans JP",
    "Source Han Sans",
    "Hiragino",
    "Yu Gothic",
    "IPAGothic",
];

/// Family to map generic `sans-serif` to: the first CJK-capable family found,
/// else the first family on the machine.
fn pick_sans_family(families: &[String]) -> Option<String> {
    CJK_FAMILIES
        .iter()
        .find_map(|want| families.iter().find(|f| f.starts_with(*want)))
        .or_else(|| families.first())
        .cloned()
}

fn render_png(svg: &str, width: u32, height: u32, path: &Path) -> Result<()> {
    let mut opt = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    let families: Vec<String> = fontdb
        .faces()
        .filter_map(|face| face.families.first().map(|(n, _)| n.clone()))
        .collect();
    match pick_sans_family(&families) {
        Some(name) => fontdb.set_sans_serif_family(name),
        None => log::warn!("no system fonts found; labels will be missing"),
    }
    opt.fontdb = std::sync::Arc::new(fontdb);
    let tree = usvg::Tree::from_str(svg, &opt).context("SVG parse error")?;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).context("pixmap alloc failed")?;
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pm);
    encode_png_deterministic(&pixmap, path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn encode_png_deterministic(pixmap: &tiny_skia::Pixmap, path: &Path) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut enc = Encoder::new(file, pixmap.width(), pixmap.height());
    enc.set_color(ColorType::Rgba);
    enc.set_depth(BitDepth::Eight);
    enc.set_filter(FilterType::NoFilter);
    enc.set_compression(Compression::Default);
    let mut writer = enc.write_header()?;
    writer.write_image_data(pixmap.data())?;
    Ok(())
}
