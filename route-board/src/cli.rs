use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "route-board")]
#[command(author, version, about)]
#[command(long_about = "Highway route board tooling.\n\n\
    Examples:\n  \
    route-board build rows.json -o route.json      Order editor rows into a route\n  \
    route-board layout route.json                  Print fitted board positions\n  \
    route-board render route.json -o board.png     Draw the board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Order editor rows by proximity and emit the route JSON
    Build {
        /// JSON file with `{"meta": {...}, "rows": [...]}`
        input: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lay out a stored route and emit it with fitted x/y
    Layout {
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Render a route board as SVG or PNG (chosen by the output extension)
    Render {
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value = "960")]
        width: u32,

        #[arg(long, default_value = "640")]
        height: u32,

        /// Show every answer as filled in
        #[arg(long)]
        solved: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

/// Layout tuning shared by the subcommands that place nodes.
#[derive(Args, Debug, Default)]
pub struct LayoutArgs {
    /// JSON file with a render config; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub zoom: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub pan_x: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub pan_y: Option<f64>,

    /// Distance scale applied between consecutive nodes
    #[arg(long)]
    pub scale: Option<f64>,

    /// Minimum distance between consecutive nodes, in percent
    #[arg(long)]
    pub gap: Option<f64>,

    /// Viewport margin, in percent
    #[arg(long)]
    pub margin: Option<f64>,
}
