use std::fmt::{Display, Formatter};

use clap::{Parser, ValueEnum};

use crate::bootstrap::bootstrap_cmd;
use crate::post::post_cmd;

mod bootstrap;
mod decompress;
mod post;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Creating post
    Post(PostArgs),
    /// Bootstrap a new site
    Bootstrap(BootstrapArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct PostArgs {
    /// Name of the author. If empty, OS user real name is being used
    #[arg(short, long)]
    name: Option<String>,

    /// Title of the post
    #[arg(short, long)]
    title: Option<String>,

    /// Sector the post belongs to
    #[arg(short, long, default_value = "healthcare")]
    sector: String,

    /// Content type of the post
    #[arg(short, long, default_value = "blog")]
    content_type: String,

    /// Post generation options
    #[arg(short, long, default_value_t = PostOutput::Stdout)]
    output: PostOutput,

    /// Store file used by the store output
    #[arg(long)]
    store_path: Option<String>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct BootstrapArgs {
    /// Directory where the new site will be generated
    #[arg(short, long)]
    out_dir: String,
}

#[derive(Clone, Debug, ValueEnum)]
enum PostOutput {
    /// Writes the new post JSON to the stdout
    Stdout,
    /// Appends the new post to a JSON store file
    Store,
}

impl Display for PostOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PostOutput::Stdout => write!(f, "stdout"),
            PostOutput::Store => write!(f, "store"),
        }
    }
}

fn main() {
    let args = Args::parse();

    match args {
        Args::Post(args) => post_cmd(args),
        Args::Bootstrap(args) => bootstrap_cmd(args),
    };
}
