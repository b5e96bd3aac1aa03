use nbview::Pipeline;
use nbview::core::Notebook;
use nbview::core::NotebookSummary;
use nbview::html;
use nbview::loader;
use nbview::markdown::PulldownMarkdown;
use nbview::terminal;
use nbview::theme::Theme;
use std::env;
use std::error::Error;
use std::io::{self, Read};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// A loaded document plus, for remote notebooks, the URL relative links resolve against.
struct Source {
    title: String,
    raw: loader::RawDocument,
    base_url: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return Ok(());
    }

    let mut width: u16 = 80;
    let mut as_html = false;
    let mut plain = false;
    let mut github: Option<String> = None;
    let mut branch: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                width = parse_u16(&args, &mut i, "--width")?;
            }
            "--html" => {
                as_html = true;
                i += 1;
            }
            "--plain" => {
                plain = true;
                i += 1;
            }
            "--github" => {
                github = Some(parse_string(&args, &mut i, "--github")?);
            }
            "--branch" => {
                branch = Some(parse_string(&args, &mut i, "--branch")?);
            }
            _ => break,
        }
    }

    let source = match github {
        Some(repo) => {
            let Some(path) = args.get(i) else {
                return Err(invalid_input("--github expects a notebook path after the repository").into());
            };
            load_github(&repo, path, branch.as_deref())?
        }
        None if i < args.len() => {
            let path = Path::new(&args[i]);
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| args[i].clone());
            Source {
                title,
                raw: loader::load_path(path)?,
                base_url: None,
            }
        }
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            Source {
                title: "notebook".to_string(),
                raw: loader::parse_document(&s)?,
                base_url: None,
            }
        }
    };

    let notebook = Notebook::from_raw(source.raw)?;
    let mut pipeline = if plain { Pipeline::bare() } else { Pipeline::new() };
    if !plain && source.base_url.is_some() {
        let mut markdown = PulldownMarkdown::new();
        markdown.set_base_url(source.base_url);
        markdown.set_highlighter(pipeline.highlighter());
        pipeline.set_markdown(Some(Box::new(markdown)));
    }
    let rendered = pipeline.render(&notebook);

    if as_html {
        let summary = NotebookSummary::of(&notebook);
        print!("{}", html::render_document(&source.title, &rendered.nodes, Some(&summary)));
    } else {
        let text = terminal::notebook_text(&rendered.nodes, &Theme::default(), width);
        for line in &text.lines {
            println!("{}", terminal::line_to_plain(line));
        }
    }

    Ok(())
}

#[cfg(feature = "http")]
fn load_github(repo: &str, path: &str, branch: Option<&str>) -> Result<Source, Box<dyn Error>> {
    let repo = loader::RepoRef::parse(repo)?;
    let mut github = loader::GithubSource::new(loader::UreqTransport::new());
    let branch = match branch {
        Some(branch) => branch.to_string(),
        None => github.default_branch(&repo),
    };
    github = github.with_branch(branch);

    let raw = github.load(&repo, path)?;
    let title = Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(Source {
        title,
        raw,
        base_url: Some(github.raw_base_url(&repo, path)),
    })
}

#[cfg(not(feature = "http"))]
fn load_github(_repo: &str, _path: &str, _branch: Option<&str>) -> Result<Source, Box<dyn Error>> {
    Err(invalid_input("--github needs the `http` feature").into())
}

fn print_help() {
    eprintln!(
        "Usage: dump [options] [path.ipynb]\n\
\n\
Options:\n\
  --width <n>             Header rule width for text output (default: 80)\n\
  --html                  Print a standalone HTML page instead of text\n\
  --plain                 Skip markdown rendering and highlighting\n\
  --github <owner/repo>   Fetch [path.ipynb] from a GitHub repository (feature: http)\n\
  --branch <name>         Branch for --github (default: the repository's default branch)\n\
  -h, --help              Show this help\n\
\n\
If [path] is omitted, reads notebook JSON from stdin.\n\
Set RUST_LOG=nbview_core=debug to see skipped outputs."
    );
}

fn invalid_input(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.into())
}

fn parse_u16(args: &[String], i: &mut usize, flag: &str) -> io::Result<u16> {
    let Some(v) = args.get(*i + 1) else {
        return Err(invalid_input(format!("{flag} expects a value")));
    };
    *i += 2;
    v.parse::<u16>()
        .map_err(|e| invalid_input(format!("{flag} invalid u16: {e}")))
}

fn parse_string(args: &[String], i: &mut usize, flag: &str) -> io::Result<String> {
    let Some(v) = args.get(*i + 1) else {
        return Err(invalid_input(format!("{flag} expects a value")));
    };
    *i += 2;
    Ok(v.to_string())
}
