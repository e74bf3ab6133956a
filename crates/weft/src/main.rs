use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use mimalloc::MiMalloc;
use weft_config::WeftConfig;
use weft_errors::Renderer;
use weft_parse::{Parse, ParserOptions, parse};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(version, about = "Checks and lowers hybrid markup documents")]
struct Cli {
    /// Configuration file. Defaults to the nearest `weft.toml`.
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Reports parse and lint diagnostics.
    Check {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
    },
    /// Prints the token stream.
    Tokens { path: Utf8PathBuf },
    /// Prints the syntax tree.
    Tree { path: Utf8PathBuf },
    /// Prints the generated documents, or writes them to `--out`.
    Transform {
        path: Utf8PathBuf,
        #[arg(long)]
        out: Option<Utf8PathBuf>,
    },
}

struct Input {
    path: Utf8PathBuf,
    text: String,
    options: ParserOptions,
}

impl Input {
    fn load(config: &WeftConfig, path: Utf8PathBuf) -> anyhow::Result<Self> {
        let Some(options) = config.parser_options(&path) else {
            bail!("`{path}` is not a document of any known dialect");
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read `{path}`"))?;
        Ok(Self { path, text, options })
    }

    fn parse(&self) -> Parse {
        parse(&self.text, &self.options)
    }
}

fn load_config(explicit: Option<&Utf8Path>, near: &Utf8Path) -> anyhow::Result<WeftConfig> {
    let config = match explicit {
        Some(path) => WeftConfig::load_from_path(path)?,
        None => {
            let dir = near.parent().filter(|dir| !dir.as_str().is_empty());
            WeftConfig::discover(dir.unwrap_or(Utf8Path::new(".")))?
        }
    };
    Ok(config)
}

fn check(config_path: Option<&Utf8Path>, paths: Vec<Utf8PathBuf>) -> anyhow::Result<()> {
    let renderer = Renderer::styled();
    let mut errors = 0;

    for path in paths {
        let config = load_config(config_path, &path)?;
        let input = Input::load(&config, path)?;
        let parse = input.parse();

        for diagnostic in parse.errors() {
            eprintln!("{}", diagnostic.render(&renderer, input.path.as_str(), &input.text));
            errors += usize::from(diagnostic.is_error());
        }
    }

    if errors > 0 {
        bail!("found {errors} error(s)");
    }
    Ok(())
}

fn tokens(input: &Input) {
    for token in weft_tokenizer::tokenize(&input.text, input.options.dialect) {
        match token.error {
            Some(error) => println!("{:?}@{:?} {}", token.kind, token.range, error.name()),
            None => println!("{:?}@{:?} {:?}", token.kind, token.range, token.text(&input.text)),
        }
    }
}

fn transform(input: &Input, out: Option<&Utf8Path>) -> anyhow::Result<()> {
    let parse = input.parse();
    let artifacts = weft_transform::transform(parse.tree(), input.path.as_str());

    let Some(out) = out else {
        for artifact in artifacts {
            println!("== {}\n{}", artifact.file_name, artifact.text);
        }
        return Ok(());
    };

    std::fs::create_dir_all(out).with_context(|| format!("failed to create `{out}`"))?;
    for artifact in artifacts {
        let name = Utf8Path::new(&artifact.file_name).file_name().unwrap_or(&artifact.file_name);
        let target = out.join(name);
        std::fs::write(&target, &artifact.text)
            .with_context(|| format!("failed to write `{target}`"))?;
        log::info!("wrote {target}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Check { paths } => check(config_path, paths),
        Command::Tokens { path } => {
            let input = Input::load(&load_config(config_path, &path)?, path)?;
            tokens(&input);
            Ok(())
        }
        Command::Tree { path } => {
            let input = Input::load(&load_config(config_path, &path)?, path)?;
            print!("{}", input.parse().tree().debug_tree());
            Ok(())
        }
        Command::Transform { path, out } => {
            let input = Input::load(&load_config(config_path, &path)?, path)?;
            transform(&input, out.as_deref())
        }
    }
}
