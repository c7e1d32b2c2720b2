use clap::{Parser, Subcommand};
use richpad::commands::MENU;
use richpad::config::{Config, config_file_path};
use richpad::session::Session;
use richpad::{Error, logging, script};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "richpad")]
#[command(about = "A rich text editing engine driven by command scripts", long_about = None)]
struct Args {
    /// Config file to use instead of the one in the user config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a command script and print the resulting document
    Run {
        /// Script file, one command per line
        script: PathBuf,
        /// Plain-text file to start from
        #[arg(long)]
        input: Option<PathBuf>,
        /// Write the resulting text to this file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Print the document structure of a plain-text file
    Dump {
        /// File to load
        file: PathBuf,
    },
    /// List the menu commands and their shortcuts
    Menu,
    /// Show the configuration in effect
    Config {
        /// Write it to the config file
        #[arg(long)]
        init: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config, Error> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::load_default()),
    }
}

fn cmd_run(
    script_path: &Path,
    input: Option<&Path>,
    export: Option<&Path>,
    config: Config,
) -> Result<(), Error> {
    let source = fs::read_to_string(script_path).map_err(|source| Error::Read {
        path: script_path.to_path_buf(),
        source,
    })?;
    let commands = script::parse(&source)?;

    let mut session = match input {
        Some(path) => Session::open(path, config)?,
        None => Session::new(config),
    };
    for command in commands {
        session.execute(command)?;
    }

    if let Some(path) = export {
        session.export_plain_text(path)?;
    }

    println!("{}", session.title());
    print!("{}", session.document());
    let selection = session.editor().selection();
    println!("selection: {}..{}", selection.anchor, selection.caret);
    Ok(())
}

fn cmd_dump(file: &Path, config: Config) -> Result<(), Error> {
    let session = Session::open(file, config)?;
    print!("{}", session.document());
    Ok(())
}

fn cmd_menu() {
    for entry in MENU {
        match entry.shortcut {
            Some(shortcut) => println!("{:<32} {}", entry.path, shortcut),
            None => println!("{}", entry.path),
        }
    }
}

fn cmd_config(config: &Config, path: Option<&Path>, init: bool) -> Result<(), Error> {
    let path = path.map(Path::to_path_buf).or_else(config_file_path);
    match &path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory on this platform"),
    }
    print!("{}", config.to_toml()?);

    if init && let Some(path) = path {
        config.save(&path)?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&config.log_level);

    let result = match args.command {
        Commands::Run {
            script,
            input,
            export,
        } => cmd_run(&script, input.as_deref(), export.as_deref(), config),
        Commands::Dump { file } => cmd_dump(&file, config),
        Commands::Menu => {
            cmd_menu();
            Ok(())
        }
        Commands::Config { init } => cmd_config(&config, args.config.as_deref(), init),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
