use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spdlog::{error, info, warn};

use hexo_astro::config::Config;
use hexo_astro::logger::{configure_logger, LogMode};
use hexo_astro::migrator::Migrator;
use hexo_astro::ref_fixer::RefFixer;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "hexo-astro.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
enum Args {
    /// Migrate Hexo posts and their images to Astro content collections
    Migrate(MigrateArgs),
    /// Rewrite legacy image references in already migrated posts
    FixRefs(FixRefsArgs),
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct MigrateArgs {
    /// Config path. Defaults to hexo-astro.toml next to the executable, in the current or user config directory
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Hexo posts directory, overrides paths.source_dir
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct FixRefsArgs {
    /// Config path. Defaults to hexo-astro.toml next to the executable, in the current or user config directory
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Astro content directory, overrides paths.content_dir
    #[arg(short = 'd', long)]
    content_dir: Option<PathBuf>,
}

fn load_config(config_path: Option<PathBuf>, mode: LogMode) -> Option<Config> {
    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run hexo-astro --help");
            return None;
        }
    };

    if let Err(err) = configure_logger(&config.log, mode) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    Some(config)
}

fn migrate_cmd(args: MigrateArgs) -> ExitCode {
    let Some(mut config) = load_config(args.config_path, LogMode::Truncate) else {
        return ExitCode::FAILURE;
    };
    if let Some(source_dir) = args.source_dir {
        config.paths.source_dir = source_dir;
    }

    match Migrator::new(&config).run() {
        Ok(_) => {
            if let Some(ref location) = config.log.location {
                info!("Log file: {}", location.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Migration aborted: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn fix_refs_cmd(args: FixRefsArgs) -> ExitCode {
    let Some(mut config) = load_config(args.config_path, LogMode::Append) else {
        return ExitCode::FAILURE;
    };
    if let Some(content_dir) = args.content_dir {
        config.paths.content_dir = content_dir;
    }

    let catalog = config.catalog();
    if catalog.is_empty() {
        warn!("The legacy reference catalog is empty, no file will be changed");
    }

    let fixer = RefFixer::new(config.paths.content_dir.clone(), &catalog);
    match fixer.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Image reference fixing aborted: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match args {
        Args::Migrate(args) => migrate_cmd(args),
        Args::FixRefs(args) => fix_refs_cmd(args),
    }
}
